use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use domain_tracker::models::{ArtifactSlot, Element, FarmingFlag, MaterialKind, WeaponType};
use domain_tracker::{
    Aggregator,
    Catalog,
    CatalogSources,
    ListingStore,
    Result,
    SaveFile,
    SearchFlag,
    TrackerError,
};

const BUNDLED_CHARACTERS: &str = include_str!("../data/characters.json");
const BUNDLED_WEAPONS: &str = include_str!("../data/weapons.json");
const BUNDLED_DOMAINS: &str = include_str!("../data/domains.json");

#[derive(Parser)]
#[command(name = "domain-tracker")]
#[command(about = "Track farming listings for characters, weapons and domains")]
struct Cli {
    /// Directory containing characters.json, weapons.json and domains.json
    /// (defaults to the bundled catalog)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Location of the listings save file
    #[arg(long, global = true)]
    save_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search characters by name, optionally filtered by element
    Characters {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        element: Option<String>,
    },
    /// Search weapons by name, with type and listing filters
    Weapons {
        #[arg(default_value = "")]
        query: String,
        #[arg(long = "type")]
        weapon_type: Option<String>,
        /// Show listed weapons only
        #[arg(long, conflicts_with = "unlisted")]
        listed: bool,
        /// Show unlisted weapons only
        #[arg(long)]
        unlisted: bool,
    },
    /// List every domain and its listing counters
    Domains,
    /// Show a domain card: materials with listed and unlisted consumers
    Domain { name: String },
    /// Show a character's listing entry
    Show { character: String },
    /// Equip a weapon on a character; omit the weapon to unequip
    Equip {
        character: String,
        #[arg(default_value = "")]
        weapon: String,
    },
    /// Put an artifact set into slot 1 or 2; omit the set to clear the slot
    SetArtifact {
        character: String,
        slot: u8,
        #[arg(default_value = "")]
        set: String,
    },
    /// Toggle a farming flag (weapon, talent, set1 or set2) on or off
    Farm {
        character: String,
        flag: String,
        /// "on" or "off"
        state: String,
    },
    /// Replace a character's notes
    Notes { character: String, text: String },
    /// Add a weapon to the unassigned farming list
    ListWeapon { weapon: String },
    /// Remove a weapon from the unassigned farming list
    UnlistWeapon { weapon: String },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = match load_catalog(cli.data_dir.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            // Catalog errors are fatal at startup, no partial data.
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let save_file = match &cli.save_file {
        Some(path) => SaveFile::new(path),
        None => SaveFile::default_location(),
    };
    let mut store = match save_file.load() {
        Ok(store) => store,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Could not read the save file. Fix or remove it and retry.");
            return ExitCode::FAILURE;
        }
    };

    let mutated = match run(&cli.command, &catalog, &mut store) {
        Ok(mutated) => mutated,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if mutated {
        if let Err(e) = save_file.save(&store) {
            // Recoverable: the in-memory change was applied but not written.
            log::error!("{}", e);
            eprintln!("The change was not saved. Retry when the disk is available.");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

// Returns whether the store was mutated and needs saving.
fn run(command: &Command, catalog: &Catalog, store: &mut ListingStore) -> Result<bool> {
    let aggregator = Aggregator::new(catalog);
    match command {
        Command::Characters { query, element } => {
            let element = element.as_deref().map(parse_element).transpose()?;
            let matches = catalog.find_characters(query, element);
            for character in &matches {
                println!(
                    "{} ({}, {})",
                    character.name,
                    character.element.token(),
                    character.weapon_type.token()
                );
            }
            println!("Matches: {}", matches.len());
            Ok(false)
        }
        Command::Weapons {
            query,
            weapon_type,
            listed,
            unlisted,
        } => {
            let weapon_type = weapon_type.as_deref().map(parse_weapon_type).transpose()?;
            let flag = if *listed {
                SearchFlag::ListedOnly
            } else if *unlisted {
                SearchFlag::UnlistedOnly
            } else {
                SearchFlag::All
            };
            let matches = aggregator.find_weapons(store, query, weapon_type, flag);
            for weapon in &matches {
                let marker = if aggregator.is_weapon_listed(store, &weapon.name) {
                    " [listed]"
                } else {
                    ""
                };
                println!(
                    "{} ({}, {}){}",
                    weapon.name,
                    weapon.weapon_type.token(),
                    weapon.rarity.token(),
                    marker
                );
            }
            println!("Matches: {}", matches.len());
            Ok(false)
        }
        Command::Domains => {
            for domain in catalog.domains() {
                let listed = aggregator.count_listed(store, &domain.name)?;
                let total = aggregator.count_total(store, &domain.name)?;
                println!(
                    "{} ({}) - Listed: {} / Total: {}",
                    domain.name,
                    domain.kind.token(),
                    listed,
                    total
                );
            }
            Ok(false)
        }
        Command::Domain { name } => {
            let overview = aggregator.domain_overview(store, name)?;
            println!("{} ({})", overview.domain, overview.kind.token());
            println!("Listed: {} / Total: {}", overview.listed_count, overview.total_count);
            for material in &overview.materials {
                println!("  {}", material.material);
                print_consumers("listed", &material.listed);
                print_consumers("unlisted", &material.unlisted);
            }
            Ok(false)
        }
        Command::Show { character } => {
            let character = catalog.character(character)?;
            match store.get(&character.name) {
                Some(entry) => {
                    println!("{}", entry.character_name);
                    println!("  weapon: {}{}", display_item(&entry.equipped_weapon),
                        flag_marker(entry.farming_weapon_status));
                    println!("  set 1:  {}{}", display_item(&entry.artifact_set_one),
                        flag_marker(entry.farming_set_one_status));
                    println!("  set 2:  {}{}", display_item(&entry.artifact_set_two),
                        flag_marker(entry.farming_set_two_status));
                    println!("  talents:{}", flag_marker(entry.farming_talent_status));
                    println!("  notes:  {}", display_item(&entry.notes));
                }
                None => println!("{} has no listing yet", character.name),
            }
            Ok(false)
        }
        Command::Equip { character, weapon } => {
            let character = catalog.character(character)?.name.clone();
            let weapon = if weapon.is_empty() {
                String::new()
            } else {
                catalog.weapon(weapon)?.name.clone()
            };
            store.set_equipped_weapon(&character, &weapon)?;
            Ok(true)
        }
        Command::SetArtifact { character, slot, set } => {
            let character = catalog.character(character)?.name.clone();
            let slot = parse_slot(*slot)?;
            let set = if set.is_empty() {
                String::new()
            } else {
                let material = catalog.material(set)?;
                if material.kind != MaterialKind::ArtifactSet {
                    return Err(TrackerError::InvalidStateError(format!(
                        "{} is a {}, not an artifact set",
                        material.name,
                        material.kind.token()
                    )));
                }
                material.name.clone()
            };
            store.set_artifact_set(&character, slot, &set)?;
            Ok(true)
        }
        Command::Farm { character, flag, state } => {
            let character = catalog.character(character)?.name.clone();
            let flag = FarmingFlag::from_token(flag).ok_or_else(|| {
                TrackerError::NotFoundError(format!("{} is not a farming flag", flag))
            })?;
            let status = parse_state(state)?;
            store.set_farming_status(&character, flag, status)?;
            Ok(true)
        }
        Command::Notes { character, text } => {
            let character = catalog.character(character)?.name.clone();
            store.set_notes(&character, text)?;
            Ok(true)
        }
        Command::ListWeapon { weapon } => {
            let weapon = catalog.weapon(weapon)?.name.clone();
            store.add_unassigned_farmed_weapon(&weapon);
            Ok(true)
        }
        Command::UnlistWeapon { weapon } => {
            let weapon = catalog.weapon(weapon)?.name.clone();
            store.remove_unassigned_farmed_weapon(&weapon);
            Ok(true)
        }
    }
}

fn load_catalog(data_dir: Option<&std::path::Path>) -> Result<Catalog> {
    match data_dir {
        Some(dir) => {
            let characters = read_source(dir, "characters.json")?;
            let weapons = read_source(dir, "weapons.json")?;
            let domains = read_source(dir, "domains.json")?;
            Catalog::load(&CatalogSources {
                characters: &characters,
                weapons: &weapons,
                domains: &domains,
            })
        }
        None => Catalog::load(&CatalogSources {
            characters: BUNDLED_CHARACTERS,
            weapons: BUNDLED_WEAPONS,
            domains: BUNDLED_DOMAINS,
        }),
    }
}

fn read_source(dir: &std::path::Path, file: &str) -> Result<String> {
    let path = dir.join(file);
    std::fs::read_to_string(&path)
        .map_err(|e| TrackerError::DataLoadError(format!("reading {}: {}", path.display(), e)))
}

fn parse_element(token: &str) -> Result<Element> {
    Element::from_token(token)
        .ok_or_else(|| TrackerError::NotFoundError(format!("{} is not an element", token)))
}

fn parse_weapon_type(token: &str) -> Result<WeaponType> {
    WeaponType::from_token(token)
        .ok_or_else(|| TrackerError::NotFoundError(format!("{} is not a weapon type", token)))
}

fn parse_slot(slot: u8) -> Result<ArtifactSlot> {
    match slot {
        1 => Ok(ArtifactSlot::One),
        2 => Ok(ArtifactSlot::Two),
        other => Err(TrackerError::InvalidStateError(format!(
            "artifact slot must be 1 or 2, got {}",
            other
        ))),
    }
}

fn parse_state(state: &str) -> Result<bool> {
    match state.to_lowercase().as_str() {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(TrackerError::InvalidStateError(format!(
            "farming state must be on or off, got {}",
            other
        ))),
    }
}

fn print_consumers(label: &str, names: &[String]) {
    if names.is_empty() {
        println!("    {}: -", label);
    } else {
        println!("    {}: {}", label, names.join(", "));
    }
}

fn display_item(item: &str) -> &str {
    if item.is_empty() {
        "[ none ]"
    } else {
        item
    }
}

fn flag_marker(farming: bool) -> &'static str {
    if farming {
        " (farming)"
    } else {
        ""
    }
}
