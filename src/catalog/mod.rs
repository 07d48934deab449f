use std::collections::HashMap;

use crate::errors::{Result, TrackerError};
use crate::models::{
    Character,
    Domain,
    Element,
    FarmableMaterial,
    MaterialKind,
    Weapon,
    WeaponRarity,
    WeaponType,
};

// The three read-only JSON documents the catalog is built from.
pub struct CatalogSources<'a> {
    pub characters: &'a str,
    pub weapons: &'a str,
    pub domains: &'a str,
}

// Immutable reference data. Built once at startup; a malformed source or a
// dangling material reference is fatal, no partial catalog is exposed.
#[derive(Debug)]
pub struct Catalog {
    characters: Vec<Character>,
    weapons: Vec<Weapon>,
    domains: Vec<Domain>,
    materials: Vec<FarmableMaterial>,
    character_index: HashMap<String, usize>,
    weapon_index: HashMap<String, usize>,
    domain_index: HashMap<String, usize>,
    material_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn load(sources: &CatalogSources) -> Result<Self> {
        // Domains come first: they define the material registry that
        // character and weapon references are validated against.
        let domains: Vec<Domain> = serde_json::from_str(sources.domains)
            .map_err(|e| TrackerError::DataLoadError(format!("domains source: {}", e)))?;
        let characters: Vec<Character> = serde_json::from_str(sources.characters)
            .map_err(|e| TrackerError::DataLoadError(format!("characters source: {}", e)))?;
        let weapons: Vec<Weapon> = serde_json::from_str(sources.weapons)
            .map_err(|e| TrackerError::DataLoadError(format!("weapons source: {}", e)))?;

        let mut catalog = Self {
            characters,
            weapons,
            domains,
            materials: Vec::new(),
            character_index: HashMap::new(),
            weapon_index: HashMap::new(),
            domain_index: HashMap::new(),
            material_index: HashMap::new(),
        };

        catalog.collect_materials()?;
        catalog.build_indexes()?;
        catalog.derive_consumers()?;

        log::info!(
            "catalog loaded: {} characters, {} weapons, {} domains, {} materials",
            catalog.characters.len(),
            catalog.weapons.len(),
            catalog.domains.len(),
            catalog.materials.len()
        );
        Ok(catalog)
    }

    // Every material is introduced by the domain that drops it, tagged with
    // the domain's kind.
    fn collect_materials(&mut self) -> Result<()> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        for domain in &self.domains {
            for material_name in &domain.materials {
                let key = material_name.to_lowercase();
                match seen.get(&key) {
                    Some(&idx) => {
                        let existing = &self.materials[idx];
                        if existing.kind != domain.kind {
                            return Err(TrackerError::DataLoadError(format!(
                                "material {} is dropped as {} and as {}",
                                material_name,
                                existing.kind.token(),
                                domain.kind.token()
                            )));
                        }
                    }
                    None => {
                        seen.insert(key, self.materials.len());
                        self.materials
                            .push(FarmableMaterial::new(material_name.clone(), domain.kind));
                    }
                }
            }
        }
        Ok(())
    }

    fn build_indexes(&mut self) -> Result<()> {
        self.characters.sort_by(|a, b| a.name.cmp(&b.name));
        self.weapons.sort_by(|a, b| a.name.cmp(&b.name));
        self.domains.sort_by(|a, b| a.name.cmp(&b.name));
        self.materials.sort_by(|a, b| a.name.cmp(&b.name));

        self.character_index = index_by_name(self.characters.iter().map(|c| c.name.as_str()))?;
        self.weapon_index = index_by_name(self.weapons.iter().map(|w| w.name.as_str()))?;
        self.domain_index = index_by_name(self.domains.iter().map(|d| d.name.as_str()))?;
        self.material_index = index_by_name(self.materials.iter().map(|m| m.name.as_str()))?;
        Ok(())
    }

    // The single used_by derivation pass. Runs exactly once, after all
    // entities are loaded; artifact set consumers stay empty here because
    // they are driven by user listings instead of static data.
    fn derive_consumers(&mut self) -> Result<()> {
        for character in &self.characters {
            let talent_idx = self.material_ref(
                &character.talent_material,
                MaterialKind::TalentBook,
                &character.name,
            )?;
            let weekly_idx = self.material_ref(
                &character.weekly_talent_material,
                MaterialKind::WeeklyBossMaterial,
                &character.name,
            )?;
            self.materials[talent_idx].used_by.insert(character.name.clone());
            self.materials[weekly_idx].used_by.insert(character.name.clone());
        }
        for weapon in &self.weapons {
            let idx = self.material_ref(
                &weapon.ascension_material,
                MaterialKind::WeaponMaterial,
                &weapon.name,
            )?;
            self.materials[idx].used_by.insert(weapon.name.clone());
        }
        Ok(())
    }

    fn material_ref(&self, name: &str, expected: MaterialKind, referrer: &str) -> Result<usize> {
        let idx = *self.material_index.get(&name.to_lowercase()).ok_or_else(|| {
            TrackerError::DataLoadError(format!(
                "{} references undefined material {}",
                referrer, name
            ))
        })?;
        let material = &self.materials[idx];
        if material.kind != expected {
            return Err(TrackerError::DataLoadError(format!(
                "{} references {} as a {} but it is a {}",
                referrer,
                name,
                expected.token(),
                material.kind.token()
            )));
        }
        Ok(idx)
    }

    pub fn character(&self, name: &str) -> Result<&Character> {
        self.character_index
            .get(&name.to_lowercase())
            .map(|&idx| &self.characters[idx])
            .ok_or_else(|| {
                TrackerError::NotFoundError(format!("{} is not a character name", name))
            })
    }

    pub fn weapon(&self, name: &str) -> Result<&Weapon> {
        self.weapon_index
            .get(&name.to_lowercase())
            .map(|&idx| &self.weapons[idx])
            .ok_or_else(|| TrackerError::NotFoundError(format!("{} is not a weapon name", name)))
    }

    pub fn material(&self, name: &str) -> Result<&FarmableMaterial> {
        self.material_index
            .get(&name.to_lowercase())
            .map(|&idx| &self.materials[idx])
            .ok_or_else(|| {
                TrackerError::NotFoundError(format!("{} is not a material name", name))
            })
    }

    pub fn domain(&self, name: &str) -> Result<&Domain> {
        self.domain_index
            .get(&name.to_lowercase())
            .map(|&idx| &self.domains[idx])
            .ok_or_else(|| TrackerError::NotFoundError(format!("{} is not a domain name", name)))
    }

    pub fn is_weapon(&self, name: &str) -> bool {
        self.weapon_index.contains_key(&name.to_lowercase())
    }

    pub fn is_character(&self, name: &str) -> bool {
        self.character_index.contains_key(&name.to_lowercase())
    }

    // Name-sorted slices for iteration.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn materials(&self) -> &[FarmableMaterial] {
        &self.materials
    }

    pub fn find_characters(&self, query: &str, element: Option<Element>) -> Vec<&Character> {
        let query = query.to_lowercase();
        self.characters
            .iter()
            .filter(|c| element.map_or(true, |e| c.element == e))
            .filter(|c| c.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn find_weapons(&self, query: &str, weapon_type: Option<WeaponType>) -> Vec<&Weapon> {
        let query = query.to_lowercase();
        self.weapons
            .iter()
            .filter(|w| weapon_type.map_or(true, |t| w.weapon_type == t))
            .filter(|w| w.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn weapons_by(&self, rarity: WeaponRarity, weapon_type: WeaponType) -> Vec<&Weapon> {
        self.weapons
            .iter()
            .filter(|w| w.rarity == rarity && w.weapon_type == weapon_type)
            .collect()
    }
}

fn index_by_name<'a>(names: impl Iterator<Item = &'a str>) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (idx, name) in names.enumerate() {
        if index.insert(name.to_lowercase(), idx).is_some() {
            return Err(TrackerError::DataLoadError(format!(
                "duplicate name in catalog data: {}",
                name
            )));
        }
    }
    Ok(index)
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::{Catalog, CatalogSources};

    pub const CHARACTERS: &str = r#"[
        {"name": "Albedo", "element": "Geo", "weaponType": "Sword",
         "talentMaterial": "Ballad", "weeklyTalentMaterial": "Tusk of Monoceros Caeli"},
        {"name": "Bennett", "element": "Pyro", "weaponType": "Sword",
         "talentMaterial": "Resistance", "weeklyTalentMaterial": "Dvalin's Plume"},
        {"name": "Fischl", "element": "Electro", "weaponType": "Bow",
         "talentMaterial": "Ballad", "weeklyTalentMaterial": "Spirit Locket of Boreas"},
        {"name": "Razor", "element": "Electro", "weaponType": "Claymore",
         "talentMaterial": "Resistance", "weeklyTalentMaterial": "Dvalin's Claw"}
    ]"#;

    pub const WEAPONS: &str = r#"[
        {"name": "Favonius Sword", "weaponType": "Sword", "rarity": "4-Star",
         "ascensionMaterial": "Tiles of Decarabian's Tower"},
        {"name": "Dull Blade", "weaponType": "Sword", "rarity": "1-Star",
         "ascensionMaterial": "Tiles of Decarabian's Tower"},
        {"name": "Rust", "weaponType": "Bow", "rarity": "4-Star",
         "ascensionMaterial": "Fangs of the Boreal Wolf"},
        {"name": "Wolf's Gravestone", "weaponType": "Claymore", "rarity": "5-Star",
         "ascensionMaterial": "Fangs of the Boreal Wolf"}
    ]"#;

    pub const DOMAINS: &str = r#"[
        {"name": "Cecilia Garden", "type": "Weapon Material",
         "materials": ["Tiles of Decarabian's Tower", "Fangs of the Boreal Wolf"]},
        {"name": "Forsaken Rift", "type": "Talent Book",
         "materials": ["Ballad", "Resistance"]},
        {"name": "Confront Stormterror", "type": "Weekly Boss Material",
         "materials": ["Dvalin's Plume", "Dvalin's Claw", "Tusk of Monoceros Caeli"]},
        {"name": "Wolf of the North Challenge", "type": "Weekly Boss Material",
         "materials": ["Spirit Locket of Boreas", "Tusk of Monoceros Caeli"]},
        {"name": "Midsummer Courtyard", "type": "Artifact",
         "materials": ["Thundering Fury", "Thundersoother"]}
    ]"#;

    pub fn sample_catalog() -> Catalog {
        Catalog::load(&CatalogSources {
            characters: CHARACTERS,
            weapons: WEAPONS,
            domains: DOMAINS,
        })
        .unwrap()
    }
}
