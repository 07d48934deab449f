use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{Result, TrackerError};
use crate::models::{ArtifactSlot, FarmingFlag, ListingEntry, ListingUpdate, NOTES_CHARACTER_LIMIT};

// Mutable user state: one entry per character the user has touched, plus the
// weapon-tab-only listing set. Single source of truth for "is this farmed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStore {
    // Keyed by lowercased character name; the entry keeps the display name.
    #[serde(default)]
    characters: BTreeMap<String, ListingEntry>,
    #[serde(default)]
    unassigned_weapons: BTreeSet<String>,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, character: &str) -> Option<&ListingEntry> {
        self.characters.get(&character.to_lowercase())
    }

    // Entries are created lazily on first reference and never deleted.
    pub fn get_or_create(&mut self, character: &str) -> &ListingEntry {
        self.entry_mut(character)
    }

    fn entry_mut(&mut self, character: &str) -> &mut ListingEntry {
        self.characters
            .entry(character.to_lowercase())
            .or_insert_with(|| ListingEntry::new(character.to_string()))
    }

    // The one mutation dispatcher. Each field's invariant lives here:
    // clearing an item forces its farming flag off, and a flag can only be
    // raised while its backing item is selected. Validation runs before any
    // write, so a rejected update leaves the store untouched.
    pub fn apply(&mut self, character: &str, update: ListingUpdate) -> Result<()> {
        if let ListingUpdate::SetFarmingStatus(flag, true) = &update {
            if !self.can_set_farming_status(character, *flag) {
                return Err(TrackerError::InvalidStateError(format!(
                    "cannot mark {} farming for {}: nothing selected",
                    flag.token(),
                    character
                )));
            }
        }
        let entry = self.entry_mut(character);
        match update {
            ListingUpdate::EquipWeapon(weapon) => {
                entry.equipped_weapon = weapon;
                if entry.equipped_weapon.is_empty() {
                    entry.farming_weapon_status = false;
                }
            }
            ListingUpdate::SetArtifactSet(slot, set) => {
                let cleared = set.is_empty();
                match slot {
                    ArtifactSlot::One => {
                        entry.artifact_set_one = set;
                        if cleared {
                            entry.farming_set_one_status = false;
                        }
                    }
                    ArtifactSlot::Two => {
                        entry.artifact_set_two = set;
                        if cleared {
                            entry.farming_set_two_status = false;
                        }
                    }
                }
            }
            ListingUpdate::SetFarmingStatus(flag, status) => {
                entry.set_farming(flag, status);
            }
            ListingUpdate::SetNotes(text) => {
                entry.notes = bounded_notes(text);
            }
        }
        Ok(())
    }

    // The "can-I" query the presentation layer uses instead of reaching into
    // widget state: a flag may be raised only while its backing item is set.
    pub fn can_set_farming_status(&self, character: &str, flag: FarmingFlag) -> bool {
        match self.get(character) {
            Some(entry) => !entry.item_for_flag(flag).is_empty(),
            // No entry yet: only the character itself backs the talent flag.
            None => flag == FarmingFlag::Talent,
        }
    }

    pub fn set_equipped_weapon(&mut self, character: &str, weapon: &str) -> Result<()> {
        self.apply(character, ListingUpdate::EquipWeapon(weapon.to_string()))
    }

    pub fn set_artifact_set(&mut self, character: &str, slot: ArtifactSlot, set: &str) -> Result<()> {
        self.apply(character, ListingUpdate::SetArtifactSet(slot, set.to_string()))
    }

    pub fn set_farming_status(&mut self, character: &str, flag: FarmingFlag, status: bool) -> Result<()> {
        self.apply(character, ListingUpdate::SetFarmingStatus(flag, status))
    }

    pub fn set_notes(&mut self, character: &str, text: &str) -> Result<()> {
        self.apply(character, ListingUpdate::SetNotes(text.to_string()))
    }

    // Name-sorted, since the map is keyed by lowercased name.
    pub fn entries(&self) -> impl Iterator<Item = &ListingEntry> {
        self.characters.values()
    }

    pub fn unassigned_farmed_weapons(&self) -> impl Iterator<Item = &str> {
        self.unassigned_weapons.iter().map(|name| name.as_str())
    }

    pub fn add_unassigned_farmed_weapon(&mut self, weapon: &str) {
        if !self.is_unassigned_farmed(weapon) {
            self.unassigned_weapons.insert(weapon.to_string());
        }
    }

    pub fn remove_unassigned_farmed_weapon(&mut self, weapon: &str) {
        self.unassigned_weapons
            .retain(|name| !name.eq_ignore_ascii_case(weapon));
    }

    pub fn is_unassigned_farmed(&self, weapon: &str) -> bool {
        self.unassigned_weapons
            .iter()
            .any(|name| name.eq_ignore_ascii_case(weapon))
    }

    // True if any character farms the weapon or it sits in the unassigned
    // set. Being in both sources still counts once.
    pub fn weapon_marked_farmed(&self, weapon: &str) -> bool {
        let via_character = self.characters.values().any(|entry| {
            entry.farming_weapon_status && entry.equipped_weapon.eq_ignore_ascii_case(weapon)
        });
        via_character || self.is_unassigned_farmed(weapon)
    }
}

fn bounded_notes(text: String) -> String {
    if text.chars().count() <= NOTES_CHARACTER_LIMIT {
        text
    } else {
        text.chars().take(NOTES_CHARACTER_LIMIT).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_returns_fresh_entry() {
        let mut store = ListingStore::new();
        assert!(store.get("Albedo").is_none());
        let entry = store.get_or_create("Albedo");
        assert_eq!(entry.character_name, "Albedo");
        assert!(entry.equipped_weapon.is_empty());
        // Same entry on a case-insensitive second reference.
        store.set_notes("ALBEDO", "crystallize bot").unwrap();
        assert_eq!(store.get("albedo").unwrap().notes, "crystallize bot");
        assert_eq!(store.entries().count(), 1);
    }

    #[test]
    fn test_farming_status_requires_selected_item() {
        let mut store = ListingStore::new();
        let err = store
            .set_farming_status("Albedo", FarmingFlag::Weapon, true)
            .unwrap_err();
        assert!(matches!(err, TrackerError::InvalidStateError(_)));
        // The rejected mutation must not have created an entry.
        assert!(store.get("Albedo").is_none());

        store.set_equipped_weapon("Albedo", "Favonius Sword").unwrap();
        assert!(store.can_set_farming_status("Albedo", FarmingFlag::Weapon));
        store.set_farming_status("Albedo", FarmingFlag::Weapon, true).unwrap();
        assert!(store.get("Albedo").unwrap().farming_weapon_status);
    }

    #[test]
    fn test_clearing_weapon_forces_flag_off() {
        let mut store = ListingStore::new();
        store.set_equipped_weapon("Albedo", "Favonius Sword").unwrap();
        store.set_farming_status("Albedo", FarmingFlag::Weapon, true).unwrap();

        store.set_equipped_weapon("Albedo", "").unwrap();
        let entry = store.get("Albedo").unwrap();
        assert!(entry.equipped_weapon.is_empty());
        assert!(!entry.farming_weapon_status);
    }

    #[test]
    fn test_clearing_artifact_set_forces_flag_off() {
        let mut store = ListingStore::new();
        store
            .set_artifact_set("Fischl", ArtifactSlot::Two, "Thundering Fury")
            .unwrap();
        store.set_farming_status("Fischl", FarmingFlag::SetTwo, true).unwrap();

        store.set_artifact_set("Fischl", ArtifactSlot::Two, "").unwrap();
        let entry = store.get("Fischl").unwrap();
        assert!(!entry.farming_set_two_status);
        // The other slot is untouched.
        assert!(!entry.farming_set_one_status);
    }

    #[test]
    fn test_talent_flag_needs_no_equipment() {
        let mut store = ListingStore::new();
        assert!(store.can_set_farming_status("Razor", FarmingFlag::Talent));
        store.set_farming_status("Razor", FarmingFlag::Talent, true).unwrap();
        assert!(store.get("Razor").unwrap().farming_talent_status);
        // Turning a flag off never needs a precondition.
        store.set_farming_status("Razor", FarmingFlag::Talent, false).unwrap();
    }

    #[test]
    fn test_equip_is_idempotent() {
        let mut store = ListingStore::new();
        store.set_equipped_weapon("Albedo", "Favonius Sword").unwrap();
        store.set_farming_status("Albedo", FarmingFlag::Weapon, true).unwrap();
        let before = store.get("Albedo").unwrap().clone();

        store.set_equipped_weapon("Albedo", "Favonius Sword").unwrap();
        assert_eq!(store.get("Albedo").unwrap(), &before);
    }

    #[test]
    fn test_notes_are_truncated_at_the_limit() {
        let mut store = ListingStore::new();
        let long = "x".repeat(NOTES_CHARACTER_LIMIT + 40);
        store.set_notes("Albedo", &long).unwrap();
        assert_eq!(
            store.get("Albedo").unwrap().notes.chars().count(),
            NOTES_CHARACTER_LIMIT
        );

        let short = "crit rate circlet";
        store.set_notes("Albedo", short).unwrap();
        assert_eq!(store.get("Albedo").unwrap().notes, short);
    }

    #[test]
    fn test_unassigned_weapon_set() {
        let mut store = ListingStore::new();
        store.add_unassigned_farmed_weapon("Dull Blade");
        store.add_unassigned_farmed_weapon("dull blade");
        assert_eq!(store.unassigned_farmed_weapons().count(), 1);
        assert!(store.is_unassigned_farmed("DULL BLADE"));

        store.remove_unassigned_farmed_weapon("Dull blade");
        assert!(!store.is_unassigned_farmed("Dull Blade"));
    }

    #[test]
    fn test_weapon_marked_farmed_union() {
        let mut store = ListingStore::new();
        store.set_equipped_weapon("Albedo", "Favonius Sword").unwrap();
        store.set_farming_status("Albedo", FarmingFlag::Weapon, true).unwrap();
        // Listed via both sources at once; still just listed.
        store.add_unassigned_farmed_weapon("Favonius Sword");
        assert!(store.weapon_marked_farmed("Favonius Sword"));

        store.remove_unassigned_farmed_weapon("Favonius Sword");
        assert!(store.weapon_marked_farmed("Favonius Sword"));

        store.set_equipped_weapon("Albedo", "").unwrap();
        assert!(!store.weapon_marked_farmed("Favonius Sword"));
    }

    #[test]
    fn test_equipped_weapon_without_flag_is_not_farmed() {
        let mut store = ListingStore::new();
        store.set_equipped_weapon("Bennett", "Favonius Sword").unwrap();
        assert!(!store.weapon_marked_farmed("Favonius Sword"));
    }
}
