use serde::{Deserialize, Serialize};

// Bound on the free-text notes field. Text beyond the limit is truncated.
pub const NOTES_CHARACTER_LIMIT: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactSlot {
    One,
    Two,
}

// The four per-character checkbox states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FarmingFlag {
    Weapon,
    Talent,
    SetOne,
    SetTwo,
}

impl FarmingFlag {
    pub fn token(&self) -> &'static str {
        match self {
            FarmingFlag::Weapon => "weapon",
            FarmingFlag::Talent => "talent",
            FarmingFlag::SetOne => "set1",
            FarmingFlag::SetTwo => "set2",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "weapon" => Some(FarmingFlag::Weapon),
            "talent" => Some(FarmingFlag::Talent),
            "set1" => Some(FarmingFlag::SetOne),
            "set2" => Some(FarmingFlag::SetTwo),
            _ => None,
        }
    }
}

// A single mutation intent raised by the presentation layer. Every field's
// invariant is enforced in one place, the store dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingUpdate {
    EquipWeapon(String),
    SetArtifactSet(ArtifactSlot, String),
    SetFarmingStatus(FarmingFlag, bool),
    SetNotes(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub character_name: String,
    #[serde(default)]
    pub equipped_weapon: String,
    #[serde(default)]
    pub artifact_set_one: String,
    #[serde(default)]
    pub artifact_set_two: String,
    #[serde(default)]
    pub farming_weapon_status: bool,
    #[serde(default)]
    pub farming_talent_status: bool,
    #[serde(default)]
    pub farming_set_one_status: bool,
    #[serde(default)]
    pub farming_set_two_status: bool,
    #[serde(default)]
    pub notes: String,
}

impl ListingEntry {
    pub fn new(character_name: String) -> Self {
        Self {
            character_name,
            ..Self::default()
        }
    }

    // The item a farming flag depends on. Talent farming depends on the
    // character itself, which is always present.
    pub fn item_for_flag(&self, flag: FarmingFlag) -> &str {
        match flag {
            FarmingFlag::Weapon => &self.equipped_weapon,
            FarmingFlag::Talent => &self.character_name,
            FarmingFlag::SetOne => &self.artifact_set_one,
            FarmingFlag::SetTwo => &self.artifact_set_two,
        }
    }

    pub fn is_farming(&self, flag: FarmingFlag) -> bool {
        match flag {
            FarmingFlag::Weapon => self.farming_weapon_status,
            FarmingFlag::Talent => self.farming_talent_status,
            FarmingFlag::SetOne => self.farming_set_one_status,
            FarmingFlag::SetTwo => self.farming_set_two_status,
        }
    }

    pub fn set_farming(&mut self, flag: FarmingFlag, status: bool) {
        match flag {
            FarmingFlag::Weapon => self.farming_weapon_status = status,
            FarmingFlag::Talent => self.farming_talent_status = status,
            FarmingFlag::SetOne => self.farming_set_one_status = status,
            FarmingFlag::SetTwo => self.farming_set_two_status = status,
        }
    }

    pub fn artifact_set(&self, slot: ArtifactSlot) -> &str {
        match slot {
            ArtifactSlot::One => &self.artifact_set_one,
            ArtifactSlot::Two => &self.artifact_set_two,
        }
    }
}
