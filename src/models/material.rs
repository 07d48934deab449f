use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// Which side of the catalog consumes a material of this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerKind {
    Characters,
    Weapons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialKind {
    #[serde(rename = "Weapon Material")]
    WeaponMaterial,
    #[serde(rename = "Talent Book")]
    TalentBook,
    #[serde(rename = "Weekly Boss Material")]
    WeeklyBossMaterial,
    #[serde(rename = "Artifact")]
    ArtifactSet,
}

impl MaterialKind {
    pub fn token(&self) -> &'static str {
        match self {
            MaterialKind::WeaponMaterial => "Weapon Material",
            MaterialKind::TalentBook => "Talent Book",
            MaterialKind::WeeklyBossMaterial => "Weekly Boss Material",
            MaterialKind::ArtifactSet => "Artifact",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "weapon material" => Some(MaterialKind::WeaponMaterial),
            "talent book" => Some(MaterialKind::TalentBook),
            "weekly boss material" => Some(MaterialKind::WeeklyBossMaterial),
            "artifact" => Some(MaterialKind::ArtifactSet),
            _ => None,
        }
    }

    pub fn target(&self) -> ConsumerKind {
        match self {
            MaterialKind::WeaponMaterial => ConsumerKind::Weapons,
            MaterialKind::TalentBook
            | MaterialKind::WeeklyBossMaterial
            | MaterialKind::ArtifactSet => ConsumerKind::Characters,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmableMaterial {
    pub name: String,
    pub kind: MaterialKind,
    // Consumer names, populated once during catalog load. Ordered for
    // deterministic output.
    pub used_by: BTreeSet<String>,
}

impl FarmableMaterial {
    pub fn new(name: String, kind: MaterialKind) -> Self {
        Self {
            name,
            kind,
            used_by: BTreeSet::new(),
        }
    }
}
