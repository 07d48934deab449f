use serde::{Deserialize, Serialize};

use super::weapon::WeaponType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Anemo,
    Cryo,
    Dendro,
    Electro,
    Geo,
    Hydro,
    Pyro,
}

impl Element {
    pub fn token(&self) -> &'static str {
        match self {
            Element::Anemo => "Anemo",
            Element::Cryo => "Cryo",
            Element::Dendro => "Dendro",
            Element::Electro => "Electro",
            Element::Geo => "Geo",
            Element::Hydro => "Hydro",
            Element::Pyro => "Pyro",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "anemo" => Some(Element::Anemo),
            "cryo" => Some(Element::Cryo),
            "dendro" => Some(Element::Dendro),
            "electro" => Some(Element::Electro),
            "geo" => Some(Element::Geo),
            "hydro" => Some(Element::Hydro),
            "pyro" => Some(Element::Pyro),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    pub element: Element,
    pub weapon_type: WeaponType,
    pub talent_material: String,
    pub weekly_talent_material: String,
}
