use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponType {
    Sword,
    Claymore,
    Polearm,
    Bow,
    Catalyst,
}

impl WeaponType {
    pub fn token(&self) -> &'static str {
        match self {
            WeaponType::Sword => "Sword",
            WeaponType::Claymore => "Claymore",
            WeaponType::Polearm => "Polearm",
            WeaponType::Bow => "Bow",
            WeaponType::Catalyst => "Catalyst",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "sword" => Some(WeaponType::Sword),
            "claymore" => Some(WeaponType::Claymore),
            "polearm" => Some(WeaponType::Polearm),
            "bow" => Some(WeaponType::Bow),
            "catalyst" => Some(WeaponType::Catalyst),
            _ => None,
        }
    }
}

// Rarities below four stars exist in the data but are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WeaponRarity {
    FiveStar,
    FourStar,
    Other,
}

impl WeaponRarity {
    pub fn token(&self) -> &'static str {
        match self {
            WeaponRarity::FiveStar => "5-Star",
            WeaponRarity::FourStar => "4-Star",
            WeaponRarity::Other => "Other",
        }
    }
}

impl From<String> for WeaponRarity {
    fn from(token: String) -> Self {
        match token.as_str() {
            "5-Star" => WeaponRarity::FiveStar,
            "4-Star" => WeaponRarity::FourStar,
            _ => WeaponRarity::Other,
        }
    }
}

impl From<WeaponRarity> for String {
    fn from(rarity: WeaponRarity) -> Self {
        rarity.token().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub name: String,
    pub weapon_type: WeaponType,
    pub rarity: WeaponRarity,
    pub ascension_material: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_deserialization() {
        let json = r#"{
            "name": "Favonius Sword",
            "weaponType": "Sword",
            "rarity": "4-Star",
            "ascensionMaterial": "Tiles of Decarabian's Tower"
        }"#;

        let weapon: Weapon = serde_json::from_str(json).unwrap();
        assert_eq!(weapon.name, "Favonius Sword");
        assert_eq!(weapon.weapon_type, WeaponType::Sword);
        assert_eq!(weapon.rarity, WeaponRarity::FourStar);
    }

    #[test]
    fn test_unknown_rarity_maps_to_other() {
        let rarity = WeaponRarity::from("1-Star".to_string());
        assert_eq!(rarity, WeaponRarity::Other);
    }
}
