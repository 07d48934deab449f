use serde::{Deserialize, Serialize};

use super::material::{ConsumerKind, MaterialKind};

// A farmable location. The domain's kind doubles as the kind of every
// material it drops, which is how the material registry gets built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    pub materials: Vec<String>,
}

impl Domain {
    pub fn target(&self) -> ConsumerKind {
        self.kind.target()
    }

    pub fn is_artifact_domain(&self) -> bool {
        self.kind == MaterialKind::ArtifactSet
    }

    pub fn is_weapon_material_domain(&self) -> bool {
        self.kind == MaterialKind::WeaponMaterial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_deserialization() {
        let json = r#"{
            "name": "Cecilia Garden",
            "type": "Weapon Material",
            "materials": ["Tiles of Decarabian's Tower", "Fangs of the Boreal Wolf"]
        }"#;

        let domain: Domain = serde_json::from_str(json).unwrap();
        assert_eq!(domain.name, "Cecilia Garden");
        assert_eq!(domain.kind, MaterialKind::WeaponMaterial);
        assert_eq!(domain.materials.len(), 2);
        assert!(domain.is_weapon_material_domain());
        assert!(!domain.is_artifact_domain());
        assert_eq!(domain.target(), ConsumerKind::Weapons);
    }
}
