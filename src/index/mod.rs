use crate::catalog::Catalog;
use crate::errors::{Result, TrackerError};
use crate::listing::ListingStore;
use crate::models::{ArtifactSlot, ConsumerKind, Domain, FarmableMaterial, MaterialKind};

// Answers "who needs this material" for a given domain. Read-only view over
// the catalog; listing-aware queries take the store as an argument.
#[derive(Debug)]
pub struct DomainIndex<'a> {
    catalog: &'a Catalog,
}

impl<'a> DomainIndex<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    // Static consumers: the material's used_by set filtered to the side the
    // domain targets (weapons for weapon-material domains, characters
    // otherwise). Artifact sets have no static consumers.
    pub fn consumers_of(&self, domain_name: &str, material_name: &str) -> Result<Vec<String>> {
        let domain = self.catalog.domain(domain_name)?;
        let material = self.dropped_material(domain, material_name)?;
        let consumers = material
            .used_by
            .iter()
            .filter(|name| match domain.target() {
                ConsumerKind::Weapons => self.catalog.is_weapon(name),
                ConsumerKind::Characters => self.catalog.is_character(name),
            })
            .cloned()
            .collect();
        Ok(consumers)
    }

    // Partitions consumers into (listed, unlisted), both name-sorted.
    // Artifact set consumers are dynamic: every character currently equipping
    // the set counts, listed when the matching slot's flag is raised.
    pub fn listed_consumers(
        &self,
        domain_name: &str,
        material_name: &str,
        store: &ListingStore,
    ) -> Result<(Vec<String>, Vec<String>)> {
        let domain = self.catalog.domain(domain_name)?;
        let material = self.dropped_material(domain, material_name)?;

        if material.kind == MaterialKind::ArtifactSet {
            return Ok(partition_set_consumers(store, &material.name));
        }

        let mut listed = Vec::new();
        let mut unlisted = Vec::new();
        for consumer in self.consumers_of(domain_name, material_name)? {
            let is_listed = match material.kind {
                MaterialKind::WeaponMaterial => store.weapon_marked_farmed(&consumer),
                _ => store
                    .get(&consumer)
                    .map(|entry| entry.farming_talent_status)
                    .unwrap_or(false),
            };
            if is_listed {
                listed.push(consumer);
            } else {
                unlisted.push(consumer);
            }
        }
        Ok((listed, unlisted))
    }

    fn dropped_material(&self, domain: &Domain, material_name: &str) -> Result<&FarmableMaterial> {
        let material = self.catalog.material(material_name)?;
        let dropped = domain
            .materials
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&material.name));
        if !dropped {
            return Err(TrackerError::NotFoundError(format!(
                "{} does not drop {}",
                domain.name, material.name
            )));
        }
        Ok(material)
    }
}

fn partition_set_consumers(store: &ListingStore, set_name: &str) -> (Vec<String>, Vec<String>) {
    let mut listed = Vec::new();
    let mut unlisted = Vec::new();
    for entry in store.entries() {
        let slots = [
            (ArtifactSlot::One, entry.farming_set_one_status),
            (ArtifactSlot::Two, entry.farming_set_two_status),
        ];
        let equipped = slots
            .iter()
            .filter(|(slot, _)| entry.artifact_set(*slot).eq_ignore_ascii_case(set_name))
            .collect::<Vec<_>>();
        if equipped.is_empty() {
            continue;
        }
        if equipped.iter().any(|(_, farming)| *farming) {
            listed.push(entry.character_name.clone());
        } else {
            unlisted.push(entry.character_name.clone());
        }
    }
    listed.sort();
    unlisted.sort();
    (listed, unlisted)
}
