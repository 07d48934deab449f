use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::errors::Result;
use crate::index::DomainIndex;
use crate::listing::ListingStore;
use crate::models::{MaterialKind, Weapon, WeaponType};

// Weapon search toggles from the weapon tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFlag {
    All,
    ListedOnly,
    UnlistedOnly,
}

#[derive(Debug, Clone)]
pub struct MaterialOverview {
    pub material: String,
    pub listed: Vec<String>,
    pub unlisted: Vec<String>,
}

// Everything a domain card shows: per-material partitions plus the
// "Listed: N" / "Total: M" counters.
#[derive(Debug, Clone)]
pub struct DomainOverview {
    pub domain: String,
    pub kind: MaterialKind,
    pub materials: Vec<MaterialOverview>,
    pub listed_count: usize,
    pub total_count: usize,
}

// Cross-cutting views over catalog and listings. All queries are pure
// recomputation; the data set is small enough that no cache is warranted.
#[derive(Debug)]
pub struct Aggregator<'a> {
    catalog: &'a Catalog,
    index: DomainIndex<'a>,
}

impl<'a> Aggregator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            index: DomainIndex::new(catalog),
        }
    }

    pub fn is_weapon_listed(&self, store: &ListingStore, weapon: &str) -> bool {
        store.weapon_marked_farmed(weapon)
    }

    // Distinct listed consumers across all of the domain's materials.
    pub fn count_listed(&self, store: &ListingStore, domain_name: &str) -> Result<usize> {
        let (listed, _) = self.distinct_consumers(store, domain_name)?;
        Ok(listed.len())
    }

    // Distinct consumers across all of the domain's materials, listed or not.
    pub fn count_total(&self, store: &ListingStore, domain_name: &str) -> Result<usize> {
        let (_, total) = self.distinct_consumers(store, domain_name)?;
        Ok(total.len())
    }

    pub fn domain_overview(&self, store: &ListingStore, domain_name: &str) -> Result<DomainOverview> {
        let domain = self.catalog.domain(domain_name)?;
        let mut materials = Vec::new();
        for material in &domain.materials {
            let (listed, unlisted) = self.index.listed_consumers(&domain.name, material, store)?;
            materials.push(MaterialOverview {
                material: material.clone(),
                listed,
                unlisted,
            });
        }
        let (listed, total) = self.distinct_consumers(store, &domain.name)?;
        Ok(DomainOverview {
            domain: domain.name.clone(),
            kind: domain.kind,
            materials,
            listed_count: listed.len(),
            total_count: total.len(),
        })
    }

    pub fn find_weapons(
        &self,
        store: &ListingStore,
        query: &str,
        weapon_type: Option<WeaponType>,
        flag: SearchFlag,
    ) -> Vec<&Weapon> {
        self.catalog
            .find_weapons(query, weapon_type)
            .into_iter()
            .filter(|weapon| match flag {
                SearchFlag::All => true,
                SearchFlag::ListedOnly => self.is_weapon_listed(store, &weapon.name),
                SearchFlag::UnlistedOnly => !self.is_weapon_listed(store, &weapon.name),
            })
            .collect()
    }

    fn distinct_consumers(
        &self,
        store: &ListingStore,
        domain_name: &str,
    ) -> Result<(BTreeSet<String>, BTreeSet<String>)> {
        let domain = self.catalog.domain(domain_name)?;
        let mut listed_set = BTreeSet::new();
        let mut total_set = BTreeSet::new();
        for material in &domain.materials {
            let (listed, unlisted) = self.index.listed_consumers(&domain.name, material, store)?;
            for name in &listed {
                listed_set.insert(name.to_lowercase());
                total_set.insert(name.to_lowercase());
            }
            for name in &unlisted {
                total_set.insert(name.to_lowercase());
            }
        }
        Ok((listed_set, total_set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_fixtures::sample_catalog;
    use crate::models::{ArtifactSlot, FarmingFlag};

    #[test]
    fn test_weapon_listed_via_character() {
        let catalog = sample_catalog();
        let aggregator = Aggregator::new(&catalog);
        let mut store = ListingStore::new();

        store.set_equipped_weapon("Albedo", "Favonius Sword").unwrap();
        store.set_farming_status("Albedo", FarmingFlag::Weapon, true).unwrap();
        assert!(aggregator.is_weapon_listed(&store, "Favonius Sword"));
    }

    #[test]
    fn test_unequipping_delists_the_weapon() {
        let catalog = sample_catalog();
        let aggregator = Aggregator::new(&catalog);
        let mut store = ListingStore::new();

        store.set_equipped_weapon("Albedo", "Favonius Sword").unwrap();
        store.set_farming_status("Albedo", FarmingFlag::Weapon, true).unwrap();
        store.set_equipped_weapon("Albedo", "").unwrap();

        assert!(!store.get("Albedo").unwrap().farming_weapon_status);
        assert!(!aggregator.is_weapon_listed(&store, "Favonius Sword"));
    }

    #[test]
    fn test_weapon_listed_via_unassigned_set() {
        let catalog = sample_catalog();
        let aggregator = Aggregator::new(&catalog);
        let mut store = ListingStore::new();

        store.add_unassigned_farmed_weapon("Dull Blade");
        assert!(aggregator.is_weapon_listed(&store, "Dull Blade"));

        store.remove_unassigned_farmed_weapon("Dull Blade");
        assert!(!aggregator.is_weapon_listed(&store, "Dull Blade"));
    }

    #[test]
    fn test_domain_counters() {
        let catalog = sample_catalog();
        let aggregator = Aggregator::new(&catalog);
        let mut store = ListingStore::new();

        // Ballad: Albedo, Fischl. Resistance: Bennett, Razor.
        assert_eq!(aggregator.count_total(&store, "Forsaken Rift").unwrap(), 4);
        assert_eq!(aggregator.count_listed(&store, "Forsaken Rift").unwrap(), 0);

        store.set_farming_status("Albedo", FarmingFlag::Talent, true).unwrap();
        store.set_farming_status("Razor", FarmingFlag::Talent, true).unwrap();
        assert_eq!(aggregator.count_listed(&store, "Forsaken Rift").unwrap(), 2);
        assert!(
            aggregator.count_listed(&store, "Forsaken Rift").unwrap()
                <= aggregator.count_total(&store, "Forsaken Rift").unwrap()
        );
    }

    #[test]
    fn test_counters_do_not_double_count_across_materials() {
        let catalog = sample_catalog();
        let aggregator = Aggregator::new(&catalog);
        let mut store = ListingStore::new();

        // Both slots point at sets dropped by the same domain; the
        // character still counts once.
        store
            .set_artifact_set("Fischl", ArtifactSlot::One, "Thundering Fury")
            .unwrap();
        store
            .set_artifact_set("Fischl", ArtifactSlot::Two, "Thundersoother")
            .unwrap();
        store.set_farming_status("Fischl", FarmingFlag::SetOne, true).unwrap();

        assert_eq!(aggregator.count_total(&store, "Midsummer Courtyard").unwrap(), 1);
        assert_eq!(aggregator.count_listed(&store, "Midsummer Courtyard").unwrap(), 1);
    }

    #[test]
    fn test_domain_overview_partitions() {
        let catalog = sample_catalog();
        let aggregator = Aggregator::new(&catalog);
        let mut store = ListingStore::new();
        store.set_farming_status("Fischl", FarmingFlag::Talent, true).unwrap();

        let overview = aggregator.domain_overview(&store, "Forsaken Rift").unwrap();
        assert_eq!(overview.kind, MaterialKind::TalentBook);
        assert_eq!(overview.materials.len(), 2);
        let ballad = &overview.materials[0];
        assert_eq!(ballad.material, "Ballad");
        assert_eq!(ballad.listed, vec!["Fischl"]);
        assert_eq!(ballad.unlisted, vec!["Albedo"]);
        assert_eq!(overview.listed_count, 1);
        assert_eq!(overview.total_count, 4);
    }

    #[test]
    fn test_artifact_domain_overview_uses_listings() {
        let catalog = sample_catalog();
        let aggregator = Aggregator::new(&catalog);
        let mut store = ListingStore::new();
        store
            .set_artifact_set("Fischl", ArtifactSlot::One, "Thundering Fury")
            .unwrap();
        store.set_farming_status("Fischl", FarmingFlag::SetOne, true).unwrap();

        let overview = aggregator.domain_overview(&store, "Midsummer Courtyard").unwrap();
        assert_eq!(overview.listed_count, 1);
        assert_eq!(overview.total_count, 1);
    }

    #[test]
    fn test_find_weapons_search_flags() {
        let catalog = sample_catalog();
        let aggregator = Aggregator::new(&catalog);
        let mut store = ListingStore::new();
        store.add_unassigned_farmed_weapon("Rust");

        let all = aggregator.find_weapons(&store, "", None, SearchFlag::All);
        assert_eq!(all.len(), 4);

        let listed = aggregator.find_weapons(&store, "", None, SearchFlag::ListedOnly);
        let names: Vec<_> = listed.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Rust"]);

        let unlisted_swords =
            aggregator.find_weapons(&store, "", Some(WeaponType::Sword), SearchFlag::UnlistedOnly);
        let names: Vec<_> = unlisted_swords.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["Dull Blade", "Favonius Sword"]);
    }
}
