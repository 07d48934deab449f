pub mod character;
pub mod domain;
pub mod listing;
pub mod material;
pub mod weapon;

pub use character::{
    Character,
    Element,
};

pub use weapon::{
    Weapon,
    WeaponRarity,
    WeaponType,
};

pub use material::{
    ConsumerKind,
    FarmableMaterial,
    MaterialKind,
};

pub use domain::Domain;

pub use listing::{
    ArtifactSlot,
    FarmingFlag,
    ListingEntry,
    ListingUpdate,
    NOTES_CHARACTER_LIMIT,
};
