pub mod aggregator;
pub mod catalog;
pub mod errors;
pub mod index;
pub mod listing;
pub mod models;
pub mod storage;

pub use aggregator::{Aggregator, DomainOverview, MaterialOverview, SearchFlag};
pub use catalog::{Catalog, CatalogSources};
pub use errors::{Result, TrackerError};
pub use index::DomainIndex;
pub use listing::ListingStore;
pub use storage::SaveFile;
