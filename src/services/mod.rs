// Service exports
pub mod cache;
pub mod geocoder;
pub mod loader;
pub mod search;

pub use cache::CachedResolver;
pub use geocoder::{AddressResolver, GeocodeError, GoogleGeocoder};
pub use loader::{load_boundaries, load_listings, LoadError};
pub use search::{DataSnapshot, ListingSearchService, SearchError, SearchOutcome};
