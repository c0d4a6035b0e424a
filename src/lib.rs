//! Listing Locator - address-driven real estate listing search
//!
//! Resolves a free-text address through a geocoder, derives search criteria
//! whose radius depends on how specific the address is, and ranks listings by
//! distance, field agreement and administrative-boundary membership.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{derive_criteria, haversine_distance, BoundaryIndex, Matcher, SearchCriteria, Specificity};
pub use self::models::{Boundary, BoundaryLookup, Listing, ListingSearchResult, ResolvedAddress, ScoringWeights};
pub use self::services::{AddressResolver, ListingSearchService, SearchError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(Specificity::Exact.search_radius_m(), 100.0);
        assert!(haversine_distance(30.0, -97.0, 30.0, -97.0) < 0.01);
    }
}
