// Core algorithm exports
pub mod boundaries;
pub mod criteria;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use boundaries::BoundaryIndex;
pub use criteria::{derive_criteria, SearchCriteria, Specificity};
pub use distance::haversine_distance;
pub use filters::{listing_has_boundary_id, membership_intersects};
pub use matcher::{compare_ranked, sort_ranked, MatchResult, Matcher};
pub use scoring::{evaluate_listing, minimum_score};
