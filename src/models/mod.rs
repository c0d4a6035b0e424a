// Model exports
pub mod domain;
pub mod geocoding;
pub mod requests;
pub mod responses;

pub use domain::{
    Boundary, BoundaryCategory, BoundaryIds, BoundaryLookup, BoundaryMembership, Coordinate,
    Coordinates, GeoCategory, ListAddress, Listing, ListingGeo, RecordId, ScoredListing,
    ScoringWeights,
};
pub use geocoding::{non_empty, AddressComponent, ComponentType, GeocodeResponse, GeocodeResult, ResolvedAddress};
pub use requests::SearchListingsRequest;
pub use responses::{ErrorResponse, HealthResponse, ListingSearchResult, ReloadResponse, SearchResponse};
