use serde::{Deserialize, Serialize};
use crate::core::criteria::Specificity;
use crate::models::domain::{BoundaryIds, Coordinates, Listing, ListingGeo};

/// Public projection of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSearchResult {
    pub list_id: String,
    pub mls_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub coordinates: Coordinates,
    pub list_status: Option<String>,
    pub prop_type: Option<String>,
    pub total_bed: Option<f64>,
    pub total_bath: Option<f64>,
    pub living_area: Option<f64>,
    pub current_list_price: Option<f64>,
    pub geo: ListingGeo,
}

impl From<&Listing> for ListingSearchResult {
    fn from(listing: &Listing) -> Self {
        let address = &listing.list_address;
        Self {
            list_id: listing.list_id.as_key(),
            mls_number: listing.mls_number.clone(),
            address: address.address.clone(),
            city: address.city.clone(),
            state: address.state_prov.clone(),
            postal_code: address.postal_code.clone(),
            coordinates: address.coordinates_gp,
            list_status: listing.list_status.clone(),
            prop_type: listing.prop_type.clone(),
            total_bed: listing.total_bed,
            total_bath: listing.total_bath,
            living_area: listing.living_area,
            current_list_price: listing.current_list_price,
            geo: listing.geo.clone(),
        }
    }
}

/// Response for the listing search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub formatted_address: String,
    pub specificity: Specificity,
    pub radius_m: f64,
    pub boundary_ids: BoundaryIds,
    pub results: Vec<ListingSearchResult>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub listings: usize,
    pub boundaries: usize,
}

/// Response for the data reload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub listings: usize,
    pub boundaries: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
