use serde::{Deserialize, Serialize};
use std::fmt;

/// WGS84 coordinate as returned by the geocoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Listing coordinate pair (`coordinates_gp` in listing records)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Identifier that may arrive as a JSON number, a string, or a Mongo
/// extended-JSON `{"$numberLong": "..."}` wrapper.
///
/// Comparison always goes through [`RecordId::as_key`], so `949963` and
/// `"949963"` are the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Extended {
        #[serde(rename = "$numberLong")]
        number_long: String,
    },
    Number(serde_json::Number),
    Text(String),
}

impl RecordId {
    /// String form used for every id comparison
    pub fn as_key(&self) -> String {
        match self {
            RecordId::Extended { number_long } => number_long.clone(),
            RecordId::Text(text) => text.clone(),
            RecordId::Number(number) => {
                if let Some(n) = number.as_i64() {
                    n.to_string()
                } else if let Some(n) = number.as_u64() {
                    n.to_string()
                } else {
                    match number.as_f64() {
                        // 949963.0 must key the same as 949963
                        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => (f as i64).to_string(),
                        _ => number.to_string(),
                    }
                }
            }
        }
    }
}

/// Decode any [`RecordId`] form straight into its key
pub fn deserialize_record_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    RecordId::deserialize(deserializer).map(|id| id.as_key())
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value.into())
    }
}

/// A listing's membership in one boundary category.
///
/// Well-formed records carry a list of ids. Anything else is kept verbatim as
/// `Malformed` so the record still loads, and membership checks against it
/// always fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundaryMembership {
    Ids(Vec<RecordId>),
    Malformed(serde_json::Value),
}

impl Default for BoundaryMembership {
    fn default() -> Self {
        BoundaryMembership::Ids(Vec::new())
    }
}

impl BoundaryMembership {
    pub fn ids(&self) -> Option<&[RecordId]> {
        match self {
            BoundaryMembership::Ids(ids) => Some(ids),
            BoundaryMembership::Malformed(_) => None,
        }
    }

    /// String keys of every member id; empty for malformed data
    pub fn keys(&self) -> Vec<String> {
        self.ids()
            .map(|ids| ids.iter().map(RecordId::as_key).collect())
            .unwrap_or_default()
    }
}

impl From<Vec<RecordId>> for BoundaryMembership {
    fn from(ids: Vec<RecordId>) -> Self {
        BoundaryMembership::Ids(ids)
    }
}

/// Administrative categories a listing records membership for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoCategory {
    City,
    County,
    PostalCode,
    State,
}

/// Boundary membership block of a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingGeo {
    #[serde(default)]
    pub city: BoundaryMembership,
    #[serde(default)]
    pub county: BoundaryMembership,
    #[serde(default)]
    pub postal_code: BoundaryMembership,
    #[serde(default)]
    pub state: BoundaryMembership,
    #[serde(default)]
    pub neighborhood: BoundaryMembership,
    /// Union of every boundary id the listing belongs to
    #[serde(default)]
    pub boundary_agg: BoundaryMembership,
    /// Remaining geo keys (mcd, school districts, property ids), kept as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ListingGeo {
    pub fn membership(&self, category: GeoCategory) -> &BoundaryMembership {
        match category {
            GeoCategory::City => &self.city,
            GeoCategory::County => &self.county,
            GeoCategory::PostalCode => &self.postal_code,
            GeoCategory::State => &self.state,
        }
    }
}

/// Street address block of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListAddress {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub full_street_address: Option<String>,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub street_suffix: Option<String>,
    #[serde(default)]
    pub unit_number: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_prov: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub coordinates_gp: Coordinates,
}

/// Real-estate listing record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub list_id: RecordId,
    #[serde(default)]
    pub mls_number: Option<String>,
    #[serde(default)]
    pub list_status: Option<String>,
    #[serde(default)]
    pub list_type: Option<String>,
    #[serde(default)]
    pub prop_type: Option<String>,
    #[serde(default)]
    pub total_bed: Option<f64>,
    #[serde(default)]
    pub total_bath: Option<f64>,
    #[serde(default)]
    pub living_area: Option<f64>,
    #[serde(default)]
    pub current_list_price: Option<f64>,
    pub list_address: ListAddress,
    #[serde(default)]
    pub geo: ListingGeo,
}

/// Boundary category; unknown codes are kept as `Other`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryCategory {
    #[serde(rename = "CITY")]
    City,
    #[serde(rename = "COUNTY")]
    County,
    #[serde(rename = "STATE")]
    State,
    #[serde(rename = "POSTALCODE")]
    PostalCode,
    #[serde(rename = "NEIGHBORHOOD")]
    Neighborhood,
    #[serde(untagged)]
    Other(String),
}

impl BoundaryCategory {
    pub fn as_str(&self) -> &str {
        match self {
            BoundaryCategory::City => "CITY",
            BoundaryCategory::County => "COUNTY",
            BoundaryCategory::State => "STATE",
            BoundaryCategory::PostalCode => "POSTALCODE",
            BoundaryCategory::Neighborhood => "NEIGHBORHOOD",
            BoundaryCategory::Other(code) => code,
        }
    }
}

impl fmt::Display for BoundaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrative boundary record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    #[serde(rename = "_id", deserialize_with = "deserialize_record_key")]
    pub id: String,
    pub category: BoundaryCategory,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(rename = "stateShort", default)]
    pub state_short: Option<String>,
    #[serde(default)]
    pub country: String,
    /// Human label; postal code boundaries embed the code here
    #[serde(default)]
    pub display: String,
    /// Polygon geometry and centroid, carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<serde_json::Value>,
}

/// Compact boundary view returned by lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryLookup {
    pub id: String,
    pub category: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub county: Option<String>,
    pub display: String,
}

impl From<&Boundary> for BoundaryLookup {
    fn from(boundary: &Boundary) -> Self {
        Self {
            id: boundary.id.clone(),
            category: boundary.category.to_string(),
            city: boundary.city.clone(),
            state: boundary.state.clone(),
            county: boundary.county.clone(),
            display: boundary.display.clone(),
        }
    }
}

/// Boundary ids matching a resolved address, per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryIds {
    pub city_ids: Vec<String>,
    pub county_ids: Vec<String>,
    pub postal_ids: Vec<String>,
    pub state_ids: Vec<String>,
}

/// Accepted listing with its distance and composite score
#[derive(Debug, Clone, Copy)]
pub struct ScoredListing<'a> {
    pub listing: &'a Listing,
    pub distance_m: f64,
    pub score: f64,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub distance: f64,
    pub street_number: f64,
    pub street_name: f64,
    pub city: f64,
    pub county: f64,
    pub postal: f64,
    pub state: f64,
    pub country: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        use crate::core::scoring::{
            CITY_WEIGHT, COUNTRY_WEIGHT, COUNTY_WEIGHT, DISTANCE_WEIGHT, POSTAL_WEIGHT,
            STATE_WEIGHT, STREET_NAME_WEIGHT, STREET_NUMBER_WEIGHT,
        };

        Self {
            distance: DISTANCE_WEIGHT,
            street_number: STREET_NUMBER_WEIGHT,
            street_name: STREET_NAME_WEIGHT,
            city: CITY_WEIGHT,
            county: COUNTY_WEIGHT,
            postal: POSTAL_WEIGHT,
            state: STATE_WEIGHT,
            country: COUNTRY_WEIGHT,
        }
    }
}
