use serde::{Deserialize, Serialize};
use crate::models::{non_empty, Coordinate, ResolvedAddress};

/// How precise a resolved address is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specificity {
    Exact,
    Street,
    Neighborhood,
    County,
    City,
}

impl Specificity {
    /// Proximity search radius in meters
    pub fn search_radius_m(self) -> f64 {
        match self {
            Specificity::Exact => 100.0,
            Specificity::Street => 500.0,
            Specificity::Neighborhood => 2_000.0,
            Specificity::County => 10_000.0,
            Specificity::City => 5_000.0,
        }
    }
}

/// Locational search criteria in listing-schema terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub county: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub coordinates: Coordinate,
    pub radius_m: f64,
    pub specificity: Specificity,
}

/// Classify a resolved address and build search criteria from it.
///
/// First matching rule wins:
/// 1. street number and route -> `exact`
/// 2. route -> `street`
/// 3. locality -> `neighborhood`
/// 4. county -> `county`
/// 5. otherwise `city`
///
/// Blank component values count as absent.
pub fn derive_criteria(address: &ResolvedAddress) -> SearchCriteria {
    let part = |value: &Option<String>| non_empty(value.as_deref()).map(str::to_string);

    let street_number = part(&address.street_number);
    let street_name = part(&address.route);
    let city = part(&address.locality);
    let county = part(&address.admin_level_2);

    let specificity = if street_number.is_some() && street_name.is_some() {
        Specificity::Exact
    } else if street_name.is_some() {
        Specificity::Street
    } else if city.is_some() {
        Specificity::Neighborhood
    } else if county.is_some() {
        Specificity::County
    } else {
        Specificity::City
    };

    SearchCriteria {
        street_number,
        street_name,
        city,
        state: part(&address.admin_level_1),
        county,
        postal_code: part(&address.postal_code),
        country: part(&address.country),
        coordinates: address.coordinates,
        radius_m: specificity.search_radius_m(),
        specificity,
    }
}
