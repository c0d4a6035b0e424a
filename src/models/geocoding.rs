use serde::{Deserialize, Serialize};
use crate::models::domain::Coordinate;

/// Structured address produced by one geocoder resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub street_number: Option<String>,
    /// Street name
    pub route: Option<String>,
    /// City
    pub locality: Option<String>,
    /// State, abbreviated
    pub admin_level_1: Option<String>,
    /// County, full name
    pub admin_level_2: Option<String>,
    pub postal_code: Option<String>,
    /// ISO short country code
    pub country: Option<String>,
    pub formatted_address: String,
    pub coordinates: Coordinate,
    #[serde(default)]
    pub place_id: Option<String>,
}

/// Geocoding API response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub formatted_address: String,
    pub geometry: GeocodeGeometry,
    #[serde(default)]
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeGeometry {
    pub location: Coordinate,
    #[serde(default)]
    pub location_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<ComponentType>,
}

/// Address component types the resolver understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    StreetNumber,
    Route,
    Locality,
    #[serde(rename = "administrative_area_level_1")]
    AdministrativeAreaLevel1,
    #[serde(rename = "administrative_area_level_2")]
    AdministrativeAreaLevel2,
    PostalCode,
    Country,
    #[serde(other)]
    Other,
}

impl AddressComponent {
    pub fn has_type(&self, kind: ComponentType) -> bool {
        self.types.contains(&kind)
    }
}

/// Empty or whitespace-only component values count as absent
#[inline]
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn component_value(name: &str) -> Option<String> {
    non_empty(Some(name)).map(str::to_string)
}

impl From<&GeocodeResult> for ResolvedAddress {
    /// Later components override earlier ones of the same type.
    fn from(result: &GeocodeResult) -> Self {
        let mut address = ResolvedAddress {
            formatted_address: result.formatted_address.clone(),
            coordinates: result.geometry.location,
            place_id: result.place_id.clone(),
            ..Default::default()
        };

        for component in &result.address_components {
            if component.has_type(ComponentType::StreetNumber) {
                address.street_number = component_value(&component.long_name);
            }
            if component.has_type(ComponentType::Route) {
                address.route = component_value(&component.long_name);
            }
            if component.has_type(ComponentType::Locality) {
                address.locality = component_value(&component.long_name);
            }
            if component.has_type(ComponentType::AdministrativeAreaLevel1) {
                address.admin_level_1 = component_value(&component.short_name);
            }
            if component.has_type(ComponentType::AdministrativeAreaLevel2) {
                address.admin_level_2 = component_value(&component.long_name);
            }
            if component.has_type(ComponentType::PostalCode) {
                address.postal_code = component_value(&component.long_name);
            }
            if component.has_type(ComponentType::Country) {
                address.country = component_value(&component.short_name);
            }
        }

        address
    }
}
