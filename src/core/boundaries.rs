use std::collections::HashMap;
use crate::core::filters::eq_ignore_case;
use crate::models::{non_empty, Boundary, BoundaryCategory, BoundaryIds, BoundaryLookup, Listing, ResolvedAddress};

/// Immutable in-memory index of administrative boundaries keyed by id
///
/// Built once from a snapshot. Iteration follows load order; a duplicate id
/// keeps its first position and takes the last record (last-write-wins).
#[derive(Debug, Clone, Default)]
pub struct BoundaryIndex {
    boundaries: Vec<Boundary>,
    positions: HashMap<String, usize>,
}

impl BoundaryIndex {
    pub fn new(records: Vec<Boundary>) -> Self {
        let mut boundaries: Vec<Boundary> = Vec::with_capacity(records.len());
        let mut positions = HashMap::with_capacity(records.len());

        for boundary in records {
            match positions.get(&boundary.id).copied() {
                Some(position) => boundaries[position] = boundary,
                None => {
                    positions.insert(boundary.id.clone(), boundaries.len());
                    boundaries.push(boundary);
                }
            }
        }

        Self { boundaries, positions }
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Find boundary ids matching the resolved address, per category
    ///
    /// A boundary from another country is skipped before any category test.
    /// Category alone decides which list a boundary can land in. Blank
    /// address components match nothing.
    pub fn find_boundary_ids(&self, address: &ResolvedAddress) -> BoundaryIds {
        let mut result = BoundaryIds::default();

        for boundary in &self.boundaries {
            let id = &boundary.id;
            if let Some(country) = non_empty(address.country.as_deref()) {
                if boundary.country != country {
                    continue;
                }
            }

            match boundary.category {
                BoundaryCategory::City => {
                    if matches_name(non_empty(address.locality.as_deref()), boundary.city.as_deref()) {
                        result.city_ids.push(id.clone());
                    }
                }
                BoundaryCategory::County => {
                    if matches_name(non_empty(address.admin_level_2.as_deref()), boundary.county.as_deref()) {
                        result.county_ids.push(id.clone());
                    }
                }
                BoundaryCategory::PostalCode => {
                    if let Some(postal_code) = non_empty(address.postal_code.as_deref()) {
                        if boundary.display.contains(postal_code) {
                            result.postal_ids.push(id.clone());
                        }
                    }
                }
                BoundaryCategory::State => {
                    if let Some(state) = non_empty(address.admin_level_1.as_deref()) {
                        let short_match = boundary.state_short.as_deref() == Some(state);
                        if short_match || matches_name(Some(state), boundary.state.as_deref()) {
                            result.state_ids.push(id.clone());
                        }
                    }
                }
                BoundaryCategory::Neighborhood | BoundaryCategory::Other(_) => {}
            }
        }

        tracing::debug!(
            "Boundary ids: {} city, {} county, {} postal, {} state",
            result.city_ids.len(),
            result.county_ids.len(),
            result.postal_ids.len(),
            result.state_ids.len()
        );

        result
    }

    /// Direct keyed read
    pub fn lookup(&self, id: &str) -> Option<BoundaryLookup> {
        self.get(id).map(BoundaryLookup::from)
    }

    pub fn get(&self, id: &str) -> Option<&Boundary> {
        self.positions.get(id).map(|&position| &self.boundaries[position])
    }

    /// Resolve every id in the listing's `boundary_agg`, skipping unknown ids
    pub fn listing_boundaries(&self, listing: &Listing) -> Vec<BoundaryLookup> {
        listing
            .geo
            .boundary_agg
            .keys()
            .iter()
            .filter_map(|id| self.lookup(id))
            .collect()
    }
}

#[inline]
fn matches_name(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match (wanted, actual) {
        (Some(wanted), Some(actual)) => eq_ignore_case(wanted, actual),
        _ => false,
    }
}
