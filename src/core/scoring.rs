use crate::core::{
    criteria::{SearchCriteria, Specificity},
    distance::haversine_distance,
    filters::{field_matches, listing_has_boundary_id, matches_street_name, matches_street_number},
};
use crate::models::{BoundaryIds, GeoCategory, Listing, ScoringWeights};

// Score weights
pub const DISTANCE_WEIGHT: f64 = 2.0;
pub const STREET_NUMBER_WEIGHT: f64 = 2.0;
pub const STREET_NAME_WEIGHT: f64 = 2.0;
pub const CITY_WEIGHT: f64 = 1.0;
pub const COUNTY_WEIGHT: f64 = 0.5;
pub const POSTAL_WEIGHT: f64 = 1.5;
pub const STATE_WEIGHT: f64 = 1.0;
pub const COUNTRY_WEIGHT: f64 = 0.5;

/// Minimum final score a listing needs at each specificity
#[inline]
pub fn minimum_score(specificity: Specificity) -> f64 {
    match specificity {
        Specificity::Exact => 3.0,
        Specificity::Street => 2.0,
        Specificity::Neighborhood => 1.0,
        Specificity::County | Specificity::City => 0.5,
    }
}

/// Evaluation of one listing: `(distance_m, final_score)`, or `None` if rejected
///
/// Scoring formula:
/// score = (
///     max(0, 1 - distance / radius) * distance_weight
///     + street number / street name matches      # exact specificity only
///     + city / county / postal boundary matches  # when those id sets are non-empty
///     + state / country field matches            # when the criteria carry them
///     + matched_checks / attempted_checks
/// )
///
/// Rejects listings beyond the radius, exact-specificity listings with no
/// street agreement, and listings below [`minimum_score`].
pub fn evaluate_listing(
    listing: &Listing,
    criteria: &SearchCriteria,
    boundary_ids: &BoundaryIds,
    weights: &ScoringWeights,
) -> Option<(f64, f64)> {
    let location = &listing.list_address.coordinates_gp;
    let distance = haversine_distance(
        criteria.coordinates.lat,
        criteria.coordinates.lng,
        location.lat,
        location.lon,
    );

    if !distance.is_finite() || distance > criteria.radius_m {
        return None;
    }

    let mut score = calculate_distance_score(distance, criteria.radius_m) * weights.distance;
    let mut match_count = 0u32;
    let mut total_checks = 0u32;

    if criteria.specificity == Specificity::Exact {
        total_checks += 2;

        if matches_street_number(listing, criteria.street_number.as_deref()) {
            match_count += 1;
            score += weights.street_number;
        }

        if matches_street_name(listing, criteria.street_name.as_deref()) {
            match_count += 1;
            score += weights.street_name;
        }

        // Distance alone never qualifies an exact address
        if match_count == 0 {
            return None;
        }
    }

    let boundary_checks = [
        (GeoCategory::City, &boundary_ids.city_ids, weights.city),
        (GeoCategory::County, &boundary_ids.county_ids, weights.county),
        (GeoCategory::PostalCode, &boundary_ids.postal_ids, weights.postal),
    ];

    for (category, ids, weight) in boundary_checks {
        if ids.is_empty() {
            continue;
        }
        total_checks += 1;
        if listing_has_boundary_id(listing, category, ids) {
            match_count += 1;
            score += weight;
        }
    }

    let address = &listing.list_address;
    let field_checks = [
        (criteria.state.as_deref(), address.state_prov.as_deref(), weights.state),
        (criteria.country.as_deref(), address.country.as_deref(), weights.country),
    ];

    for (wanted, actual, weight) in field_checks {
        let Some(wanted) = wanted else {
            continue;
        };
        total_checks += 1;
        if field_matches(actual, wanted) {
            match_count += 1;
            score += weight;
        }
    }

    let match_ratio = if total_checks > 0 {
        match_count as f64 / total_checks as f64
    } else {
        0.0
    };
    let final_score = score + match_ratio;

    if final_score < minimum_score(criteria.specificity) {
        return None;
    }

    Some((distance, final_score))
}

/// Calculate distance score (0-1)
/// Linear decay from 1 at the center to 0 at the radius
#[inline]
pub fn calculate_distance_score(distance_m: f64, radius_m: f64) -> f64 {
    (1.0 - distance_m / radius_m).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::criteria::derive_criteria;
    use crate::models::{Coordinate, Coordinates, ListAddress, ListingGeo, RecordId, ResolvedAddress};

    const LAT: f64 = 30.27349507;
    const LON: f64 = -97.78272307;

    fn create_test_listing(lat: f64, lon: f64) -> Listing {
        Listing {
            list_id: RecordId::from("listing-1"),
            mls_number: Some("1234567".to_string()),
            list_status: Some("Active".to_string()),
            list_type: None,
            prop_type: Some("Residential".to_string()),
            total_bed: Some(4.0),
            total_bath: Some(3.0),
            living_area: Some(2800.0),
            current_list_price: Some(1_250_000.0),
            list_address: ListAddress {
                address: Some("400 Inwood Road, Austin, TX 78746".to_string()),
                full_street_address: None,
                street_number: Some("400".to_string()),
                street_name: Some("Inwood".to_string()),
                street_suffix: Some("Rd".to_string()),
                unit_number: None,
                city: Some("Austin".to_string()),
                state_prov: Some("TX".to_string()),
                postal_code: Some("78746".to_string()),
                country: Some("US".to_string()),
                coordinates_gp: Coordinates { lat, lon },
            },
            geo: ListingGeo {
                city: vec![RecordId::from(949963)].into(),
                county: vec![RecordId::from(1001)].into(),
                postal_code: vec![RecordId::from(78746)].into(),
                ..Default::default()
            },
        }
    }

    fn resolved(street_number: Option<&str>, route: Option<&str>, locality: Option<&str>) -> ResolvedAddress {
        ResolvedAddress {
            street_number: street_number.map(str::to_string),
            route: route.map(str::to_string),
            locality: locality.map(str::to_string),
            formatted_address: "Austin, TX, USA".to_string(),
            coordinates: Coordinate { lat: LAT, lng: LON },
            ..Default::default()
        }
    }

    #[test]
    fn test_distance_score() {
        assert_eq!(calculate_distance_score(0.0, 100.0), 1.0);
        assert_eq!(calculate_distance_score(50.0, 100.0), 0.5);
        assert_eq!(calculate_distance_score(100.0, 100.0), 0.0);
        assert_eq!(calculate_distance_score(150.0, 100.0), 0.0);
    }

    #[test]
    fn test_exact_match_at_same_point() {
        let criteria = derive_criteria(&resolved(Some("400"), Some("Inwood Road"), None));
        let listing = create_test_listing(LAT, LON);

        // street name "Inwood" does not contain "inwood road"
        let (distance, score) =
            evaluate_listing(&listing, &criteria, &BoundaryIds::default(), &ScoringWeights::default()).unwrap();

        assert_eq!(distance, 0.0);
        // 2.0 distance + 2.0 street number + 1/2 ratio
        assert!((score - 4.5).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_exact_without_street_match_rejected() {
        let criteria = derive_criteria(&resolved(Some("12"), Some("Congress Avenue"), None));
        let listing = create_test_listing(LAT, LON);

        assert!(evaluate_listing(&listing, &criteria, &BoundaryIds::default(), &ScoringWeights::default()).is_none());
    }

    #[test]
    fn test_beyond_radius_rejected() {
        let criteria = derive_criteria(&resolved(None, None, Some("Austin")));
        // ~2.2km north, radius is 2km
        let listing = create_test_listing(LAT + 0.02, LON);

        assert!(evaluate_listing(&listing, &criteria, &BoundaryIds::default(), &ScoringWeights::default()).is_none());
    }

    #[test]
    fn test_boundary_and_field_checks() {
        let mut address = resolved(None, None, Some("Austin"));
        address.admin_level_1 = Some("tx".to_string());
        address.country = Some("US".to_string());
        let criteria = derive_criteria(&address);
        let listing = create_test_listing(LAT, LON);
        let ids = BoundaryIds {
            city_ids: vec!["949963".to_string()],
            county_ids: vec!["9999".to_string()],
            postal_ids: vec![],
            state_ids: vec!["48".to_string()],
        };

        let (_, score) = evaluate_listing(&listing, &criteria, &ids, &ScoringWeights::default()).unwrap();

        // 2.0 distance + 1.0 city + 1.0 state + 0.5 country + 3/4 ratio
        assert!((score - 5.25).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_below_minimum_rejected() {
        let criteria = derive_criteria(&resolved(None, Some("Inwood Road"), None));
        // ~450m away: distance score ~0.2, street minimum is 2.0
        let listing = create_test_listing(LAT + 0.00405, LON);

        assert!(evaluate_listing(&listing, &criteria, &BoundaryIds::default(), &ScoringWeights::default()).is_none());
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let criteria = derive_criteria(&resolved(None, None, Some("Austin")));
        let listing = create_test_listing(f64::NAN, LON);

        assert!(evaluate_listing(&listing, &criteria, &BoundaryIds::default(), &ScoringWeights::default()).is_none());
    }

    #[test]
    fn test_minimum_score_table() {
        assert_eq!(minimum_score(Specificity::Exact), 3.0);
        assert_eq!(minimum_score(Specificity::Street), 2.0);
        assert_eq!(minimum_score(Specificity::Neighborhood), 1.0);
        assert_eq!(minimum_score(Specificity::County), 0.5);
        assert_eq!(minimum_score(Specificity::City), 0.5);
    }
}
