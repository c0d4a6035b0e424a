use crate::models::{BoundaryMembership, GeoCategory, Listing};

/// Case-insensitive string equality
#[inline]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive equality between an optional listing field and a criterion.
/// An absent listing field never matches.
#[inline]
pub fn field_matches(listing_value: Option<&str>, wanted: &str) -> bool {
    listing_value.is_some_and(|value| eq_ignore_case(value, wanted))
}

/// Check the listing's street number against the criterion (exact, case-insensitive)
#[inline]
pub fn matches_street_number(listing: &Listing, street_number: Option<&str>) -> bool {
    match street_number {
        Some(wanted) => field_matches(listing.list_address.street_number.as_deref(), wanted),
        None => false,
    }
}

/// Check whether the criterion street name occurs inside the listing's street name
#[inline]
pub fn matches_street_name(listing: &Listing, street_name: Option<&str>) -> bool {
    match (street_name, listing.list_address.street_name.as_deref()) {
        (Some(wanted), Some(actual)) => actual.to_lowercase().contains(&wanted.to_lowercase()),
        _ => false,
    }
}

/// Check if the membership shares at least one id with `search_ids`.
///
/// Ids are compared by string form. Malformed membership data never matches.
pub fn membership_intersects(membership: &BoundaryMembership, search_ids: &[String]) -> bool {
    let Some(ids) = membership.ids() else {
        return false;
    };

    ids.iter()
        .map(|id| id.as_key())
        .any(|key| search_ids.iter().any(|search| *search == key))
}

/// Check if the listing belongs to any of `search_ids` in the given category
#[inline]
pub fn listing_has_boundary_id(listing: &Listing, category: GeoCategory, search_ids: &[String]) -> bool {
    membership_intersects(listing.geo.membership(category), search_ids)
}
