use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use crate::core::{derive_criteria, BoundaryIndex, Matcher, SearchCriteria};
use crate::models::{
    Boundary, BoundaryIds, BoundaryLookup, Listing, ListingSearchResult, ResolvedAddress,
};
use crate::services::geocoder::{AddressResolver, GeocodeError};

/// Errors that abort a search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("could not parse address")]
    AddressNotFound,

    #[error(transparent)]
    Resolver(#[from] GeocodeError),
}

/// Immutable listings + boundary index pair searched together
#[derive(Debug, Default)]
pub struct DataSnapshot {
    listings: Vec<Listing>,
    index: BoundaryIndex,
}

impl DataSnapshot {
    pub fn new(listings: Vec<Listing>, boundaries: Vec<Boundary>) -> Self {
        Self {
            listings,
            index: BoundaryIndex::new(boundaries),
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn index(&self) -> &BoundaryIndex {
        &self.index
    }

    pub fn find_listing(&self, list_id: &str) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.list_id.as_key() == list_id)
    }
}

/// Everything one search produced, for callers that want more than the results
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub resolved: ResolvedAddress,
    pub criteria: SearchCriteria,
    pub boundary_ids: BoundaryIds,
    pub results: Vec<ListingSearchResult>,
    pub total_candidates: usize,
}

/// Address-driven listing search
///
/// Pipeline: resolve -> derive criteria -> boundary ids -> score -> rank -> format.
/// Searches share the current snapshot read-only; `load_data` swaps in a
/// new one, and in-flight searches finish on the snapshot they started with.
pub struct ListingSearchService {
    resolver: Arc<dyn AddressResolver>,
    matcher: Matcher,
    snapshot: RwLock<Arc<DataSnapshot>>,
}

impl ListingSearchService {
    pub fn new(
        resolver: Arc<dyn AddressResolver>,
        matcher: Matcher,
        listings: Vec<Listing>,
        boundaries: Vec<Boundary>,
    ) -> Self {
        Self {
            resolver,
            matcher,
            snapshot: RwLock::new(Arc::new(DataSnapshot::new(listings, boundaries))),
        }
    }

    /// Replace the listings and boundaries
    pub fn load_data(&self, listings: Vec<Listing>, boundaries: Vec<Boundary>) {
        let snapshot = Arc::new(DataSnapshot::new(listings, boundaries));
        tracing::info!(
            "Loaded {} listings and {} boundaries",
            snapshot.listings().len(),
            snapshot.index().len()
        );

        let mut current = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *current = snapshot;
    }

    /// Current data snapshot
    pub fn snapshot(&self) -> Arc<DataSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Search listings by free-text address
    pub async fn search_listings_by_address(
        &self,
        address: &str,
    ) -> Result<Vec<ListingSearchResult>, SearchError> {
        Ok(self.search(address, None).await?.results)
    }

    /// Run the full pipeline, keeping at most `limit` results
    pub async fn search(&self, address: &str, limit: Option<usize>) -> Result<SearchOutcome, SearchError> {
        let resolved = match self.resolver.resolve(address).await {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                tracing::info!("Could not parse address {:?} ({})", address, self.resolver.name());
                return Err(SearchError::AddressNotFound);
            }
            Err(e) => {
                tracing::error!("Resolver {} failed for {:?}: {}", self.resolver.name(), address, e);
                return Err(e.into());
            }
        };

        tracing::debug!("Resolved address: {:?}", resolved);

        let criteria = derive_criteria(&resolved);
        tracing::info!(
            "Search criteria for {:?}: {:?}, radius {}m",
            resolved.formatted_address,
            criteria.specificity,
            criteria.radius_m
        );

        let snapshot = self.snapshot();
        let boundary_ids = snapshot.index().find_boundary_ids(&resolved);
        let result = self.matcher.search(&criteria, &boundary_ids, snapshot.listings());

        let mut results: Vec<ListingSearchResult> = result
            .matches
            .iter()
            .map(|scored| ListingSearchResult::from(scored.listing))
            .collect();
        if let Some(limit) = limit {
            results.truncate(limit);
        }

        tracing::info!(
            "Found {} matching listings (from {} candidates)",
            result.matches.len(),
            result.total_candidates
        );

        Ok(SearchOutcome {
            resolved,
            criteria,
            boundary_ids,
            results,
            total_candidates: result.total_candidates,
        })
    }

    /// Boundary information by id
    pub fn get_boundary_info(&self, id: &str) -> Option<BoundaryLookup> {
        self.snapshot().index().lookup(id)
    }

    /// All resolvable boundaries of a listing
    pub fn get_listing_boundaries(&self, listing: &Listing) -> Vec<BoundaryLookup> {
        self.snapshot().index().listing_boundaries(listing)
    }

    /// Boundaries of a loaded listing by its id, `None` if the listing is unknown
    pub fn listing_boundaries_by_id(&self, list_id: &str) -> Option<Vec<BoundaryLookup>> {
        let snapshot = self.snapshot();
        let listing = snapshot.find_listing(list_id)?;
        Some(snapshot.index().listing_boundaries(listing))
    }
}
