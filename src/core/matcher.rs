use std::cmp::Ordering;
use crate::core::{criteria::SearchCriteria, scoring::evaluate_listing};
use crate::models::{BoundaryIds, Listing, ScoredListing, ScoringWeights};

/// Scores closer than this are ranked by distance instead
pub const SCORE_TIE_THRESHOLD: f64 = 0.1;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult<'a> {
    pub matches: Vec<ScoredListing<'a>>,
    pub total_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Radius cutoff
/// 2. Street agreement (exact addresses only)
/// 3. Boundary and field scoring
/// 4. Minimum-score filter and ranking
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score every listing against the criteria and boundary ids
    ///
    /// Each listing is evaluated independently; a rejected listing never
    /// affects the others.
    ///
    /// # Returns
    /// MatchResult with accepted listings ranked by score, near-ties by distance
    pub fn search<'a>(
        &self,
        criteria: &SearchCriteria,
        boundary_ids: &BoundaryIds,
        listings: &'a [Listing],
    ) -> MatchResult<'a> {
        let total_candidates = listings.len();

        let mut matches: Vec<ScoredListing<'a>> = listings
            .iter()
            .filter_map(|listing| {
                evaluate_listing(listing, criteria, boundary_ids, &self.weights).map(
                    |(distance_m, score)| ScoredListing {
                        listing,
                        distance_m,
                        score,
                    },
                )
            })
            .collect();

        sort_ranked(&mut matches);

        tracing::debug!(
            "Matched {} of {} listings ({:?}, radius {}m)",
            matches.len(),
            total_candidates,
            criteria.specificity,
            criteria.radius_m
        );

        MatchResult {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Two-tier ranking: score descending, then distance ascending when the
/// scores are within [`SCORE_TIE_THRESHOLD`].
///
/// Not transitive across chains of near-ties.
pub fn compare_ranked(a: &ScoredListing<'_>, b: &ScoredListing<'_>) -> Ordering {
    if (a.score - b.score).abs() > SCORE_TIE_THRESHOLD {
        b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
    } else {
        a.distance_m
            .partial_cmp(&b.distance_m)
            .unwrap_or(Ordering::Equal)
    }
}

/// Stable merge sort by [`compare_ranked`].
///
/// `slice::sort_by` may panic when the comparator is not a total order.
pub fn sort_ranked(matches: &mut Vec<ScoredListing<'_>>) {
    if matches.len() < 2 {
        return;
    }

    let mut right = matches.split_off(matches.len() / 2);
    sort_ranked(matches);
    sort_ranked(&mut right);

    let left = std::mem::take(matches);
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        if compare_ranked(&right[j], &left[i]) == Ordering::Less {
            merged.push(right[j]);
            j += 1;
        } else {
            merged.push(left[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);

    *matches = merged;
}
