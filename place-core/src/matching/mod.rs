//! Reconciling place records from different data sources.
//!
//! Two strategies live here:
//! - [`best_matches`] and friends rank candidates by fuzzy name distance,
//!   then by specificity and physical distance.
//! - [`best_scored`] scores address-bearing records by exact agreement on
//!   name and address parts.

mod best;
mod candidate;
mod distance;
mod scored;

pub use best::{Match, Winner, best_match, best_matches, closest_by_name, select_winner};
pub use candidate::Candidate;
pub use distance::{damerau_levenshtein, levenshtein};
pub use scored::{
    AddressFields, HOUSE_NUMBER_WEIGHT, NAME_WEIGHT, POSTCODE_WEIGHT, PlaceQuery, STREET_WEIGHT,
    Scored, best_scored, normalize, score,
};
