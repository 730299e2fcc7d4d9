//! Attribute-scored matching for address-bearing records.
//!
//! Name edit distance alone is a poor fit for records that carry an address:
//! instead each exact agreement on name or address parts adds a fixed weight,
//! and the best record must reach a minimum score.

use tracing::trace;

use crate::config::MatchConfig;

pub const NAME_WEIGHT: f64 = 10.0;
pub const STREET_WEIGHT: f64 = 3.0;
pub const HOUSE_NUMBER_WEIGHT: f64 = 3.0;
pub const POSTCODE_WEIGHT: f64 = 2.0;

/// Read access to the fields scoring looks at.
pub trait AddressFields {
    fn name(&self) -> Option<&str>;
    fn street(&self) -> Option<&str>;
    fn house_number(&self) -> Option<&str>;
    fn postcode(&self) -> Option<&str>;
}

/// The place being looked for, as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceQuery {
    pub name: String,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postcode: Option<String>,
}

impl PlaceQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    pub fn with_house_number(mut self, number: impl Into<String>) -> Self {
        self.house_number = Some(number.into());
        self
    }

    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }
}

/// Query fields in comparable form, computed once per search.
struct NormalizedQuery {
    name: String,
    street: Option<String>,
    house_number: Option<String>,
    postcode: Option<String>,
}

impl From<&PlaceQuery> for NormalizedQuery {
    fn from(query: &PlaceQuery) -> Self {
        Self {
            name: normalize(&query.name),
            street: query.street.as_deref().map(normalize),
            house_number: query.house_number.as_deref().map(str::to_lowercase),
            postcode: query.postcode.as_deref().map(str::to_lowercase),
        }
    }
}

/// Lower-cased letters only, so "St.-Johannis-Str. 5" and "st johannis str"
/// compare equal. Falls back to the lower-cased input when it has no letters.
///
/// ```
/// use place_core::matching::normalize;
///
/// assert_eq!(normalize("Café Kröll"), "cafékröll");
/// assert_eq!(normalize("1-2-3"), "1-2-3");
/// ```
pub fn normalize(value: &str) -> String {
    let lowered = value.to_lowercase();
    let letters: String = lowered.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() { lowered } else { letters }
}

fn same_text(expected: Option<&String>, actual: Option<String>) -> bool {
    matches!((expected, actual), (Some(e), Some(a)) if *e == a)
}

fn score_normalized<R: AddressFields>(query: &NormalizedQuery, record: &R) -> f64 {
    let mut score = 0.0;

    if record.name().map(normalize).as_ref() == Some(&query.name) {
        score += NAME_WEIGHT;
    }
    if same_text(query.street.as_ref(), record.street().map(normalize)) {
        score += STREET_WEIGHT;
    }
    if same_text(query.house_number.as_ref(), record.house_number().map(str::to_lowercase)) {
        score += HOUSE_NUMBER_WEIGHT;
    }
    if same_text(query.postcode.as_ref(), record.postcode().map(str::to_lowercase)) {
        score += POSTCODE_WEIGHT;
    }

    score
}

/// Score of a single record against the query.
pub fn score<R: AddressFields>(query: &PlaceQuery, record: &R) -> f64 {
    score_normalized(&NormalizedQuery::from(query), record)
}

/// A record that reached the minimum score.
#[derive(Debug)]
pub struct Scored<'a, R> {
    pub record: &'a R,
    pub score: f64,
}

/// The highest-scoring record at or above `config.osm_min_score`.
///
/// When several records share the top score the last one wins.
pub fn best_scored<'a, R: AddressFields>(
    query: &PlaceQuery,
    records: &'a [R],
    config: &MatchConfig,
) -> Option<Scored<'a, R>> {
    let normalized = NormalizedQuery::from(query);
    let mut best: Option<Scored<'a, R>> = None;

    for record in records {
        let score = score_normalized(&normalized, record);
        trace!(name = ?record.name(), score, "scored record");

        if score < config.osm_min_score {
            continue;
        }
        if best.as_ref().is_some_and(|current| current.score > score) {
            continue;
        }
        best = Some(Scored { record, score });
    }

    best
}
