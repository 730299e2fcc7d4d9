//! Wikidata SPARQL results.
//!
//! The query service answers with `application/sparql-results+json`: every
//! selected variable of every row is an object with a string `value`. Items
//! are matched against the place name through their comma-joined labels.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::SourceError;
use crate::config::MatchConfig;
use crate::matching::{Candidate, select_winner};

/// URL prefix under which Commons serves files by name.
pub const COMMONS_FILE_PREFIX: &str = "http://commons.wikimedia.org/wiki/Special:FilePath/";

/// Top-level SPARQL JSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Clone, Deserialize)]
struct SparqlResults {
    bindings: Vec<WikidataBinding>,
}

#[derive(Debug, Clone, Deserialize)]
struct Literal {
    value: String,
}

/// One result row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WikidataBinding {
    /// Entity URL, e.g. `http://www.wikidata.org/entity/Q2090`
    item: Literal,
    /// Comma-joined labels
    label: Literal,
    /// Kilometers from the searched point, as a decimal string
    distance: Literal,
    /// Comma-joined instance-of labels
    types: Option<Literal>,
    description: Option<Literal>,
    /// Commons category with views of the item
    view: Option<Literal>,
    #[serde(rename = "wikiURL")]
    wiki_url: Option<Literal>,
    population: Option<Literal>,
    area: Option<Literal>,
    website: Option<Literal>,
    altitude: Option<Literal>,
    image: Option<Literal>,
    nighttime_image: Option<Literal>,
}

/// What a Wikidata item contributes to a place record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WikidataEntry {
    pub description: Option<String>,
    /// Shortest of the item's type labels.
    pub kind: Option<String>,
    pub commons_category: Option<String>,
    pub wikipedia_url: Option<String>,
    pub population: Option<i64>,
    /// Area in square kilometers.
    pub area: Option<f64>,
    pub website: Option<String>,
    /// Altitude in meters.
    pub altitude: Option<i64>,
    pub image_file: Option<String>,
    pub nighttime_image_file: Option<String>,
}

/// A Wikidata item identifier such as `Q64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WikidataId(String);

impl WikidataId {
    /// Accepts identifiers starting with `Q`.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.starts_with('Q').then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WikidataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The item chosen for a place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WikidataItem {
    pub id: WikidataId,
    pub distance: usize,
    #[serde(flatten)]
    pub entry: WikidataEntry,
}

/// Filename part of a Commons file URL.
///
/// ```
/// use place_core::sources::commons_filename;
///
/// assert_eq!(
///     commons_filename("http://commons.wikimedia.org/wiki/Special:FilePath/Berlin.jpg"),
///     Some("Berlin.jpg")
/// );
/// assert_eq!(commons_filename("https://example.org/Berlin.jpg"), None);
/// ```
pub fn commons_filename(url: &str) -> Option<&str> {
    url.strip_prefix(COMMONS_FILE_PREFIX)
}

fn value(literal: Option<Literal>) -> Option<String> {
    literal.map(|l| l.value)
}

impl WikidataBinding {
    fn into_candidate(self) -> Result<Candidate<WikidataEntry>, SourceError> {
        let distance_km: f64 = self.distance.value.trim().parse().map_err(|_| {
            SourceError::InvalidDistance {
                item: self.item.value.clone(),
                value: self.distance.value.clone(),
            }
        })?;

        let names = self.label.value.split(',').map(str::to_string).collect();

        let kind = self.types.as_ref().and_then(|types| {
            types
                .value
                .split(',')
                .min_by_key(|kind| kind.chars().count())
                .map(str::to_string)
        });

        let entry = WikidataEntry {
            description: value(self.description),
            kind,
            commons_category: value(self.view),
            wikipedia_url: value(self.wiki_url),
            population: self.population.and_then(|l| l.value.parse().ok()),
            area: self.area.and_then(|l| l.value.parse().ok()),
            website: value(self.website),
            altitude: self.altitude.and_then(|l| l.value.parse().ok()),
            image_file: self
                .image
                .as_ref()
                .and_then(|l| commons_filename(&l.value))
                .map(str::to_string),
            nighttime_image_file: self
                .nighttime_image
                .as_ref()
                .and_then(|l| commons_filename(&l.value))
                .map(str::to_string),
        };

        Ok(Candidate::new(names, self.item.value, distance_km, entry))
    }
}

impl SparqlResponse {
    /// Match candidates for every row. Rows whose distance is not a number
    /// are dropped.
    pub fn into_candidates(self) -> Vec<Candidate<WikidataEntry>> {
        self.results
            .bindings
            .into_iter()
            .filter_map(|binding| match binding.into_candidate() {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    debug!(error = %e, "dropping wikidata row");
                    None
                }
            })
            .collect()
    }
}

/// Decode a SPARQL JSON payload into match candidates.
pub fn decode_sparql(json: &str) -> Result<Vec<Candidate<WikidataEntry>>, SourceError> {
    let response: SparqlResponse = serde_json::from_str(json)?;
    Ok(response.into_candidates())
}

/// The Wikidata item best matching `name`, if its identifier is valid.
pub fn resolve_wikidata(
    name: &str,
    candidates: &[Candidate<WikidataEntry>],
    config: &MatchConfig,
) -> Option<WikidataItem> {
    let winner = select_winner(name, candidates, config, |candidate| {
        candidate.identifier().and_then(WikidataId::parse)
    })?;

    Some(WikidataItem {
        id: winner.identifier,
        distance: winner.distance,
        entry: winner.candidate.payload.clone(),
    })
}
