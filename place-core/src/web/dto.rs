//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::hours::{DayTimeRange, DisplayableWeekPortion, ParsedHours};
use crate::matching::{Candidate, Match, PlaceQuery};
use crate::sources::{
    IdentifierKind, OverpassResponse, PlaceRecord, SparqlResponse, WikidataItem,
};

/// Request to parse an opening-hours string.
#[derive(Debug, Deserialize)]
pub struct ParseHoursRequest {
    /// Raw value, e.g. "Mo-Fr 09:00-18:00; Sa 10:00-14:00"
    pub hours: String,
}

/// Parsed schedule.
#[derive(Debug, Serialize)]
pub struct ParseHoursResponse {
    pub portions: Vec<PortionResult>,

    /// Fragments of the input that were not understood
    pub skipped: Vec<String>,
}

/// A group of weekdays sharing the same hours.
#[derive(Debug, Serialize)]
pub struct PortionResult {
    /// Display label (e.g., "Mon - Fri")
    pub label: String,

    /// Day codes in display order (e.g., ["mo", "tu"])
    pub weekdays: Vec<&'static str>,

    pub ranges: Vec<RangeResult>,

    /// Listed but without hours (holidays only)
    pub closed: bool,
}

#[derive(Debug, Serialize)]
pub struct RangeResult {
    /// Opening time, HH:MM
    pub from: String,

    /// Closing time, HH:MM
    pub to: String,

    pub crosses_midnight: bool,
}

/// A candidate record supplied by the caller.
#[derive(Debug, Deserialize)]
pub struct CandidateInput {
    pub names: Vec<String>,
    pub locator: String,
    #[serde(default)]
    pub distance_km: f64,
}

/// Request to reconcile a place against candidate records.
#[derive(Debug, Deserialize)]
pub struct MatchPlaceRequest {
    pub name: String,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postcode: Option<String>,

    /// Generic candidates ranked by name distance
    #[serde(default)]
    pub candidates: Vec<CandidateInput>,

    /// Overpass JSON response to score against the address
    pub overpass: Option<OverpassResponse>,

    /// Wikidata SPARQL JSON response to match against the name
    pub sparql: Option<SparqlResponse>,
}

/// Result of reconciling a place.
#[derive(Debug, Serialize)]
pub struct MatchPlaceResponse {
    /// Best generic candidates (several only on a full tie)
    pub matches: Vec<MatchResult>,

    /// Place assembled from the matched source records
    pub place: PlaceResult,

    /// Score of the matched OpenStreetMap record
    pub osm_score: Option<f64>,

    pub wikidata: Option<WikidataItem>,
}

#[derive(Debug, Serialize)]
pub struct MatchResult {
    pub locator: String,
    pub identifier: Option<String>,
    /// Edit distance of the closest name
    pub distance: usize,
    pub distance_km: f64,
}

/// A merged place record.
#[derive(Debug, Serialize)]
pub struct PlaceResult {
    pub name: String,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub wikipedia_url: Option<String>,
    pub population: Option<i64>,
    pub area: Option<f64>,
    pub altitude: Option<i64>,
    pub opening_hours: Option<Vec<PortionResult>>,
    pub identifiers: Vec<IdentifierResult>,
}

#[derive(Debug, Serialize)]
pub struct IdentifierResult {
    pub kind: IdentifierKind,
    pub value: String,
}

/// Request to compare two strings.
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    pub a: String,
    pub b: String,
    /// Optional cap for the Damerau-Levenshtein distance
    pub max: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub damerau_levenshtein: usize,
    pub levenshtein: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl RangeResult {
    pub fn from_range(range: &DayTimeRange) -> Self {
        Self {
            from: range.from.to_string(),
            to: range.to.to_string(),
            crosses_midnight: range.crosses_midnight(),
        }
    }
}

impl PortionResult {
    pub fn from_portion(portion: &DisplayableWeekPortion) -> Self {
        Self {
            label: portion.label(),
            weekdays: portion.weekdays().iter().map(|day| day.code()).collect(),
            ranges: portion.ranges().iter().map(RangeResult::from_range).collect(),
            closed: portion.is_closed(),
        }
    }

    pub fn from_portions(portions: &[DisplayableWeekPortion]) -> Vec<Self> {
        portions.iter().map(Self::from_portion).collect()
    }
}

impl ParseHoursResponse {
    pub fn from_parsed(parsed: &ParsedHours) -> Self {
        Self {
            portions: PortionResult::from_portions(parsed.hours.portions()),
            skipped: parsed.skipped.iter().map(ToString::to_string).collect(),
        }
    }
}

impl CandidateInput {
    pub fn into_candidate(self) -> Candidate<()> {
        Candidate::new(self.names, self.locator, self.distance_km, ())
    }
}

impl MatchPlaceRequest {
    pub fn query(&self) -> PlaceQuery {
        PlaceQuery {
            name: self.name.clone(),
            street: self.street.clone(),
            house_number: self.house_number.clone(),
            postcode: self.postcode.clone(),
        }
    }
}

impl MatchResult {
    pub fn from_match(m: &Match<'_, ()>) -> Self {
        Self {
            locator: m.candidate.locator.clone(),
            identifier: m.candidate.identifier().map(str::to_string),
            distance: m.distance,
            distance_km: m.candidate.distance_km,
        }
    }
}

impl PlaceResult {
    pub fn from_record(record: PlaceRecord) -> Self {
        Self {
            opening_hours: record
                .opening_hours
                .as_ref()
                .map(|hours| PortionResult::from_portions(hours.portions())),
            identifiers: record
                .identifiers
                .into_iter()
                .map(|(kind, value)| IdentifierResult { kind, value })
                .collect(),
            name: record.name,
            description: record.description,
            kind: record.kind,
            street: record.street,
            house_number: record.house_number,
            postcode: record.postcode,
            city: record.city,
            phone: record.phone,
            website: record.website,
            wikipedia_url: record.wikipedia_url,
            population: record.population,
            area: record.area,
            altitude: record.altitude,
        }
    }
}
