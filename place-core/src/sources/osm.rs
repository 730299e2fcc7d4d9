//! OpenStreetMap Overpass results.
//!
//! Only the `tags` of each element are interesting; geometry is ignored.
//! Tag values are free text in OpenStreetMap, so the enums below accept
//! unknown values instead of failing the whole payload.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::error::SourceError;
use crate::config::MatchConfig;
use crate::hours::OpeningHours;
use crate::matching::{AddressFields, PlaceQuery, Scored, best_scored};

/// Top-level Overpass JSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<OverpassElement>,
}

/// One node, way or relation.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub nodes: Option<Vec<i64>>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub tags: Option<OsmPlace>,
}

/// The tags of an OpenStreetMap element describing a place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsmPlace {
    pub id: Option<String>,

    pub name: Option<String>,
    pub description: Option<String>,

    #[serde(rename = "addr:street")]
    pub street: Option<String>,
    #[serde(rename = "addr:housenumber")]
    pub house_number: Option<String>,
    #[serde(rename = "addr:postcode")]
    pub postcode: Option<String>,
    #[serde(rename = "addr:city")]
    pub city: Option<String>,

    pub phone: Option<String>,
    pub website: Option<String>,

    pub amenity: Option<String>,
    pub brand: Option<String>,
    #[serde(rename = "brand:wikidata")]
    pub brand_wikidata: Option<String>,
    #[serde(rename = "brand:wikipedia")]
    pub brand_wikipedia: Option<String>,

    pub cuisine: Option<String>,
    #[serde(rename = "diet:vegetarian")]
    pub vegetarian: Option<Exclusivity>,
    #[serde(rename = "diet:vegan")]
    pub vegan: Option<Exclusivity>,

    pub indoor_seating: Option<YesNo>,
    pub outdoor_seating: Option<YesNo>,
    pub internet_access: Option<InternetAccess>,
    pub smoking: Option<YesNo>,
    pub takeaway: Option<Exclusivity>,
    pub wheelchair: Option<Wheelchair>,

    pub level: Option<String>,

    pub opening_hours: Option<OpeningHours>,
}

impl AddressFields for OsmPlace {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    fn house_number(&self) -> Option<&str> {
        self.house_number.as_deref()
    }

    fn postcode(&self) -> Option<&str> {
        self.postcode.as_deref()
    }
}

/// A yes/no tag where anything other than `no` counts as yes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn from_tag(value: &str) -> Self {
        if value == "no" { Self::No } else { Self::Yes }
    }
}

impl<'de> Deserialize<'de> for YesNo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&raw))
    }
}

/// Yes/no tags that can also mean "exclusively", e.g. `diet:vegan=only`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exclusivity {
    Yes,
    No,
    Only,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wheelchair {
    Yes,
    No,
    Limited,
    Designated,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InternetAccess {
    Yes,
    No,
    Wlan,
    Terminal,
    Service,
    Wired,
    #[serde(other)]
    Unknown,
}

impl OverpassResponse {
    /// The tagged places, in response order.
    ///
    /// Elements without tags (typically bare nodes of a way) are dropped.
    pub fn into_places(self) -> Vec<OsmPlace> {
        let total = self.elements.len();
        let places: Vec<OsmPlace> = self
            .elements
            .into_iter()
            .filter_map(|element| element.tags)
            .collect();

        debug!(total, tagged = places.len(), "decoded overpass response");
        places
    }
}

/// Decode an Overpass JSON payload into the tagged places it contains.
pub fn decode_overpass(json: &str) -> Result<Vec<OsmPlace>, SourceError> {
    let response: OverpassResponse = serde_json::from_str(json)?;
    Ok(response.into_places())
}

/// The place best agreeing with `query` by name and address.
pub fn match_osm<'a>(
    query: &PlaceQuery,
    places: &'a [OsmPlace],
    config: &MatchConfig,
) -> Option<Scored<'a, OsmPlace>> {
    best_scored(query, places, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hours::Weekday;

    const RESPONSE: &str = r#"{
        "version": 0.6,
        "elements": [
            {
                "type": "way",
                "id": 27262213,
                "nodes": [299463437, 299463438],
                "tags": {
                    "amenity": "cafe",
                    "name": "Café Kröll",
                    "addr:street": "Hauptmarkt",
                    "addr:housenumber": "6",
                    "addr:postcode": "90403",
                    "addr:city": "Nürnberg",
                    "diet:vegan": "only",
                    "outdoor_seating": "seasonal",
                    "smoking": "no",
                    "wheelchair": "limited",
                    "internet_access": "wlan",
                    "brand:wikidata": "Q123",
                    "opening_hours": "Mo-Sa 09:00-19:00; Su 10:00-18:00"
                }
            },
            { "type": "node", "id": 299463437, "lat": 49.45, "lon": 11.07 },
            {
                "type": "way",
                "id": 1,
                "tags": { "amenity": "bench", "wheelchair": "ramp-only" }
            }
        ]
    }"#;

    #[test]
    fn decodes_tagged_elements() {
        let places = decode_overpass(RESPONSE).unwrap();
        assert_eq!(places.len(), 2);

        let cafe = &places[0];
        assert_eq!(cafe.name.as_deref(), Some("Café Kröll"));
        assert_eq!(cafe.street.as_deref(), Some("Hauptmarkt"));
        assert_eq!(cafe.house_number.as_deref(), Some("6"));
        assert_eq!(cafe.city.as_deref(), Some("Nürnberg"));
        assert_eq!(cafe.brand_wikidata.as_deref(), Some("Q123"));
        assert_eq!(cafe.vegan, Some(Exclusivity::Only));
        assert_eq!(cafe.vegetarian, None);
        assert_eq!(cafe.wheelchair, Some(Wheelchair::Limited));
        assert_eq!(cafe.internet_access, Some(InternetAccess::Wlan));
    }

    #[test]
    fn yes_no_is_lenient() {
        let places = decode_overpass(RESPONSE).unwrap();
        assert_eq!(places[0].outdoor_seating, Some(YesNo::Yes));
        assert_eq!(places[0].smoking, Some(YesNo::No));
        assert_eq!(YesNo::from_tag("separated"), YesNo::Yes);
    }

    #[test]
    fn unknown_enum_values_do_not_fail() {
        let places = decode_overpass(RESPONSE).unwrap();
        assert_eq!(places[1].wheelchair, Some(Wheelchair::Unknown));
    }

    #[test]
    fn opening_hours_tag_is_parsed() {
        let places = decode_overpass(RESPONSE).unwrap();
        let hours = places[0].opening_hours.as_ref().unwrap();
        assert_eq!(hours.portions().len(), 2);
        assert_eq!(hours.portions()[0].label(), "Mon - Sat");
        assert!(hours.portion_for(Weekday::Sunday).is_some());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(matches!(
            decode_overpass("{\"elements\": 3}"),
            Err(SourceError::Json(_))
        ));
    }

    #[test]
    fn matches_by_address() {
        let places = decode_overpass(RESPONSE).unwrap();
        let query = PlaceQuery::new("Cafe Kroell")
            .with_street("Hauptmarkt")
            .with_house_number("6")
            .with_postcode("90403");

        let found = match_osm(&query, &places, &MatchConfig::default()).unwrap();
        assert_eq!(found.record.amenity.as_deref(), Some("cafe"));
        assert_eq!(found.score, 8.0);
    }
}
