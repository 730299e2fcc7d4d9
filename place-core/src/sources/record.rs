//! Place records assembled from several sources.
//!
//! Sources are merged in priority order: a field set by an earlier source is
//! never overwritten by a later one.

use std::collections::BTreeMap;

use serde::Serialize;

use super::osm::OsmPlace;
use super::wikidata::WikidataItem;
use crate::hours::OpeningHours;

/// First present value, in order.
///
/// ```
/// use place_core::sources::coalesce;
///
/// assert_eq!(coalesce([None, Some(2), Some(3)]), Some(2));
/// assert_eq!(coalesce::<u8>([None, None]), None);
/// ```
pub fn coalesce<T>(values: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    values.into_iter().flatten().next()
}

/// Kinds of external identifier a record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    OpenStreetMap,
    Wikidata,
    WikidataBrand,
    CommonsCategory,
    CommonsImage,
    CommonsNighttimeImage,
}

/// Everything known about one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceRecord {
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

    pub opening_hours: Option<OpeningHours>,

    pub identifiers: BTreeMap<IdentifierKind, String>,
}

fn fill<T: Clone>(slot: &mut Option<T>, candidate: Option<&T>) {
    *slot = coalesce([slot.take(), candidate.cloned()]);
}

impl PlaceRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn fill_identifier(&mut self, kind: IdentifierKind, value: Option<&str>) {
        if let Some(value) = value {
            self.identifiers
                .entry(kind)
                .or_insert_with(|| value.to_string());
        }
    }

    /// Fill absent fields from OpenStreetMap tags.
    pub fn merge_osm(&mut self, place: &OsmPlace) {
        fill(&mut self.description, place.description.as_ref());
        fill(&mut self.kind, place.amenity.as_ref());
        fill(&mut self.street, place.street.as_ref());
        fill(&mut self.house_number, place.house_number.as_ref());
        fill(&mut self.postcode, place.postcode.as_ref());
        fill(&mut self.city, place.city.as_ref());
        fill(&mut self.phone, place.phone.as_ref());
        fill(&mut self.website, place.website.as_ref());
        fill(&mut self.opening_hours, place.opening_hours.as_ref());

        self.fill_identifier(IdentifierKind::OpenStreetMap, place.id.as_deref());
        self.fill_identifier(IdentifierKind::WikidataBrand, place.brand_wikidata.as_deref());
    }

    /// Fill absent fields from a matched Wikidata item.
    pub fn merge_wikidata(&mut self, item: &WikidataItem) {
        let entry = &item.entry;
        fill(&mut self.description, entry.description.as_ref());
        fill(&mut self.kind, entry.kind.as_ref());
        fill(&mut self.website, entry.website.as_ref());
        fill(&mut self.wikipedia_url, entry.wikipedia_url.as_ref());
        fill(&mut self.population, entry.population.as_ref());
        fill(&mut self.area, entry.area.as_ref());
        fill(&mut self.altitude, entry.altitude.as_ref());

        self.fill_identifier(IdentifierKind::Wikidata, Some(item.id.as_str()));
        self.fill_identifier(IdentifierKind::CommonsCategory, entry.commons_category.as_deref());
        self.fill_identifier(IdentifierKind::CommonsImage, entry.image_file.as_deref());
        self.fill_identifier(
            IdentifierKind::CommonsNighttimeImage,
            entry.nighttime_image_file.as_deref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::wikidata::{WikidataEntry, WikidataId};

    fn osm() -> OsmPlace {
        OsmPlace {
            id: Some("27262213".into()),
            name: Some("Café Kröll".into()),
            description: Some("Traditional café".into()),
            amenity: Some("cafe".into()),
            street: Some("Hauptmarkt".into()),
            website: Some("https://osm.example".into()),
            opening_hours: Some(OpeningHours::parse("mo-sa 09:00-19:00")),
            ..OsmPlace::default()
        }
    }

    fn wikidata() -> WikidataItem {
        WikidataItem {
            id: WikidataId::parse("Q2090").unwrap(),
            distance: 0,
            entry: WikidataEntry {
                description: Some("city in Bavaria".into()),
                website: Some("https://wd.example".into()),
                population: Some(518_370),
                image_file: Some("Nuernberg.jpg".into()),
                ..WikidataEntry::default()
            },
        }
    }

    #[test]
    fn coalesce_keeps_order() {
        assert_eq!(coalesce([Some("a"), Some("b")]), Some("a"));
        assert_eq!(coalesce(Vec::<Option<u8>>::new()), None);
    }

    #[test]
    fn first_source_wins() {
        let mut record = PlaceRecord::new("Café Kröll");
        record.merge_osm(&osm());
        record.merge_wikidata(&wikidata());

        assert_eq!(record.description.as_deref(), Some("Traditional café"));
        assert_eq!(record.website.as_deref(), Some("https://osm.example"));
        assert_eq!(record.population, Some(518_370));
        assert_eq!(record.kind.as_deref(), Some("cafe"));
        assert!(record.opening_hours.is_some());
    }

    #[test]
    fn merge_order_matters() {
        let mut record = PlaceRecord::new("Café Kröll");
        record.merge_wikidata(&wikidata());
        record.merge_osm(&osm());

        assert_eq!(record.description.as_deref(), Some("city in Bavaria"));
        assert_eq!(record.website.as_deref(), Some("https://wd.example"));
        assert_eq!(record.street.as_deref(), Some("Hauptmarkt"));
    }

    #[test]
    fn caller_values_are_kept() {
        let mut record = PlaceRecord::new("Café Kröll");
        record.street = Some("Hauptmarkt 6".into());
        record.merge_osm(&osm());
        assert_eq!(record.street.as_deref(), Some("Hauptmarkt 6"));
    }

    #[test]
    fn identifiers_per_source() {
        let mut record = PlaceRecord::new("Café Kröll");
        record.merge_osm(&osm());
        record.merge_wikidata(&wikidata());

        assert_eq!(
            record.identifiers.get(&IdentifierKind::OpenStreetMap).map(String::as_str),
            Some("27262213")
        );
        assert_eq!(
            record.identifiers.get(&IdentifierKind::Wikidata).map(String::as_str),
            Some("Q2090")
        );
        assert_eq!(
            record.identifiers.get(&IdentifierKind::CommonsImage).map(String::as_str),
            Some("Nuernberg.jpg")
        );
        assert!(!record.identifiers.contains_key(&IdentifierKind::CommonsCategory));
    }
}
