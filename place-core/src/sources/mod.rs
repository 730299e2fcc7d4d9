//! Decoding of data source payloads into matchable records.
//!
//! Fetching is left to the caller: these functions take response bodies
//! that are already in memory.

mod error;
mod osm;
mod record;
mod wikidata;

pub use error::SourceError;
pub use osm::{
    Exclusivity, InternetAccess, OsmPlace, OverpassElement, OverpassResponse, Wheelchair, YesNo,
    decode_overpass, match_osm,
};
pub use record::{IdentifierKind, PlaceRecord, coalesce};
pub use wikidata::{
    COMMONS_FILE_PREFIX, SparqlResponse, WikidataEntry, WikidataId, WikidataItem, commons_filename,
    decode_sparql, resolve_wikidata,
};
