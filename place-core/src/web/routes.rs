//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};

use crate::matching::{Candidate, best_matches, damerau_levenshtein, levenshtein};
use crate::sources::{
    OverpassResponse, PlaceRecord, SparqlResponse, match_osm, resolve_wikidata,
};

use super::dto::*;
use super::state::AppState;

/// Longest name or string, in characters, the matching endpoints accept.
pub const MAX_INPUT_CHARS: usize = 256;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/hours/parse", post(parse_hours))
        .route("/places/match", post(match_place))
        .route("/places/distance", post(distance))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse an opening-hours string into display portions.
async fn parse_hours(
    State(state): State<AppState>,
    Json(req): Json<ParseHoursRequest>,
) -> Json<ParseHoursResponse> {
    let parsed = state.hours.parse(&req.hours).await;
    Json(ParseHoursResponse::from_parsed(&parsed))
}

/// Reconcile a place with the candidate records supplied in the request.
async fn match_place(
    State(state): State<AppState>,
    Json(req): Json<MatchPlaceRequest>,
) -> Result<Json<MatchPlaceResponse>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "name must not be empty".into(),
        });
    }
    check_length("name", &req.name)?;
    for candidate in &req.candidates {
        for name in &candidate.names {
            check_length("candidate name", name)?;
        }
    }

    let config = state.matching.as_ref();
    let query = req.query();

    let candidates: Vec<Candidate<()>> = req
        .candidates
        .into_iter()
        .map(CandidateInput::into_candidate)
        .collect();
    let matches: Vec<MatchResult> = best_matches(&req.name, &candidates, config)
        .iter()
        .map(MatchResult::from_match)
        .collect();

    // Caller-supplied address parts take precedence over every source
    let mut record = PlaceRecord::new(req.name.clone());
    record.street = query.street.clone();
    record.house_number = query.house_number.clone();
    record.postcode = query.postcode.clone();

    let places = req
        .overpass
        .map(OverpassResponse::into_places)
        .unwrap_or_default();
    let osm = match_osm(&query, &places, config);
    let osm_score = osm.as_ref().map(|scored| scored.score);
    if let Some(scored) = &osm {
        record.merge_osm(scored.record);
    }

    let wikidata = req
        .sparql
        .map(SparqlResponse::into_candidates)
        .and_then(|candidates| resolve_wikidata(&req.name, &candidates, config));
    if let Some(item) = &wikidata {
        record.merge_wikidata(item);
    }

    info!(
        name = %req.name,
        matches = matches.len(),
        osm = osm_score.is_some(),
        wikidata = wikidata.is_some(),
        "matched place"
    );

    Ok(Json(MatchPlaceResponse {
        matches,
        place: PlaceResult::from_record(record),
        osm_score,
        wikidata,
    }))
}

/// Edit distances between two strings.
async fn distance(Json(req): Json<DistanceRequest>) -> Result<Json<DistanceResponse>, AppError> {
    if req.max == Some(0) {
        return Err(AppError::BadRequest {
            message: "max must be positive".into(),
        });
    }
    check_length("a", &req.a)?;
    check_length("b", &req.b)?;

    Ok(Json(DistanceResponse {
        damerau_levenshtein: damerau_levenshtein(&req.a, &req.b, req.max),
        levenshtein: levenshtein(&req.a, &req.b),
    }))
}

/// Edit distances grow with the product of both lengths, so long input is refused.
fn check_length(field: &str, value: &str) -> Result<(), AppError> {
    if value.chars().count() > MAX_INPUT_CHARS {
        return Err(AppError::BadRequest {
            message: format!("{field} is longer than {MAX_INPUT_CHARS} characters"),
        });
    }
    Ok(())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OVERPASS: &str = r#"{
        "elements": [
            {
                "type": "way",
                "id": 1,
                "tags": {
                    "id": "way/1",
                    "name": "Tiergarten Nürnberg",
                    "amenity": "zoo",
                    "addr:street": "Am Tiergarten",
                    "addr:housenumber": "30",
                    "website": "https://tiergarten.example",
                    "opening_hours": "Mo-Su 09:00-17:00; PH off"
                }
            }
        ]
    }"#;

    const SPARQL: &str = r#"{
        "results": { "bindings": [
            {
                "item": { "value": "http://www.wikidata.org/entity/Q315036" },
                "label": { "value": "Tiergarten Nürnberg,Nuremberg Zoo" },
                "distance": { "value": "0.2" },
                "description": { "value": "zoo in Nuremberg" },
                "website": { "value": "https://wd.example" }
            }
        ] }
    }"#;

    fn match_request(json: serde_json::Value) -> MatchPlaceRequest {
        serde_json::from_value(json).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn parse_hours_endpoint() {
        let req = ParseHoursRequest {
            hours: "mo-fr 09:00-17:00; sa 10:00-14:00; xx 1".into(),
        };
        let Json(resp) = parse_hours(State(AppState::default()), Json(req)).await;

        assert_eq!(resp.portions.len(), 2);
        assert_eq!(resp.portions[0].label, "Mon - Fri");
        assert_eq!(resp.portions[1].label, "Saturday");
        assert_eq!(resp.portions[1].ranges[0].from, "10:00");
        assert!(!resp.skipped.is_empty());
    }

    #[tokio::test]
    async fn parse_hours_uses_cache() {
        let state = AppState::default();
        let req = || ParseHoursRequest {
            hours: "24/7".into(),
        };

        let Json(first) = parse_hours(State(state.clone()), Json(req())).await;
        assert!(first.skipped.is_empty());
        let Json(resp) = parse_hours(State(state.clone()), Json(req())).await;

        assert_eq!(resp.portions[0].weekdays.len(), 7);
        assert!(state.hours.get("24/7").await.is_some());
    }

    #[tokio::test]
    async fn match_generic_candidates() {
        let req = match_request(serde_json::json!({
            "name": "Hauptbahnhof",
            "candidates": [
                { "names": ["Hauptbahnhof"], "locator": "entity/Q1234", "distance_km": 0.5 },
                { "names": ["Hauptbahnhof"], "locator": "entity/Q12", "distance_km": 2.0 },
                { "names": ["Südbahnhof"], "locator": "entity/Q7", "distance_km": 0.1 }
            ]
        }));
        let Json(resp) = match_place(State(AppState::default()), Json(req))
            .await
            .unwrap();

        assert_eq!(resp.matches.len(), 1);
        assert_eq!(resp.matches[0].locator, "entity/Q12");
        assert_eq!(resp.matches[0].identifier.as_deref(), Some("Q12"));
        assert_eq!(resp.matches[0].distance, 0);
        assert!(resp.wikidata.is_none());
        assert!(resp.osm_score.is_none());
    }

    #[tokio::test]
    async fn match_merges_sources() {
        let req = match_request(serde_json::json!({
            "name": "Tiergarten Nürnberg",
            "street": "Am Tiergarten",
            "overpass": serde_json::from_str::<serde_json::Value>(OVERPASS).unwrap(),
            "sparql": serde_json::from_str::<serde_json::Value>(SPARQL).unwrap()
        }));
        let Json(resp) = match_place(State(AppState::default()), Json(req))
            .await
            .unwrap();

        assert_eq!(resp.osm_score, Some(13.0));
        assert_eq!(resp.wikidata.as_ref().unwrap().id.as_str(), "Q315036");

        let place = &resp.place;
        assert_eq!(place.kind.as_deref(), Some("zoo"));
        assert_eq!(place.house_number.as_deref(), Some("30"));
        assert_eq!(place.website.as_deref(), Some("https://tiergarten.example"));
        assert_eq!(place.description.as_deref(), Some("zoo in Nuremberg"));

        let hours = place.opening_hours.as_ref().unwrap();
        assert_eq!(hours.len(), 2);
        assert!(hours[1].closed);
        assert_eq!(place.identifiers.len(), 2);
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let req = match_request(serde_json::json!({ "name": "  " }));
        let result = match_place(State(AppState::default()), Json(req)).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn distance_endpoint() {
        let req = DistanceRequest {
            a: "ab".into(),
            b: "ba".into(),
            max: None,
        };
        let Json(resp) = distance(Json(req)).await.unwrap();
        assert_eq!(resp.damerau_levenshtein, 1);
        assert_eq!(resp.levenshtein, 2);

        let req = DistanceRequest {
            a: "a".into(),
            b: "b".into(),
            max: Some(0),
        };
        assert!(distance(Json(req)).await.is_err());
    }

    #[tokio::test]
    async fn long_distance_input_is_rejected() {
        let req = DistanceRequest {
            a: "a".repeat(MAX_INPUT_CHARS + 1),
            b: "a".repeat(MAX_INPUT_CHARS),
            max: None,
        };
        assert!(matches!(
            distance(Json(req)).await,
            Err(AppError::BadRequest { .. })
        ));

        // The limit counts characters, not bytes
        let req = DistanceRequest {
            a: "ü".repeat(MAX_INPUT_CHARS),
            b: "u".repeat(MAX_INPUT_CHARS),
            max: None,
        };
        let Json(resp) = distance(Json(req)).await.unwrap();
        assert_eq!(resp.levenshtein, MAX_INPUT_CHARS);
    }

    #[tokio::test]
    async fn long_names_are_rejected() {
        let req = match_request(serde_json::json!({ "name": "x".repeat(MAX_INPUT_CHARS + 1) }));
        let result = match_place(State(AppState::default()), Json(req)).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));

        let req = match_request(serde_json::json!({
            "name": "Hauptbahnhof",
            "candidates": [
                { "names": ["Hauptbahnhof", "y".repeat(MAX_INPUT_CHARS + 1)], "locator": "entity/Q1" }
            ]
        }));
        let result = match_place(State(AppState::default()), Json(req)).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn bad_request_response() {
        let response = AppError::BadRequest {
            message: "nope".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
