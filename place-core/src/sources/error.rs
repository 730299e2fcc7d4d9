//! Source decoding error types.

/// Errors that can occur when decoding data source payloads.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Payload was not the expected JSON shape
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A binding's distance could not be read as kilometers
    #[error("invalid distance {value:?} for {item}")]
    InvalidDistance { item: String, value: String },
}
