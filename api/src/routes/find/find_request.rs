use serde::Deserialize;

/// Request payload for /api/find.
#[derive(Debug, Deserialize)]
pub struct FindRequest {
    /// Free-text search criteria, e.g. "noise cancelling headphones under $200".
    pub criteria: String,
}
