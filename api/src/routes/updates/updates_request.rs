use serde::Deserialize;

/// Request payload for /api/updates.
#[derive(Debug, Deserialize)]
pub struct UpdatesRequest {
    /// Product category to fetch news for, e.g. "smartphones".
    pub category: String,
}
