use serde::Deserialize;

/// Request payload for /api/compare.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    /// First product name.
    pub product1: String,
    /// Second product name.
    pub product2: String,
}
