use serde::{Deserialize, Serialize};

/// Coordinates attached to a request when the user's location is available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of `POST /api/generate`. Built once per submission, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    pub base64_image: String,
    pub mime_type: String,
    pub budget: f64,
    pub space_type: String,
    pub color_palette: String,
    pub preferred_stores: Vec<String>,
    pub location: Option<Location>,
}

/// One entry of the shopping list parsed from the model's text output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureItem {
    pub item_name: String,
    pub price: f64,
    pub retailer: String,
    pub url: String,
}

/// Successful response: both fields must be present and `furniture`
/// non-empty, otherwise the server fails the whole request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignResult {
    pub generated_image: String,
    pub furniture: Vec<FurnitureItem>,
}

/// Error body returned by the server on any non-200 outcome.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
