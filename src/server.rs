use crate::constants::{
    ANY_RETAILER_FALLBACK, API_KEY_ENV, API_URL_ENV, DEFAULT_SERVER_ADDR, GEMINI_API_URL,
    GENERATE_PATH, NO_LOCATION_HINT, SERVER_ADDR_ENV, STYLE_DESCRIPTOR,
};
use crate::design::{DesignRequest, DesignResult, ErrorBody, FurnitureItem};
use crate::gemini::{build_generate_request, GenerateContentRequest, GenerateContentResponse, Part};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use colored::Colorize;
use reqwest::Client;
use std::{env, time::Duration};
use thiserror::Error;

/// Server-side failures, each mapped to a JSON `{ "error": ... }` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("The GEMINI_API_KEY environment variable is not configured on the server.")]
    MissingCredential,
    #[error("The design model request failed: {0}")]
    Upstream(String),
    #[error("The AI returned an invalid item list.")]
    InvalidItemList,
    #[error("The AI could not generate a complete design.")]
    IncompleteDesign,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) | ApiError::InvalidItemList | ApiError::IncompleteDesign => {
                StatusCode::BAD_GATEWAY
            }
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: Option<String>,
    pub api_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        ServerConfig {
            api_key: env::var(API_KEY_ENV).ok(),
            api_url: env::var(API_URL_ENV).unwrap_or_else(|_| GEMINI_API_URL.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub client: Client,
    pub config: ServerConfig,
}

/// Builds the generation instruction around the user's criteria. The text
/// part of the model's answer is constrained to raw JSON in a fixed schema.
pub fn build_instruction(request: &DesignRequest) -> String {
    let stores = if request.preferred_stores.is_empty() {
        ANY_RETAILER_FALLBACK.to_string()
    } else {
        request.preferred_stores.join(", ")
    };
    let location_hint = match &request.location {
        Some(location) => format!(
            "The user is located near latitude {} and longitude {}. \
             Prioritize retailers that are popular and accessible in this region.",
            location.latitude, location.longitude
        ),
        None => NO_LOCATION_HINT.to_string(),
    };

    format!(
        "You are an AI interior designer. Redecorate the space in the provided image \
based on the following criteria.

Criteria:
- Space Type: {space_type}
- Maximum Budget: ${budget}
- Color Palette: {palette}
- Style: {style}
- Preferred Stores: {stores}
- Location Hint: {location_hint}

Your response must contain two parts:
1. An image: the new photorealistic image of the decorated space.
2. Text: a valid JSON array for a shopping list.

The total cost of all items in the shopping list must not exceed the budget.

The text part of your response MUST BE ONLY the raw JSON data. Do not include \
explanations, introductory text, or markdown code blocks such as ```json. The JSON \
must follow this exact schema:
[
  {{
    \"itemName\": \"string\",
    \"price\": number,
    \"retailer\": \"string\",
    \"url\": \"string\"
  }}
]",
        space_type = request.space_type,
        budget = request.budget,
        palette = request.color_palette,
        style = STYLE_DESCRIPTOR,
        stores = stores,
        location_hint = location_hint,
    )
}

/// Trims a model text part down to the JSON payload it hopefully contains.
///
/// Strips surrounding markdown fences, then cuts from the first `{` or `[`
/// to the last `}` or `]` inclusive. When no such boundaries exist (or they
/// are inverted) the input is returned as-is and parsing fails downstream.
pub fn clean_json_text(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_prefix = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let without_fences = without_prefix.strip_suffix("```").unwrap_or(without_prefix);
    let cleaned = without_fences.trim();

    let start = cleaned.find(|c: char| c == '{' || c == '[');
    let end = cleaned.rfind(|c: char| c == '}' || c == ']');
    match (start, end) {
        (Some(start), Some(end)) if start <= end => &cleaned[start..=end],
        _ => cleaned,
    }
}

fn parse_furniture(text: &str) -> Result<Vec<FurnitureItem>, ApiError> {
    serde_json::from_str(clean_json_text(text)).map_err(|e| {
        log::error!("Failed to parse JSON from model response: {}: {}", e, text);
        ApiError::InvalidItemList
    })
}

/// Walks the response parts in whatever order the model emitted them and
/// classifies each one independently: inline data becomes the generated
/// image, text becomes the shopping list. Missing either half fails the
/// whole request.
pub fn assemble_design(response: GenerateContentResponse) -> Result<DesignResult, ApiError> {
    let mut generated_image = None;
    let mut furniture = Vec::new();

    if let Some(candidate) = response.candidates.into_iter().next() {
        for part in candidate.content.parts {
            match part {
                Part::InlineData { inline_data } => {
                    generated_image = Some(format!(
                        "data:{};base64,{}",
                        inline_data.mime_type, inline_data.data
                    ));
                }
                Part::Text { text } => {
                    furniture = parse_furniture(&text)?;
                }
            }
        }
    }

    match generated_image {
        Some(generated_image) if !furniture.is_empty() => Ok(DesignResult {
            generated_image,
            furniture,
        }),
        _ => Err(ApiError::IncompleteDesign),
    }
}

async fn call_gemini(
    client: &Client,
    api_url: &str,
    api_key: &str,
    request: &GenerateContentRequest,
) -> Result<GenerateContentResponse, ApiError> {
    let response = client
        .post(api_url)
        .header("x-goog-api-key", api_key)
        .json(request)
        .send()
        .await
        .map_err(|e| {
            log::error!("Gemini request failed to send: {}", e);
            ApiError::Upstream(e.to_string())
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::error!("Gemini responded with status {}: {}", status, body);
        return Err(ApiError::Upstream(format!("status {}", status)));
    }

    response.json::<GenerateContentResponse>().await.map_err(|e| {
        log::error!("Failed to decode Gemini response: {}", e);
        ApiError::Upstream(e.to_string())
    })
}

/// `POST /api/generate`: one outbound model call per invocation, no retries.
async fn generate_design(
    State(state): State<ServerState>,
    Json(request): Json<DesignRequest>,
) -> Result<Json<DesignResult>, ApiError> {
    let api_key = state
        .config
        .api_key
        .as_deref()
        .ok_or(ApiError::MissingCredential)?;

    let instruction = build_instruction(&request);
    let body = build_generate_request(&request.base64_image, &request.mime_type, &instruction);
    let response = call_gemini(&state.client, &state.config.api_url, api_key, &body).await?;
    let result = assemble_design(response)?;
    Ok(Json(result))
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(GENERATE_PATH, post(generate_design))
        .with_state(state)
}

pub async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    if config.api_key.is_none() {
        log::warn!(
            "{} is not set; design requests will fail until it is configured",
            API_KEY_ENV
        );
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(120))
        .build()?;
    let state = ServerState { client, config };

    let addr = env::var(SERVER_ADDR_ENV).unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    println!(
        "{} listening on {}",
        "decor".bold().green(),
        addr.bold()
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}
