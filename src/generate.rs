//! HTTP client for the hosted generative text service
//!
//! The prompt string is the whole interface: one POST, one prose response.
//! No retry or rate-limit policy; failures surface as [`PlannerError`]
//! variants and the CLI flattens them to a message.

use crate::PlannerError;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, instrument};

/// Environment variable holding the service API key
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent";

/// Client for the generateContent endpoint
pub struct ItineraryClient {
    http_client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl ItineraryClient {
    /// Create a client with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, PlannerError> {
        debug!("Creating itinerary client");
        let http_client = Client::builder().build()?;
        Ok(Self {
            http_client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Create a client from the `GOOGLE_API_KEY` environment variable
    pub fn from_env() -> Result<Self, PlannerError> {
        let api_key =
            std::env::var(API_KEY_VAR).map_err(|_| PlannerError::MissingApiKey(API_KEY_VAR))?;
        Self::new(api_key)
    }

    /// Override the service endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Send the prompt and return the generated itinerary prose
    #[instrument(level = "info", skip(self, prompt))]
    pub async fn generate(&self, prompt: &str) -> Result<String, PlannerError> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        info!(prompt_length = prompt.len(), "Requesting itinerary generation");
        let start_time = std::time::Instant::now();
        let response = self
            .http_client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let request_duration = start_time.elapsed();

        info!(
            status = %status,
            duration_ms = request_duration.as_millis(),
            "Generation request completed"
        );

        let text = response.text().await?;
        if !status.is_success() {
            let message = api_error_message(&text)
                .unwrap_or_else(|| format!("HTTP {} from generation service", status));
            error!(status = %status, error = %message, "Generation request failed");
            return Err(PlannerError::GenerationError(message));
        }

        let itinerary = extract_text(&text)?;
        debug!(itinerary_length = itinerary.len(), "Parsed generated itinerary");
        Ok(itinerary)
    }
}

/// Pull the prose out of a generateContent response body
fn extract_text(body: &str) -> Result<String, PlannerError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    if let Some(error) = response.error {
        return Err(PlannerError::GenerationError(error.message));
    }
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or_else(|| {
            PlannerError::GenerationError("response contained no generated text".to_string())
        })
}

/// Best-effort error message from a non-success response body
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<GenerateResponse>(body)
        .ok()
        .and_then(|response| response.error)
        .map(|error| error.message)
}
