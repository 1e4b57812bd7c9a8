//! Gemini-backed menu parser.
//!
//! Sends menu text or an inline image to the Generative Language API and asks for a
//! JSON array of `{name, category, description}` objects, constrained by a response
//! schema so the reply can be parsed directly.

use crate::{
    config::settings::IngestionSettings,
    core::{
        ingestion::{self, MenuParser, MenuSource},
        model::Meal,
    },
    errors::{Error, Result},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, error};

/// Prompt sent alongside menu images.
const IMAGE_PROMPT: &str = "Extract all meal items from this menu image.";

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    settings: IngestionSettings,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    /// Creates a client with an explicit API key.
    #[must_use]
    pub fn new(api_key: String, settings: IngestionSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            settings,
        }
    }

    /// Creates a client using the `GEMINI_API_KEY` environment variable.
    pub fn from_env(settings: IngestionSettings) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")?;
        Ok(Self::new(api_key, settings))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.model
        )
    }

    async fn generate(&self, source: &MenuSource) -> Result<Vec<Meal>> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(source))
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateContentResponse = response.json().await?;
        let text = response_text(&body).ok_or_else(|| Error::Ingestion {
            message: "response contained no text".to_string(),
        })?;
        debug!("Gemini returned {} chars", text.len());

        ingestion::parse_meal_list(&text)
    }
}

impl MenuParser for GeminiClient {
    async fn parse_menu(&self, source: &MenuSource) -> Vec<Meal> {
        match self.generate(source).await {
            Ok(meals) => meals,
            Err(e) => {
                error!("Failed to parse menu with Gemini: {e}");
                Vec::new()
            }
        }
    }
}

fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING", "description": "Name of the meal" },
                "category": { "type": "STRING", "description": "Category like Main, Side, Dessert" },
                "description": { "type": "STRING", "description": "Short description" }
            },
            "required": ["name"]
        }
    })
}

/// Builds the `generateContent` request for a menu source.
fn request_body(source: &MenuSource) -> Value {
    let parts = match source {
        MenuSource::Text(text) => json!([{ "text": text }]),
        MenuSource::Image { bytes, media_type } => json!([
            { "text": IMAGE_PROMPT },
            { "inlineData": { "mimeType": media_type, "data": STANDARD.encode(bytes) } }
        ]),
    };

    json!({
        "contents": [{ "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

/// Concatenates the text parts of the first candidate.
fn response_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_text_request_body() {
        let body = request_body(&MenuSource::Text("1. Soup 2. Salad".to_string()));

        assert_eq!(body["contents"][0]["parts"][0]["text"], "1. Soup 2. Salad");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["items"]["required"][0],
            "name"
        );
    }

    #[test]
    fn test_image_request_body_is_base64_inline_data() {
        let body = request_body(&MenuSource::Image {
            bytes: b"menu".to_vec(),
            media_type: "image/jpeg".to_string(),
        });

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], IMAGE_PROMPT);
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["inlineData"]["data"], "bWVudQ==");
    }

    #[test]
    fn test_endpoint_joins_base_and_model() {
        let settings = IngestionSettings {
            model: "gemini-test".to_string(),
            api_base: "http://localhost:1234/v1beta/".to_string(),
        };
        let client = GeminiClient::new("key".to_string(), settings);
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"[{\"name\":"},{"text":"\"Soup\"}]"}]}}]}"#,
        )
        .unwrap();

        let text = response_text(&response).unwrap();
        let meals = ingestion::parse_meal_list(&text).unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].name, "Soup");
    }

    #[test]
    fn test_response_text_missing() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response_text(&response).is_none());
    }

    #[tokio::test]
    async fn test_unreachable_service_yields_no_meals() {
        let settings = IngestionSettings {
            model: "gemini-test".to_string(),
            api_base: "http://127.0.0.1:9/v1beta".to_string(),
        };
        let client = GeminiClient::new("key".to_string(), settings);

        let meals = client
            .parse_menu(&MenuSource::Text("Soup".to_string()))
            .await;
        assert!(meals.is_empty());
    }
}
