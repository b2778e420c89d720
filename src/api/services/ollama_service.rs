//! Recipe generation backed by an Ollama server.
//!
//! Builds a prompt from the tracked ingredients, calls `/api/generate` once
//! (no streaming, JSON output) and parses the model's reply into a
//! [`RecipeResponse`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::OllamaConfig;
use crate::models::{Ingredient, RecipeResponse};

/// Listed in place of ingredients when the refrigerator is empty.
pub const NO_INGREDIENTS_PLACEHOLDER: &str = "食材がありません";

const INGREDIENTS_MARKER: &str = "{ingredients}";

const PROMPT_TEMPLATE: &str = r#"あなたはプロの料理人兼管理栄養士です。以下の食材を使って作れる、美味しくて簡単な夕食の献立を3つ提案してください。
それぞれの献立には、料理名、簡単な作り方、そして不足している食材（もしあれば）を記載してください。
回答は必ずJSON形式で、以下のフォーマットに従ってください。

{
  "suggestions": [
    {
      "name": "料理名",
      "steps": ["手順1", "手順2", "手順3"],
      "missing_items": ["不足している食材1"]
    }
  ]
}

# 利用可能な食材
{ingredients}"#;

/// Failure modes of a generation request.
#[derive(Debug, Clone, Error)]
pub enum RecipeGenerationError {
    /// The request could not be sent or did not complete.
    #[error("connection to generation backend failed: {message}")]
    Transport { message: String, timed_out: bool },
    /// The backend answered with a non-success status.
    #[error("generation backend returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    /// The outer response envelope was not valid JSON of the expected shape.
    #[error("failed to parse generation backend response: {0}")]
    MalformedEnvelope(String),
    /// The model's text did not contain the expected recipe JSON.
    #[error("failed to parse recipe response: {0}")]
    MalformedContent(String),
}

impl RecipeGenerationError {
    /// Whether the backend itself is unreachable or unhealthy.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            RecipeGenerationError::Transport { .. } | RecipeGenerationError::UpstreamStatus { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            RecipeGenerationError::Transport {
                timed_out: true,
                ..
            }
        )
    }
}

impl From<reqwest::Error> for RecipeGenerationError {
    fn from(err: reqwest::Error) -> Self {
        RecipeGenerationError::Transport {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

/// Produces recipe suggestions for a set of ingredients.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    async fn generate(
        &self,
        ingredients: &[Ingredient],
    ) -> Result<RecipeResponse, RecipeGenerationError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    #[allow(dead_code)]
    created_at: Option<DateTime<Utc>>,
    response: String,
    #[serde(default)]
    done: bool,
}

/// Ollama `/api/generate` client.
pub struct OllamaService {
    client: Client,
    generate_url: Url,
    model: String,
}

impl OllamaService {
    /// Create a client with the configured endpoint, model and timeout.
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        let generate_url = config
            .generate_url()
            .with_context(|| format!("Invalid Ollama endpoint: {}", config.endpoint))?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            generate_url,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl RecipeGenerator for OllamaService {
    async fn generate(
        &self,
        ingredients: &[Ingredient],
    ) -> Result<RecipeResponse, RecipeGenerationError> {
        let prompt = build_prompt(ingredients);
        let request = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
            format: "json",
        };

        debug!(
            model = %self.model,
            ingredient_count = ingredients.len(),
            "Requesting recipe suggestions"
        );

        let response = self
            .client
            .post(self.generate_url.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Generation backend returned an error");
            return Err(RecipeGenerationError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let envelope: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| RecipeGenerationError::MalformedEnvelope(e.to_string()))?;

        if !envelope.done {
            debug!(model = %envelope.model, "Generation backend reported done=false");
        }

        serde_json::from_str(&envelope.response)
            .map_err(|e| RecipeGenerationError::MalformedContent(e.to_string()))
    }
}

/// Render ingredients as `name(quantity), name, ...`.
pub fn format_ingredients(ingredients: &[Ingredient]) -> String {
    if ingredients.is_empty() {
        return NO_INGREDIENTS_PLACEHOLDER.to_string();
    }

    ingredients
        .iter()
        .map(|ingredient| {
            if ingredient.quantity.is_empty() {
                ingredient.name.clone()
            } else {
                format!("{}({})", ingredient.name, ingredient.quantity)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Full prompt sent to the model.
pub fn build_prompt(ingredients: &[Ingredient]) -> String {
    PROMPT_TEMPLATE.replace(INGREDIENTS_MARKER, &format_ingredients(ingredients))
}
