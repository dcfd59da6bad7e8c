// ABOUTME: AI service for making structured generation calls to an Ollama-compatible API
// ABOUTME: Handles request construction, response parsing, and usage tracking

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

const DEFAULT_HOST: &str = "https://api.ollama.com";
const DEFAULT_MODEL: &str = "gpt-oss:120b-cloud";

const REQUEST_TIMEOUT_SECS: u64 = 600;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum AiServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

pub type AiServiceResult<T> = Result<T, AiServiceError>;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

/// Relevant subset of the Ollama generate response. Older servers omit the
/// token counters, so both default to zero.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

#[derive(Debug)]
pub struct AiResponse<T> {
    pub data: T,
    pub usage: Usage,
}

/// AI service for making structured generation calls
#[derive(Clone)]
pub struct AiService {
    client: Client,
    host: String,
    api_key: Option<String>,
    model: String,
}

impl AiService {
    /// Create HTTP client with timeout configuration
    fn create_client() -> Client {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client")
    }

    /// Creates a new AI service instance from the environment.
    /// Host, API key, and model come from OLLAMA_HOST, OLLAMA_API_KEY,
    /// and OLLAMA_MODEL; hosted defaults apply when unset.
    pub fn new() -> Self {
        let host = env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let api_key = env::var("OLLAMA_API_KEY").ok();
        if api_key.is_none() {
            info!("OLLAMA_API_KEY not set - requests will be unauthenticated");
        }

        let model = env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        if model != DEFAULT_MODEL {
            info!("Using custom generation model: {}", model);
        }

        Self {
            client: Self::create_client(),
            host,
            api_key,
            model,
        }
    }

    /// Creates a new AI service instance against a specific host
    pub fn with_host_and_key(host: String, api_key: Option<String>) -> Self {
        let model = env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            client: Self::create_client(),
            host,
            api_key,
            model,
        }
    }

    /// Override the model used by this service
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Get the model being used by this service
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a structured generation call.
    /// The prompt should request JSON output; the model response is parsed
    /// into `T` and any deviation from that shape is an error.
    pub async fn generate_structured<T: for<'de> Deserialize<'de>>(
        &self,
        prompt: String,
        system_prompt: Option<String>,
    ) -> AiServiceResult<AiResponse<T>> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
            format: "json",
            system: system_prompt.as_deref(),
        };

        info!(
            "Making generation request: model={}, timeout={}s",
            self.model, REQUEST_TIMEOUT_SECS
        );

        let url = format!("{}/api/generate", self.host.trim_end_matches('/'));
        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Generation API returned {}: {}", status, body);
            return Err(AiServiceError::ApiError(format!("{}: {}", status, body)));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiServiceError::ParseError(e.to_string()))?;

        let data: T = serde_json::from_str(&body.response).map_err(|e| {
            AiServiceError::ParseError(format!("model returned invalid JSON: {}", e))
        })?;

        Ok(AiResponse {
            data,
            usage: Usage {
                input_tokens: body.prompt_eval_count,
                output_tokens: body.eval_count,
            },
        })
    }
}

impl Default for AiService {
    fn default() -> Self {
        Self::new()
    }
}
