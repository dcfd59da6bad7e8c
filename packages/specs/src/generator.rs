// ABOUTME: Generation adapter turning validated requests into validated AI output
// ABOUTME: One attempt per call; every failure collapses to an opaque error

use specforge_ai::{AiResponse, AiService};
use tracing::{error, info};

use crate::ai_types::AiSpecOutput;
use crate::error::{Result, SpecError};
use crate::prompts;
use crate::validator::GenerateSpecRequest;

/// Spec generator backed by the structured-generation service.
#[derive(Clone)]
pub struct SpecGenerator {
    service: AiService,
}

impl SpecGenerator {
    pub fn new(service: AiService) -> Self {
        Self { service }
    }

    /// Create a generator configured from the environment.
    pub fn from_env() -> Self {
        Self::new(AiService::new())
    }

    /// Generate a structured spec draft for a validated request.
    ///
    /// Generation is best-effort and user-retriable: no retry, no fallback
    /// model, no caching of identical inputs. The underlying cause is
    /// logged; callers only ever see the fixed generation-failure message.
    pub async fn generate(&self, request: &GenerateSpecRequest) -> Result<AiSpecOutput> {
        info!(
            "Generating specification draft for '{}' (model: {})",
            request.title,
            self.service.model()
        );

        let prompt = prompts::spec_prompt(request);
        let system = Some(prompts::system_prompt());

        let response: AiResponse<AiSpecOutput> = self
            .service
            .generate_structured(prompt, system)
            .await
            .map_err(|e| {
                error!("Error generating spec from AI: {}", e);
                SpecError::Generation(e.to_string())
            })?;

        info!(
            "Generated specification draft (tokens: {})",
            response.usage.total_tokens()
        );

        Ok(response.data)
    }
}
