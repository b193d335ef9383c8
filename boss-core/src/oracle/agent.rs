//! Claude-backed oracle.

use super::prompts::{build_boss_name_prompt, build_question_prompt};
use super::{Oracle, QuestionRequest};
use crate::question::GenerationError;
use async_trait::async_trait;
use claude::{Claude, Request};
use std::time::Duration;

const BOSS_NAME_MAX_TOKENS: usize = 64;

/// Configuration for the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleConfig {
    /// The model to use (defaults to the client's model).
    pub model: Option<String>,

    /// Maximum tokens for a question reply.
    pub max_tokens: usize,

    /// Temperature for generation.
    pub temperature: Option<f32>,

    /// How long to wait for any single generator call.
    pub timeout: Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 256,
            temperature: Some(0.7),
            timeout: Duration::from_secs(30),
        }
    }
}

impl OracleConfig {
    /// Defaults overridden by `BOSS_MODEL` and `BOSS_TIMEOUT_SECS`.
    ///
    /// An unparsable timeout is ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(model) = std::env::var("BOSS_MODEL") {
            if !model.trim().is_empty() {
                config.model = Some(model.trim().to_string());
            }
        }
        if let Some(secs) = std::env::var("BOSS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs.max(1));
        }
        config
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Generates boss dialogue with Claude.
pub struct ClaudeOracle {
    client: Claude,
    config: OracleConfig,
}

impl ClaudeOracle {
    pub fn new(client: Claude, config: OracleConfig) -> Self {
        Self { client, config }
    }

    /// Create an oracle from the ANTHROPIC_API_KEY environment variable.
    pub fn from_env(config: OracleConfig) -> Result<Self, GenerationError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| claude::Error::NoApiKey)?;
        let client = Claude::with_timeout(api_key, config.timeout)?;
        Ok(Self::new(client, config))
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    fn request(&self, prompt: String, max_tokens: usize) -> Request {
        let mut request = Request::user(prompt).with_max_tokens(max_tokens);
        if let Some(ref model) = self.config.model {
            request = request.with_model(model);
        }
        if let Some(temp) = self.config.temperature {
            request = request.with_temperature(temp);
        }
        request
    }
}

#[async_trait]
impl Oracle for ClaudeOracle {
    async fn generate_question(&self, request: &QuestionRequest) -> Result<String, GenerationError> {
        let prompt = build_question_prompt(request);
        let reply = self
            .client
            .prompt(self.request(prompt, self.config.max_tokens))
            .await?;
        Ok(reply)
    }

    async fn generate_boss_name(&self, topic: &str) -> Result<String, GenerationError> {
        let prompt = build_boss_name_prompt(topic);
        let reply = self
            .client
            .prompt(self.request(prompt, BOSS_NAME_MAX_TOKENS))
            .await?;
        Ok(reply)
    }
}
