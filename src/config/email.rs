use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// 招募信草擬用的 chat-completions 端點設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_endpoint() -> String {
    DEFAULT_CHAT_ENDPOINT.to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    600
}

impl EmailConfig {
    /// 金鑰沒設就回 EmailNotConfigured，讓呼叫端決定要不要降級
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| ScoutError::EmailNotConfigured)?;

        Ok(Self {
            api_key,
            endpoint: env::var("OPENAI_CHAT_ENDPOINT").unwrap_or_else(|_| default_endpoint()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| default_model()),
            max_tokens: default_max_tokens(),
        })
    }
}

impl Validate for EmailConfig {
    fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() || self.api_key.starts_with("${") {
            return Err(ScoutError::EmailNotConfigured);
        }
        validation::validate_url("email.endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("email.model", &self.model)?;
        Ok(())
    }
}
