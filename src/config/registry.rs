use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.company-information.service.gov.uk";

/// 公司註冊局 API 的連線設定。
/// 分頁大小與結果上限有對應上游 API 的預設值，通常不用動。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_per_page() -> usize {
    100
}

fn default_max_results() -> usize {
    100
}

fn default_page_delay_ms() -> u64 {
    200
}

fn default_timeout_seconds() -> u64 {
    30
}

impl RegistryConfig {
    pub fn from_env() -> Result<Self> {
        let api_key =
            env::var("COMPANIES_HOUSE_API_KEY").map_err(|_| ScoutError::MissingConfigError {
                field: "COMPANIES_HOUSE_API_KEY".to_string(),
            })?;

        Ok(Self {
            api_key,
            base_url: env::var("COMPANIES_HOUSE_BASE_URL").unwrap_or_else(|_| default_base_url()),
            per_page: default_per_page(),
            max_results: default_max_results(),
            page_delay_ms: default_page_delay_ms(),
            timeout_seconds: default_timeout_seconds(),
        })
    }

    /// 共用的 HTTP client；上游沒掛逾時，這裡統一掛在 client 邊界
    pub fn client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .build()?;
        Ok(client)
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_resolved_secret("registry.api_key", &self.api_key)?;
        validation::validate_url("registry.base_url", &self.base_url)?;
        validation::validate_range("registry.per_page", self.per_page, 1, 100)?;
        validation::validate_range("registry.max_results", self.max_results, 1, 10_000)?;
        validation::validate_range("registry.timeout_seconds", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}
