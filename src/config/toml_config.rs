use crate::config::email::EmailConfig;
use crate::config::registry::RegistryConfig;
use crate::domain::terms::CURATED_SEARCH_TERMS;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 整份 TOML 設定檔的結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    pub registry: RegistryConfig,
    #[serde(default)]
    pub search: SearchSection,
    pub email: Option<EmailConfig>,
    #[serde(default)]
    pub load: LoadSection,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSection {
    pub default_term: Option<String>,
    pub terms: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSection {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
}

impl Default for LoadSection {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            output_formats: default_output_formats(),
        }
    }
}

fn default_output_path() -> String {
    "./output".to_string()
}

fn default_output_formats() -> Vec<String> {
    vec!["csv".to_string(), "json".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
}

impl ScoutConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScoutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 搜尋詞清單；設定檔沒有自訂就用內建的理財顧問詞表
    pub fn search_terms(&self) -> Vec<String> {
        match &self.search.terms {
            Some(terms) if !terms.is_empty() => terms.clone(),
            _ => CURATED_SEARCH_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

/// 把 ${VAR} 換成環境變數的值，沒設定就原樣留著
/// （之後的驗證會把留下來的佔位符當缺漏抓出來）
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl Validate for ScoutConfig {
    fn validate(&self) -> Result<()> {
        self.registry.validate()?;

        validation::validate_path("load.output_path", &self.load.output_path)?;

        let valid_formats = ["csv", "json"];
        for format in &self.load.output_formats {
            if !valid_formats.contains(&format.as_str()) {
                return Err(ScoutError::InvalidConfigValueError {
                    field: "load.output_formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        // [email] 不在這裡驗，缺金鑰只影響草擬信件的指令
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_config() {
        let toml_content = r#"
[registry]
api_key = "test-key"

[search]
default_term = "Financial Advi"

[load]
output_path = "./leads"
output_formats = ["csv"]
"#;

        let config = ScoutConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.registry.api_key, "test-key");
        assert_eq!(config.registry.per_page, 100);
        assert_eq!(config.registry.page_delay_ms, 200);
        assert_eq!(config.search.default_term.as_deref(), Some("Financial Advi"));
        assert_eq!(config.load.output_path, "./leads");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SCOUT_TEST_REGISTRY_KEY", "key-from-env");

        let toml_content = r#"
[registry]
api_key = "${SCOUT_TEST_REGISTRY_KEY}"
"#;

        let config = ScoutConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.registry.api_key, "key-from-env");

        std::env::remove_var("SCOUT_TEST_REGISTRY_KEY");
    }

    #[test]
    fn test_unresolved_env_var_fails_validation() {
        let toml_content = r#"
[registry]
api_key = "${SCOUT_TEST_UNSET_VARIABLE}"
"#;

        let config = ScoutConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.registry.api_key, "${SCOUT_TEST_UNSET_VARIABLE}");
        assert!(matches!(
            config.validate(),
            Err(ScoutError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_unsupported_output_format() {
        let toml_content = r#"
[registry]
api_key = "test-key"

[load]
output_formats = ["xml"]
"#;

        let config = ScoutConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_search_terms_fall_back_to_curated_list() {
        let toml_content = r#"
[registry]
api_key = "test-key"
"#;

        let config = ScoutConfig::from_toml_str(toml_content).unwrap();
        let terms = config.search_terms();
        assert_eq!(terms.len(), 20);
        assert!(terms.iter().any(|t| t == "Wealth Management"));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[registry]
api_key = "file-key"

[monitoring]
enabled = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = ScoutConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.registry.api_key, "file-key");
        assert!(config.monitoring_enabled());
    }
}
