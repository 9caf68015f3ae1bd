use crate::utils::error::{Result, ScoutError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScoutError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ScoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 設定檔的 ${VAR} 佔位符沒被環境變數換掉時視為缺漏
pub fn validate_resolved_secret(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() || value.starts_with("${") {
        return Err(ScoutError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ScoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("registry.base_url", "https://example.com").is_ok());
        assert!(validate_url("registry.base_url", "http://example.com").is_ok());
        assert!(validate_url("registry.base_url", "").is_err());
        assert!(validate_url("registry.base_url", "not-a-url").is_err());
        assert!(validate_url("registry.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_resolved_secret() {
        assert!(validate_resolved_secret("registry.api_key", "abc123").is_ok());
        assert!(validate_resolved_secret("registry.api_key", "").is_err());
        // 環境變數沒設定時 substitute 會留下原樣的佔位符
        assert!(validate_resolved_secret("registry.api_key", "${COMPANIES_HOUSE_API_KEY}").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("registry.per_page", 100usize, 1, 100).is_ok());
        assert!(validate_range("registry.per_page", 0usize, 1, 100).is_err());
        assert!(validate_range("registry.per_page", 101usize, 1, 100).is_err());
    }
}
