#[cfg(feature = "lambda")]
use crate::domain::ports::Storage;
#[cfg(feature = "lambda")]
use crate::utils::error::{Result, ScoutError};
#[cfg(feature = "lambda")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub s3_region: String,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            s3_bucket: env::var("S3_BUCKET").map_err(|_| ScoutError::MissingConfigError {
                field: "S3_BUCKET".to_string(),
            })?,
            s3_prefix: env::var("S3_PREFIX").unwrap_or_else(|_| "scout-output".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "eu-west-2".to_string()),
        })
    }
}

#[cfg(feature = "lambda")]
impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;
        validation::validate_non_empty_string("s3_prefix", &self.s3_prefix)?;
        validation::validate_non_empty_string("s3_region", &self.s3_region)?;

        if !self
            .s3_region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ScoutError::InvalidConfigValueError {
                field: "s3_region".to_string(),
                value: self.s3_region.clone(),
                reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                    .to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(feature = "lambda")]
fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(ScoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        || bucket_name.starts_with('-')
        || bucket_name.ends_with('-')
    {
        return Err(ScoutError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name may only use lowercase letters, numbers, hyphens and dots, \
and cannot start or end with a hyphen"
                .to_string(),
        });
    }

    Ok(())
}

/// 搜尋結果上傳 S3 用的儲存端
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
    prefix: String,
}

#[cfg(feature = "lambda")]
impl S3Storage {
    pub fn new(client: S3Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix,
        }
    }

    fn key_for(&self, path: &str) -> String {
        if self.prefix.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.prefix.trim_end_matches('/'), path)
        }
    }
}

#[cfg(feature = "lambda")]
impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(self.key_for(path))
            .send()
            .await
            .map_err(|e| ScoutError::ProcessingError {
                message: format!("Failed to read from S3: {}", e),
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| ScoutError::ProcessingError {
                message: format!("Failed to collect S3 body: {}", e),
            })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(self.key_for(path))
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| ScoutError::ProcessingError {
                message: format!("Failed to write to S3: {}", e),
            })?;

        Ok(())
    }
}
