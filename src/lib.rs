pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::cli::LocalStorage;
#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};
pub use config::registry::RegistryConfig;
pub use config::toml_config::ScoutConfig;

pub use core::search::{SearchLimits, SearchPipeline};
pub use domain::model::{CompanyResult, SearchResponse};
pub use utils::error::{Result, ScoutError};
