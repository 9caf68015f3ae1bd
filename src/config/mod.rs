pub mod cli;
pub mod email;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod registry;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "succession-scout")]
#[command(about = "Find companies whose youngest director is approaching retirement age")]
pub struct CliConfig {
    /// 要查的關鍵字；沒給就用設定檔的 default_term
    #[arg(long)]
    pub term: Option<String>,

    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    #[arg(long, help = "List the curated search terms and exit")]
    pub list_terms: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log system resource usage during the run")]
    pub monitor: bool,
}
