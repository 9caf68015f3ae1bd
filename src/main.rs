#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use succession_scout::config::toml_config::{LoadSection, ScoutConfig, SearchSection};
#[cfg(feature = "cli")]
use succession_scout::core::export;
#[cfg(feature = "cli")]
use succession_scout::utils::validation::Validate;
#[cfg(feature = "cli")]
use succession_scout::utils::{logger, monitor::RunMonitor};
#[cfg(feature = "cli")]
use succession_scout::{CliConfig, LocalStorage, RegistryConfig, SearchPipeline};

#[cfg(feature = "cli")]
fn resolve_config(args: &CliConfig) -> succession_scout::Result<ScoutConfig> {
    match &args.config {
        Some(path) => ScoutConfig::from_file(path),
        None => Ok(ScoutConfig {
            registry: RegistryConfig::from_env()?,
            search: SearchSection::default(),
            email: None,
            load: LoadSection {
                output_path: args.output_path.clone(),
                output_formats: args.formats.clone(),
            },
            monitoring: None,
        }),
    }
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    logger::init_cli_logger(args.verbose);

    if args.list_terms {
        // 有設定檔就列它自訂的詞表，否則列內建的
        let terms: Vec<String> = match &args.config {
            Some(path) => ScoutConfig::from_file(path)?.search_terms(),
            None => succession_scout::domain::terms::CURATED_SEARCH_TERMS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        };
        for term in terms {
            println!("{}", term);
        }
        return Ok(());
    }

    tracing::info!("Starting succession-scout");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    // 讀設定並先驗一輪，有問題就不碰上游 API
    let config = match resolve_config(&args).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(3);
        }
    };

    let term = args
        .term
        .clone()
        .or_else(|| config.search.default_term.clone())
        .unwrap_or_default();

    let monitor = RunMonitor::new(args.monitor || config.monitoring_enabled());
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = match SearchPipeline::over_registry(config.registry.clone()) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(3);
        }
    };

    monitor.log_stats("startup");

    match pipeline.search(&term).await {
        Ok(response) => {
            monitor.log_stats("search complete");

            tracing::info!(
                "✅ {} of {} matching companies have a director aged 60+",
                response.total_returned,
                response.total_found
            );

            let storage = LocalStorage::new(config.load.output_path.clone());
            let written =
                export::write_exports(&storage, &response, &config.load.output_formats).await?;

            println!(
                "✅ Found {} companies with a youngest director aged 60+ (of {} matches)",
                response.total_returned, response.total_found
            );
            if response.results.is_empty() {
                println!("No companies found matching your search criteria");
            }
            for file in &written {
                println!("📁 Output saved to: {}/{}", config.load.output_path, file);
            }

            monitor.log_final_stats();
        }
        Err(e) => {
            tracing::error!(
                "❌ Search failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 退出碼照嚴重度分級
            let exit_code = match e.severity() {
                succession_scout::utils::error::ErrorSeverity::Low => 0,
                succession_scout::utils::error::ErrorSeverity::Medium => 2,
                succession_scout::utils::error::ErrorSeverity::High => 1,
                succession_scout::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("succession-scout was built without the `cli` feature");
}
