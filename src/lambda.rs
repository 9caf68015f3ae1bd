#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use succession_scout::config::lambda::{LambdaConfig, S3Storage};
#[cfg(feature = "lambda")]
use succession_scout::core::export;
#[cfg(feature = "lambda")]
use succession_scout::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use succession_scout::{RegistryConfig, ScoutError, SearchPipeline};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub search_term: String,
    pub s3_bucket: Option<String>,
    pub s3_prefix: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub message: String,
    pub total_found: usize,
    pub total_returned: usize,
    pub output_files: Vec<String>,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Starting search Lambda");

    // 事件帶了 bucket/prefix 就蓋掉環境變數
    if let Some(bucket) = &event.payload.s3_bucket {
        std::env::set_var("S3_BUCKET", bucket);
    }
    if let Some(prefix) = &event.payload.s3_prefix {
        std::env::set_var("S3_PREFIX", prefix);
    }

    let lambda_config = LambdaConfig::from_env()
        .and_then(|config| {
            config.validate()?;
            Ok(config)
        })
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let registry_config = RegistryConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .region(Region::new(lambda_config.s3_region.clone()))
        .build();
    let s3_client = S3Client::from_conf(s3_config);

    let storage = S3Storage::new(
        s3_client,
        lambda_config.s3_bucket.clone(),
        lambda_config.s3_prefix.clone(),
    );

    let pipeline = SearchPipeline::over_registry(registry_config)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    match pipeline.search(&event.payload.search_term).await {
        Ok(response) => {
            let formats = vec!["csv".to_string(), "json".to_string()];
            let output_files = export::write_exports(&storage, &response, &formats)
                .await
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

            tracing::info!(
                "Search Lambda done: {} of {} returned",
                response.total_returned,
                response.total_found
            );

            Ok(Response {
                message: "Search completed successfully".to_string(),
                total_found: response.total_found,
                total_returned: response.total_returned,
                output_files,
            })
        }
        // 查無結果不是故障，回空摘要
        Err(ScoutError::NoCompaniesFound) => Ok(Response {
            message: "No companies found matching your search criteria".to_string(),
            total_found: 0,
            total_returned: 0,
            output_files: Vec::new(),
        }),
        Err(e) => Err(Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    }
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}

#[cfg(not(feature = "lambda"))]
fn main() {
    eprintln!("the lambda binary requires the `lambda` feature");
}
