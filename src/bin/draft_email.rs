use clap::Parser;
use succession_scout::config::email::EmailConfig;
use succession_scout::config::toml_config::ScoutConfig;
use succession_scout::core::email::ChatEmailDrafter;
use succession_scout::domain::model::EmailRequest;
use succession_scout::domain::ports::EmailDrafter;
use succession_scout::utils::logger;
use succession_scout::utils::validation::Validate;
use succession_scout::ScoutError;

/// 針對單一公司草擬一封招募信，結果以 JSON 印出
#[derive(Debug, Parser)]
#[command(name = "draft-email")]
#[command(about = "Draft a recruitment email for a company's director")]
struct DraftArgs {
    #[arg(long)]
    company_name: String,

    #[arg(long)]
    company_number: Option<String>,

    #[arg(long)]
    director_name: Option<String>,

    #[arg(long)]
    director_age: Option<i32>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long, help = "Extra instructions passed through to the model")]
    instructions: Option<String>,

    #[arg(long, help = "Path to a TOML config file with an [email] section")]
    config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

fn resolve_email_config(args: &DraftArgs) -> succession_scout::Result<EmailConfig> {
    let config = match &args.config {
        Some(path) => ScoutConfig::from_file(path)?
            .email
            .ok_or(ScoutError::EmailNotConfigured)?,
        None => EmailConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = DraftArgs::parse();

    logger::init_cli_logger(args.verbose);

    let email_config = match resolve_email_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    let request = EmailRequest {
        company_name: args.company_name.clone(),
        company_number: args.company_number.clone(),
        director_name: args.director_name.clone(),
        director_age: args.director_age,
        address: args.address.clone(),
        custom_instructions: args.instructions.clone(),
    };

    let drafter = ChatEmailDrafter::new(email_config);

    match drafter.draft(&request).await {
        Ok(draft) => {
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        Err(e) => {
            tracing::error!("❌ Email draft failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }

    Ok(())
}
