//! TeamCity test harness CLI
//!
//! Small operator entry point: check that the configured super user can
//! reach the server, or print a generated test data model.

use clap::{Parser, Subcommand};
use teamcity_harness::{
    Specifications, TestDataGenerator,
    config::{LogFormat, LoggingConfig, load_config},
    requests::AuthRequest,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// TeamCity test harness - test data and request verification for the TeamCity REST API
#[derive(Parser, Debug)]
#[command(name = "teamcity-harness")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "TEAMCITY_HARNESS_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "TEAMCITY_HARNESS_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Authenticate as the super user and print a CSRF token
    Probe,
    /// Print a freshly generated test data model as JSON
    Generate {
        /// Number of models to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
}

fn init_logging(logging: &LoggingConfig, level_override: Option<&str>) {
    let level = level_override.unwrap_or(&logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(&config.logging, args.log_level.as_deref());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        server = %config.server.base_url(),
        "Starting TeamCity harness"
    );

    match args.command {
        Command::Probe => {
            let specs = Specifications::new(&config.server)?;
            let spec = specs
                .super_user_spec()
                .inspect_err(|e| error!(error = %e, "Super user is not configured"))?;

            let token = AuthRequest::new(spec)
                .csrf_token()
                .await
                .inspect_err(|e| error!(error = %e, "Super user authentication failed"))?;

            info!("Super user authenticated");
            println!("{token}");
        }
        Command::Generate { count } => {
            let models: Vec<_> = (0..count).map(|_| TestDataGenerator::generate()).collect();
            let output = if count == 1 {
                serde_json::to_string_pretty(&models[0])?
            } else {
                serde_json::to_string_pretty(&models)?
            };
            println!("{output}");
        }
    }

    Ok(())
}
