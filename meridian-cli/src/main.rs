//! Meridian CLI
//!
//! Command-line interface for the Meridian platform: delivery pipelines and
//! IAM policy management.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Commands, handle_command};
use config::{Config, Credentials};

#[derive(Parser)]
#[command(name = "meridian")]
#[command(about = "Meridian platform CLI", long_about = None)]
struct Cli {
    /// Delivery Pipeline service URL
    #[arg(
        long,
        env = "MERIDIAN_PIPELINES_URL",
        default_value = "https://pipelines.meridian.example.com"
    )]
    pipelines_url: String,

    /// IAM Policy service URL
    #[arg(
        long,
        env = "MERIDIAN_IAM_URL",
        default_value = "https://iam.meridian.example.com"
    )]
    iam_url: String,

    /// Pre-acquired bearer token
    #[arg(long, env = "MERIDIAN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// API key, exchanged for tokens at the token endpoint
    #[arg(long, env = "MERIDIAN_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Token endpoint used with --api-key
    #[arg(
        long,
        env = "MERIDIAN_TOKEN_URL",
        default_value = "https://iam.meridian.example.com/identity/token"
    )]
    token_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let credentials = match (cli.token, cli.api_key) {
        (Some(token), _) => Credentials::Token(token),
        (None, Some(api_key)) => Credentials::ApiKey(api_key),
        (None, None) => anyhow::bail!(
            "no credentials: set MERIDIAN_TOKEN or MERIDIAN_API_KEY (or pass --token/--api-key)"
        ),
    };

    let config = Config {
        pipelines_url: cli.pipelines_url,
        iam_url: cli.iam_url,
        token_url: cli.token_url,
        credentials,
    };

    handle_command(cli.command, &config).await
}
