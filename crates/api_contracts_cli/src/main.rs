mod commands;
mod output;

use anyhow::Result;
use api_contracts_core::Direction;
use clap::{Parser, Subcommand, ValueEnum};
use output::OutputFormat;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "apicheck")]
#[command(version, about = "Check API payloads against contract registries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical path of a request URL
    Normalize {
        /// Request URL, absolute or relative
        url: String,
    },

    /// Find the contract registered for a request
    Match {
        /// HTTP method
        method: String,

        /// Request URL
        url: String,

        /// Registry file (YAML or TOML); defaults to the built-in ERP registry
        #[arg(short, long)]
        registry: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate a JSON payload against its contract
    Validate {
        /// HTTP method
        method: String,

        /// Request URL
        url: String,

        /// Path to the JSON payload, or `-` for stdin
        payload: String,

        /// Which side of the exchange the payload belongs to
        #[arg(short, long, value_enum, default_value_t = PayloadDirection::Response)]
        direction: PayloadDirection,

        /// Registry file (YAML or TOML); defaults to the built-in ERP registry
        #[arg(short, long)]
        registry: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Load a registry file and report whether it builds
    Check {
        /// Path to the registry file (YAML or TOML)
        registry: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PayloadDirection {
    Request,
    Response,
}

impl From<PayloadDirection> for Direction {
    fn from(direction: PayloadDirection) -> Self {
        match direction {
            PayloadDirection::Request => Direction::Request,
            PayloadDirection::Response => Direction::Response,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Normalize { url } => commands::normalize::execute(&url),

        Commands::Match {
            method,
            url,
            registry,
            format,
        } => commands::match_cmd::execute(&method, &url, registry.as_deref(), format),

        Commands::Validate {
            method,
            url,
            payload,
            direction,
            registry,
            format,
        } => commands::validate::execute(
            &method,
            &url,
            &payload,
            direction.into(),
            registry.as_deref(),
            format,
        ),

        Commands::Check { registry, format } => commands::check::execute(&registry, format),
    }
}
