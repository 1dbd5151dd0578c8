use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use verihouse_core::AuditRequest;
use verihouse_fetch::query::{DEFAULT_PERMITS_URL, DEFAULT_PROPERTY_URL};

mod audit;
mod display;

#[derive(Parser, Debug)]
#[command(name = "verihouse", version, about = "SF building-permit audit")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    cmd: Command,
}

/// Process-wide settings, read once at startup.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// RentCast API key. Without it, maintenance prediction is disabled.
    #[arg(long, env = "RENTCAST_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Permits dataset URL.
    #[arg(long, env = "VERIHOUSE_PERMITS_URL", default_value = DEFAULT_PERMITS_URL, global = true)]
    pub permits_url: String,

    /// Property-details API URL.
    #[arg(long, env = "VERIHOUSE_PROPERTY_URL", default_value = DEFAULT_PROPERTY_URL, global = true)]
    pub property_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "VERIHOUSE_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, treating an empty value as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit the permit history of one street address.
    Audit {
        /// Street number, e.g. 301
        #[arg(long)]
        number: String,

        /// Street name, e.g. Mission (a trailing "St" is ignored)
        #[arg(long)]
        street: String,

        /// Listing description to cross-check against permits
        #[arg(long, conflicts_with = "listing_file")]
        listing: Option<String>,

        /// Read the listing description from a file
        #[arg(long)]
        listing_file: Option<PathBuf>,

        /// Print the report as JSON instead of a card
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the newest permits citywide, to see how the city spells addresses.
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("verihouse v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    match cli.cmd {
        Command::Audit {
            number,
            street,
            listing,
            listing_file,
            json,
        } => {
            if number.trim().is_empty() || street.trim().is_empty() {
                anyhow::bail!("both --number and --street are required");
            }
            let listing = match listing_file {
                Some(path) => Some(
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("reading listing file {}", path.display()))?,
                ),
                None => listing,
            };
            let mut request = AuditRequest::new(number, street);
            request.listing = listing;

            let report = audit::run_audit(&cli.config, &request).await?;
            if json {
                let out = serde_json::to_string_pretty(&report).context("serialising report")?;
                println!("{out}");
            } else {
                display::print_audit_card(&report);
            }
        }
        Command::Recent { limit } => {
            let lookup = audit::run_recent(&cli.config, limit).await?;
            display::print_recent(&lookup);
        }
    }

    Ok(())
}
