//! Whisker CLI: submit photos and browse the cat registry from a terminal.
//!
//! Set WHISKER_API_URL (defaults to http://localhost:5000).

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use whisker_cli::api_client::{ApiClient, Submission};
use whisker_cli::init_tracing;

#[derive(Parser)]
#[command(name = "whisker", about = "Whisker cat detection CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a photo for a cat; cats are registered and the owner emailed
    Detect {
        /// Path to a .png, .jpg or .jpeg photo
        image: std::path::PathBuf,
        /// Cat name
        #[arg(long, default_value = "")]
        name: String,
        /// Owner email
        #[arg(long, default_value = "")]
        email: String,
    },
    /// Register a known cat without running detection
    Register {
        image: std::path::PathBuf,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
    },
    /// List registered cats as JSON
    List,
    /// Service health
    Health,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let client = ApiClient::from_env().context("Failed to create API client")?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect { image, name, email } => {
            match client.detect(&image, &name, &email).await? {
                Submission::Accepted(result) => print_json(&result)?,
                Submission::Rejected => {
                    anyhow::bail!("No file accepted: use a .png, .jpg or .jpeg image")
                }
            }
        }
        Commands::Register { image, name, email } => {
            match client.register(&image, &name, &email).await? {
                Submission::Accepted(()) => println!("Registered {}", name),
                Submission::Rejected => {
                    anyhow::bail!("No file accepted: use a .png, .jpg or .jpeg image")
                }
            }
        }
        Commands::List => {
            let records = client.list_chats().await?;
            print_json(&records)?;
        }
        Commands::Health => {
            let health = client.health().await?;
            println!(
                "status={} database={} storage={}",
                health.status, health.database, health.storage
            );
        }
    }

    Ok(())
}
