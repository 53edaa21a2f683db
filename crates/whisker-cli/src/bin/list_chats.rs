use anyhow::Result;
use clap::Parser;
use whisker_core::models::ChatRecord;

use whisker_cli::api_client::ApiClient;
use whisker_cli::{init_tracing, truncate_string};

#[derive(Parser, Debug)]
#[command(name = "list_chats")]
#[command(about = "List registered cats, most recent first")]
struct Args {
    /// Only show the first N cats
    #[arg(long)]
    limit: Option<usize>,

    /// Output format: json or table (default: table)
    #[arg(long, default_value = "table")]
    format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let client = ApiClient::from_env()?;

    let mut records = client.list_chats().await?;
    let total = records.len();
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        "table" => print_chat_table(&records, total, client.base_url()),
        other => {
            return Err(anyhow::anyhow!(
                "Invalid format '{}'. Must be: json or table",
                other
            ))
        }
    }

    Ok(())
}

fn print_chat_table(records: &[ChatRecord], total: usize, base_url: &str) {
    println!("\n=== Registered Cats ===\n");
    println!("Server: {}", base_url);
    println!("Total: {} cats (showing {})", total, records.len());

    if records.is_empty() {
        println!("\nNo cats registered yet.");
        return;
    }

    println!(
        "\n{:>6} {:<20} {:<30} {:<40} {:>20}",
        "ID", "Name", "Email", "Image", "Registered At"
    );
    println!("{}", "-".repeat(120));

    for record in records {
        println!(
            "{:>6} {:<20} {:<30} {:<40} {:>20}",
            record.id,
            truncate_string(&record.name, 20),
            truncate_string(&record.email, 30),
            truncate_string(&record.image_path, 40),
            record.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    if records.len() < total {
        println!("\n... ({} more, use --limit to see more)", total - records.len());
    }

    println!();
}
