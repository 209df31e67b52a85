//! Demo 1: List records of an entity type
//!
//! Showcases: configuration from the environment, list params, where filters
//!
//! Run: ESPOCRM_URL=https://crm.example.com ESPOCRM_API_KEY=... \
//!      cargo run --bin list_entities -- Account

use colored::*;
use espocrm_rest::{EspoClient, RestError};
use espocrm_types::{ListResult, Order, Params, WhereClause};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let entity = args.next().unwrap_or_else(|| "Account".to_string());
    let filter = args.next();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  {} RECORDS", entity.to_uppercase()).cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = EspoClient::from_env()?;
    println!(
        "{} {} ({} auth)",
        "✓".green(),
        client.base_url(),
        client.auth_kind().as_str()
    );

    let mut params = Params::new()
        .max_size(20)
        .select(["id", "name", "createdAt"])
        .order_by("createdAt", Order::Desc);
    if let Some(name) = filter {
        params = params.filter(WhereClause::equals("name", name));
    }

    let body = match client.entities().list(&entity, Some(&params)).await {
        Ok(body) => body,
        Err(RestError::Request { code, message }) => {
            println!("{} {} {}", "✗".red(), code.to_string().red().bold(), message);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let records: ListResult<serde_json::Value> = serde_json::from_str(&body)?;
    println!("{} {} total, showing {}\n", "✓".green(), records.total, records.len());

    for record in records {
        let id = record.get("id").and_then(|v| v.as_str()).unwrap_or("-");
        let name = record.get("name").and_then(|v| v.as_str()).unwrap_or("(no name)");
        let created = record.get("createdAt").and_then(|v| v.as_str()).unwrap_or("");
        println!("  {}  {:<40} {}", id.yellow(), name, created.dimmed());
    }

    Ok(())
}
