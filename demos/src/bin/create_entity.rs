//! Demo 2: Create, update and delete a record
//!
//! Showcases: JSON payloads, PUT/DELETE routes, typed error handling
//!
//! Run: ESPOCRM_URL=https://crm.example.com ESPOCRM_API_KEY=... ESPOCRM_SECRET_KEY=... \
//!      cargo run --bin create_entity

use colored::*;
use espocrm_rest::{EspoClient, RestError};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = EspoClient::from_env()?;
    let entities = client.entities();

    println!("{} Connected to {}", "✓".green(), client.base_url());

    let lead = json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "emailAddress": "ada@example.com",
        "source": "Web Site",
    });

    let created = match entities.create("Lead", &lead).await {
        Ok(body) => body,
        Err(e @ RestError::Request { .. }) if e.is_unauthorized() => {
            println!("{} Credentials rejected: {}", "✗".red(), e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let created: serde_json::Value = serde_json::from_str(&created)?;
    let id = created
        .get("id")
        .and_then(|v| v.as_str())
        .ok_or("response has no id")?
        .to_string();
    println!("{} Created Lead {}", "✓".green(), id.yellow());

    entities
        .update("Lead", &id, &json!({"status": "In Process"}))
        .await?;
    println!("{} Updated status", "✓".green());

    let record = entities.read("Lead", &id).await?;
    println!("{} Read back: {}", "✓".green(), record.dimmed());

    entities.delete("Lead", &id).await?;
    println!("{} Deleted Lead {}", "✓".green(), id.yellow());

    match entities.read("Lead", &id).await {
        Err(e) if e.is_not_found() => println!("{} Lead is gone", "✓".green()),
        Err(e) => println!("{} Unexpected error: {}", "✗".red(), e),
        Ok(_) => println!("{} Lead still readable", "!".yellow()),
    }

    Ok(())
}
