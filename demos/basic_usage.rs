//! Basic usage of the search client
//!
//! Run with:
//!
//! ```text
//! SEARCH_API_KEY=... cargo run --example basic_usage -- jane@example.com 2122345678 example.com
//! ```

use search_api::{SearchClient, SearchConfig, SearchOptions};
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> search_api::Result<()> {
    let api_key = std::env::var("SEARCH_API_KEY")
        .map_err(|_| search_api::Error::config("SEARCH_API_KEY is not set"))?;

    let mut args = std::env::args().skip(1);
    let email = args.next().unwrap_or_else(|| "jane@example.com".to_string());
    let phone = args.next().unwrap_or_else(|| "2122345678".to_string());
    let domain = args.next().unwrap_or_else(|| "example.com".to_string());

    let config = SearchConfig::builder(api_key)
        .timeout(Duration::from_secs(20))
        .cache_ttl(Duration::from_secs(600))
        .build()?;
    let client = SearchClient::with_config(config)?;

    let options = SearchOptions::new().house_value(true).extra_info(true);

    let person = client.search_email(&email, options).await?;
    println!("Email {}: {}", person.email, person.name.as_deref().unwrap_or("<unknown>"));
    for address in &person.addresses {
        match address.zestimate {
            Some(value) => println!("  {address} (est. ${value:.0})"),
            None => println!("  {address}"),
        }
    }

    let owner = client.search_phone(&phone, options).await?;
    println!(
        "Phone {} (valid: {}): {}",
        owner.phone,
        owner.phone.is_valid,
        owner.name.as_deref().unwrap_or("<unknown>")
    );

    let listing = client.search_domain(&domain).await?;
    println!("Domain {}: {} results", listing.domain, listing.total_results);
    for entry in &listing.results {
        println!("  {} {}", entry.email, entry.name.as_deref().unwrap_or(""));
    }

    // Repeat lookups are answered from the cache
    client.search_domain(&domain).await?;
    println!("Cached entries: {}", client.cache().len());

    Ok(())
}
