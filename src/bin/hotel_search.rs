// Command-line hotel search through the SERP gateway
//
//   hotel_search --city MIA --checkin 2025-12-05 --checkout 2025-12-08 --adults 2 --limit 8

use clap::Parser;
use travel_search_tools::{
    error_report, search_report, HotelSearchClient, HotelSearchError, SearchQuery,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Fetch hotels via Bright Data (Google Hotels SERP)")]
struct Args {
    /// City name or airport code (e.g. MIA, NYC)
    #[arg(long)]
    city: String,

    /// Check-in date, YYYY-MM-DD
    #[arg(long)]
    checkin: String,

    /// Check-out date, YYYY-MM-DD
    #[arg(long)]
    checkout: String,

    #[arg(long, default_value_t = 2)]
    adults: u32,

    #[arg(long, default_value_t = 8)]
    limit: usize,

    #[arg(long, default_value = "USD")]
    currency: String,

    #[arg(long, default_value = "us")]
    country: String,

    #[arg(long, default_value = "en")]
    lang: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON result only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Missing credentials are reported as JSON, not as a process failure
    let client = match HotelSearchClient::from_env() {
        Ok(client) => client,
        Err(HotelSearchError::Config(e)) => {
            println!("{}", error_report(&e));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let query = SearchQuery::new(&args.city, &args.checkin, &args.checkout)
        .adults(args.adults)
        .currency(&args.currency)
        .country(&args.country)
        .language(&args.lang)
        .limit(args.limit);

    let results = client.search(&query).await;

    let output = search_report(&query, &results);
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
