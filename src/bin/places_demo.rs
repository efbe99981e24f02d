// Nearby search for coffee around Seattle, then details for the first hit

use std::process::ExitCode;
use travel_search_tools::{summarize_results, NearbySearch, PlacesClient, PlacesError};
use tracing_subscriber::EnvFilter;

const DETAIL_FIELDS: &[&str] = &[
    "name",
    "formatted_address",
    "formatted_phone_number",
    "geometry",
];

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = match PlacesClient::from_env(None) {
        Ok(client) => client,
        Err(PlacesError::Config(_)) => {
            eprintln!("Please set GOOGLE_MAPS_API_KEY in your environment and re-run.");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    println!("Nearby search for \"coffee\" near Seattle (lat=47.6062, lng=-122.3321) ...");
    let search = NearbySearch::new(47.6062, -122.3321)
        .radius(20000)
        .keyword("coffee");
    let response = client.nearby_search(&search).await?;

    let places = summarize_results(&response);
    for (i, place) in places.iter().take(20).enumerate() {
        let rating = place
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "None".to_string());
        println!(
            "{}. {} — {} — {}",
            i + 1,
            place.name.as_deref().unwrap_or("None"),
            rating,
            place.address.as_deref().unwrap_or("None"),
        );
    }

    if let Some(place_id) = places.first().and_then(|p| p.place_id.as_deref()) {
        println!("\nFetching details for first result (name,formatted_address,formatted_phone_number)...");
        let details = client.place_details(place_id, DETAIL_FIELDS).await?;
        println!("{}", serde_json::to_string_pretty(&details["result"])?);
    }

    Ok(ExitCode::SUCCESS)
}
