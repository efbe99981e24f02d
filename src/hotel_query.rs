// Hotel search query and the Google Hotels URL sent through the SERP gateway

use serde::Serialize;
use serde_json::{json, Value};
use url::form_urlencoded;

pub const GOOGLE_HOTELS_URL: &str = "https://www.google.com/travel/hotels";

// Airport and metro codes mapped to the city name used in the search text
const CITY_CODES: &[(&str, &str)] = &[
    ("NYC", "New York"),
    ("JFK", "New York"),
    ("LGA", "New York"),
    ("EWR", "New York"),
    ("MIA", "Miami"),
    ("FLL", "Fort Lauderdale"),
    ("MCO", "Orlando"),
    ("LAX", "Los Angeles"),
    ("SFO", "San Francisco"),
    ("SEA", "Seattle"),
    ("BOS", "Boston"),
    ("DFW", "Dallas"),
    ("ORD", "Chicago"),
    ("IAD", "Washington"),
    ("DCA", "Washington"),
    ("LAS", "Las Vegas"),
    ("PHX", "Phoenix"),
];

/// Resolves an airport/metro code to its city; anything else is used as a city name as-is.
pub fn resolve_city(city_or_code: &str) -> String {
    CITY_CODES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(city_or_code))
        .map(|(_, city)| city.to_string())
        .unwrap_or_else(|| city_or_code.to_string())
}

// Dates stay as given; unparseable dates only affect the night count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub city: String,
    pub checkin: String,
    pub checkout: String,
    pub adults: u32,
    pub currency: String,
    pub country: String,
    pub language: String,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(
        city: impl Into<String>,
        checkin: impl Into<String>,
        checkout: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            checkin: checkin.into(),
            checkout: checkout.into(),
            adults: 2,
            currency: "USD".to_string(),
            country: "us".to_string(),
            language: "en".to_string(),
            limit: 12,
        }
    }

    pub fn adults(mut self, adults: u32) -> Self {
        self.adults = adults;
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn resolved_city(&self) -> String {
        resolve_city(&self.city)
    }
}

/// Google Hotels URL for the query, with `brd_json=1` so the gateway returns parsed JSON.
pub fn hotels_search_url(query: &SearchQuery) -> String {
    let params = [
        ("q", format!("hotels in {}", query.resolved_city())),
        ("gl", query.country.clone()),
        ("hl", query.language.clone()),
        ("brd_dates", format!("{},{}", query.checkin, query.checkout)),
        ("brd_occupancy", query.adults.to_string()),
        ("brd_currency", query.currency.clone()),
        ("brd_json", "1".to_string()),
    ];

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();
    format!("{}?{}", GOOGLE_HOTELS_URL, encoded)
}

pub fn gateway_body(zone: &str, target_url: &str) -> Value {
    json!({
        "zone": zone,
        "url": target_url,
        "format": "raw",
    })
}
