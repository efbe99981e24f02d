// Hotel search through the SERP gateway
// Two policies over the same pipeline: `try_search` reports failures,
// `search` logs them and returns an empty list.

use crate::config::{ConfigError, GatewayConfig};
use crate::hotel_query::{gateway_body, hotels_search_url, SearchQuery};
use crate::pricing::{nights_between, parse_price, total_price};
use crate::serp_extract::{extract_hotels, CandidateRecord};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport, TransportError};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};
use url::form_urlencoded;

pub const DEFAULT_NAME: &str = "Hotel";
pub const DEFAULT_AREA: &str = "Central";
pub const DEFAULT_STARS: f64 = 3.5;
pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

#[derive(Error, Debug)]
pub enum HotelSearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("SERP gateway request failed: {0}")]
    Gateway(#[from] TransportError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelRecord {
    pub name: String,
    pub area: String,
    pub stars: f64,
    #[serde(rename = "price_per_night_usd")]
    pub price_per_night: Option<f64>,
    #[serde(rename = "total_usd")]
    pub total_price: Option<f64>,
    pub url: String,
}

// Map search link used when the SERP data carries no deep link
pub fn fallback_url(name: &str, city: &str) -> String {
    let query: String =
        form_urlencoded::byte_serialize(format!("{} {}", name, city).as_bytes()).collect();
    format!("{}{}", MAPS_SEARCH_URL, query)
}

pub fn assemble_record(candidate: CandidateRecord, city: &str, nights: u32) -> HotelRecord {
    let name = Some(candidate.name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let area = candidate
        .area
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| DEFAULT_AREA.to_string());
    let stars = candidate.rating.unwrap_or(DEFAULT_STARS);

    let price_per_night = candidate.price_text.as_deref().and_then(parse_price);
    let total_price = total_price(price_per_night, nights);

    let url = candidate
        .url
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| fallback_url(&name, city));

    HotelRecord {
        name,
        area,
        stars,
        price_per_night,
        total_price,
        url,
    }
}

/// Turns the raw gateway payload into at most `query.limit` hotel records.
pub fn records_from_payload(payload: &Value, query: &SearchQuery) -> Vec<HotelRecord> {
    let city = query.resolved_city();
    let nights = nights_between(&query.checkin, &query.checkout);

    extract_hotels(payload, query.limit)
        .into_iter()
        .map(|candidate| assemble_record(candidate, &city, nights))
        .collect()
}

// Command-line result: the city is echoed as the caller typed it, not resolved
pub fn search_report(query: &SearchQuery, results: &[HotelRecord]) -> Value {
    json!({
        "city": query.city,
        "checkin": query.checkin,
        "checkout": query.checkout,
        "adults": query.adults,
        "results": results,
    })
}

pub fn error_report(error: &ConfigError) -> Value {
    json!({ "error": error.to_string() })
}

pub struct HotelSearchClient {
    config: GatewayConfig,
    transport: Arc<dyn HttpTransport>,
}

impl HotelSearchClient {
    pub fn new(config: GatewayConfig) -> Result<Self, HotelSearchError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn from_env() -> Result<Self, HotelSearchError> {
        Self::new(GatewayConfig::from_env()?)
    }

    pub fn with_transport(config: GatewayConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn gateway_request(&self, query: &SearchQuery) -> HttpRequest {
        let target = hotels_search_url(query);
        HttpRequest::Post {
            url: self.config.endpoint.clone(),
            bearer_token: self.config.api_key.clone(),
            body: gateway_body(&self.config.zone, &target),
            timeout: self.config.timeout,
        }
    }

    /// Fail-fast variant: gateway and transport errors are returned to the caller.
    #[instrument(
        skip(self, query),
        fields(city = %query.city, checkin = %query.checkin, checkout = %query.checkout)
    )]
    pub async fn try_search(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<HotelRecord>, HotelSearchError> {
        let request = self.gateway_request(query);
        let payload = self.transport.execute(&request).await?;

        let records = records_from_payload(&payload, query);
        info!(count = records.len(), "Hotel search completed");
        Ok(records)
    }

    /// Best-effort variant: any failure is logged and yields no results.
    pub async fn search(&self, query: &SearchQuery) -> Vec<HotelRecord> {
        match self.try_search(query).await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, city = %query.city, "Hotel search failed, returning no results");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock_transport::{MockReply, MockTransport};
    use crate::config::{BRIGHTDATA_API_KEY_VAR, BRIGHTDATA_SERP_ZONE_VAR};
    use std::time::Duration;

    fn client_with(transport: Arc<MockTransport>) -> HotelSearchClient {
        let config = GatewayConfig::new("bd-key", "serp_api1")
            .with_endpoint("https://gateway.test/request");
        HotelSearchClient::with_transport(config, transport)
    }

    fn serp_payload() -> Value {
        json!({
            "status_code": 200,
            "body": {
                "properties": [
                    {
                        "name": "Ocean Breeze",
                        "overall_rating": 4.4,
                        "price": "$100",
                        "neighborhood": "South Beach"
                    },
                    {
                        "title": "Bayfront Inn",
                        "rating": "3.9",
                        "rate_per_night": "$1,250 total",
                        "link": "https://hotels.example/bayfront"
                    },
                    {"name": "Ocean Breeze", "rating": 4.0, "price": "$90"},
                    {"name": "Nameless Rating Only", "extra": {"name": "Inner Suite", "rate": "N/A"}}
                ]
            }
        })
    }

    #[test]
    fn test_fallback_url_encodes_name_and_city() {
        assert_eq!(
            fallback_url("Hotel", "Fort Lauderdale"),
            "https://www.google.com/maps/search/?api=1&query=Hotel+Fort+Lauderdale"
        );
        assert_eq!(
            fallback_url("B&B Rooms", "Miami"),
            "https://www.google.com/maps/search/?api=1&query=B%26B+Rooms+Miami"
        );
    }

    #[test]
    fn test_assemble_applies_defaults() {
        let candidate = CandidateRecord {
            name: String::new(),
            rating: None,
            price_text: Some("$100".to_string()),
            area: None,
            url: Some(String::new()),
        };
        let record = assemble_record(candidate, "Miami", 3);
        assert_eq!(record.name, "Hotel");
        assert_eq!(record.area, "Central");
        assert_eq!(record.stars, 3.5);
        assert_eq!(record.price_per_night, Some(100.0));
        assert_eq!(record.total_price, Some(300.0));
        assert_eq!(
            record.url,
            "https://www.google.com/maps/search/?api=1&query=Hotel+Miami"
        );
    }

    #[test]
    fn test_assemble_without_price() {
        let candidate = CandidateRecord {
            name: "Rated Only".to_string(),
            rating: Some(4.8),
            price_text: Some("Sold out".to_string()),
            area: Some("Midtown".to_string()),
            url: Some("https://example.com/rated".to_string()),
        };
        let record = assemble_record(candidate, "New York", 2);
        assert_eq!(record.stars, 4.8);
        assert_eq!(record.price_per_night, None);
        assert_eq!(record.total_price, None);
        assert_eq!(record.url, "https://example.com/rated");
    }

    #[test]
    fn test_record_serializes_with_output_keys() {
        let record = assemble_record(
            CandidateRecord {
                name: "X".to_string(),
                rating: Some(4.0),
                ..Default::default()
            },
            "Boston",
            1,
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["price_per_night_usd"], Value::Null);
        assert_eq!(value["total_usd"], Value::Null);
        assert_eq!(value["stars"], json!(4.0));
    }

    #[test]
    fn test_records_from_payload_end_to_end() {
        let query = SearchQuery::new("MIA", "2025-12-05", "2025-12-08");
        let records = records_from_payload(&serp_payload(), &query);

        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ocean Breeze", "Bayfront Inn", "Inner Suite"]);

        let ocean = &records[0];
        assert_eq!(ocean.price_per_night, Some(100.0));
        assert_eq!(ocean.total_price, Some(300.0));
        assert_eq!(ocean.stars, 4.4);
        assert_eq!(ocean.area, "South Beach");
        assert_eq!(
            ocean.url,
            "https://www.google.com/maps/search/?api=1&query=Ocean+Breeze+Miami"
        );

        let bayfront = &records[1];
        assert_eq!(bayfront.stars, 3.9);
        assert_eq!(bayfront.price_per_night, Some(1250.0));
        assert_eq!(bayfront.total_price, Some(3750.0));
        assert_eq!(bayfront.area, "Central");
        assert_eq!(bayfront.url, "https://hotels.example/bayfront");

        let inner = &records[2];
        assert_eq!(inner.price_per_night, None);
        assert_eq!(inner.stars, 3.5);
    }

    #[test]
    fn test_records_respect_limit() {
        let query = SearchQuery::new("MIA", "2025-12-05", "2025-12-08").limit(1);
        assert_eq!(records_from_payload(&serp_payload(), &query).len(), 1);
    }

    #[test]
    fn test_search_report_echoes_raw_city() {
        let query = SearchQuery::new("mia", "2025-12-05", "2025-12-08").adults(3);
        let records = records_from_payload(&serp_payload(), &query);
        let report = search_report(&query, &records);

        assert_eq!(report["city"], "mia");
        assert_eq!(report["checkin"], "2025-12-05");
        assert_eq!(report["checkout"], "2025-12-08");
        assert_eq!(report["adults"], 3);
        assert_eq!(report["results"].as_array().map(Vec::len), Some(3));
        assert_eq!(report["results"][0]["total_usd"], json!(300.0));

        let keys: Vec<_> = report.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["city", "checkin", "checkout", "adults", "results"]);
    }

    #[test]
    fn test_search_report_with_no_results() {
        let query = SearchQuery::new("Lisbon", "2025-12-05", "2025-12-08");
        assert_eq!(search_report(&query, &[])["results"], json!([]));
    }

    #[test]
    fn test_error_report_names_both_missing_variables() {
        let err = GatewayConfig::resolve(|_| None).unwrap_err();
        let report = error_report(&err);

        assert_eq!(report.as_object().map(|o| o.len()), Some(1));
        let message = report["error"].as_str().unwrap();
        assert!(message.contains(BRIGHTDATA_API_KEY_VAR));
        assert!(message.contains(BRIGHTDATA_SERP_ZONE_VAR));
    }

    #[tokio::test]
    async fn test_try_search_posts_to_gateway() {
        let transport = Arc::new(MockTransport::replying(MockReply::Json(serp_payload())));
        let client = client_with(transport.clone());
        let query = SearchQuery::new("mia", "2025-12-05", "2025-12-08").adults(2);

        let records = client.try_search(&query).await.unwrap();
        assert_eq!(records.len(), 3);

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 1);
        match &requests[0] {
            HttpRequest::Post {
                url,
                bearer_token,
                body,
                timeout,
            } => {
                assert_eq!(url, "https://gateway.test/request");
                assert_eq!(bearer_token, "bd-key");
                assert_eq!(*timeout, Duration::from_secs(60));
                assert_eq!(body["zone"], "serp_api1");
                assert_eq!(body["format"], "raw");
                let target = body["url"].as_str().unwrap();
                assert!(target.starts_with("https://www.google.com/travel/hotels?q=hotels+in+Miami"));
                assert!(target.ends_with("&brd_json=1"));
            }
            other => panic!("expected a POST, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_try_search_reports_gateway_failure() {
        let transport = Arc::new(MockTransport::replying(MockReply::Status(
            502,
            "bad gateway".to_string(),
        )));
        let client = client_with(transport);
        let query = SearchQuery::new("MIA", "2025-12-05", "2025-12-08");

        let err = client.try_search(&query).await.unwrap_err();
        assert!(matches!(
            err,
            HotelSearchError::Gateway(TransportError::Status { status: 502, .. })
        ));
    }

    #[tokio::test]
    async fn test_search_degrades_to_empty() {
        let transport = Arc::new(MockTransport::replying(MockReply::Timeout));
        let client = client_with(transport.clone());
        let query = SearchQuery::new("MIA", "2025-12-05", "2025-12-08");

        assert!(client.search(&query).await.is_empty());
        assert_eq!(transport.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_search_with_unrecognised_payload() {
        let transport = Arc::new(MockTransport::replying(MockReply::Json(
            json!({"html": "<html></html>", "errors": []}),
        )));
        let client = client_with(transport);
        let query = SearchQuery::new("Lisbon", "2025-12-05", "2025-12-08");

        assert!(client.search(&query).await.is_empty());
    }
}
