// Google Places client: text search, nearby search and place details
// Responses come back as raw JSON; failures always propagate to the caller.

use crate::config::{ConfigError, PlacesConfig};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport, TransportError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_NEARBY_RADIUS: u32 = 1000;

#[derive(Error, Debug)]
pub enum PlacesError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

// Nearby search parameters; radius defaults to 1000 metres
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearch {
    pub lat: f64,
    pub lng: f64,
    pub radius: u32,
    pub keyword: Option<String>,
}

impl NearbySearch {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            radius: DEFAULT_NEARBY_RADIUS,
            keyword: None,
        }
    }

    pub fn radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

type QueryPairs = Vec<(String, String)>;

fn pair(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

pub fn text_search_params(query: &str, api_key: &str) -> QueryPairs {
    vec![pair("query", query), pair("key", api_key)]
}

pub fn nearby_search_params(search: &NearbySearch, api_key: &str) -> QueryPairs {
    let mut params = vec![
        pair("location", format!("{},{}", search.lat, search.lng)),
        pair("radius", search.radius.to_string()),
        pair("key", api_key),
    ];
    if let Some(keyword) = search.keyword.as_deref().filter(|k| !k.is_empty()) {
        params.push(pair("keyword", keyword));
    }
    params
}

// Field masks keep the details payload (and billing) small
pub fn place_details_params(place_id: &str, fields: &[&str], api_key: &str) -> QueryPairs {
    let mut params = vec![pair("place_id", place_id), pair("key", api_key)];
    if !fields.is_empty() {
        params.push(pair("fields", fields.join(",")));
    }
    params
}

pub struct PlacesClient {
    config: PlacesConfig,
    transport: Arc<dyn HttpTransport>,
}

impl PlacesClient {
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Builds a client from an explicit key or `GOOGLE_MAPS_API_KEY`.
    pub fn from_env(api_key: Option<String>) -> Result<Self, PlacesError> {
        Self::new(PlacesConfig::from_env(api_key)?)
    }

    pub fn with_transport(config: PlacesConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &PlacesConfig {
        &self.config
    }

    #[instrument(skip(self))]
    pub async fn text_search(&self, query: &str) -> Result<Value, PlacesError> {
        let params = text_search_params(query, &self.config.api_key);
        self.get("textsearch/json", params).await
    }

    #[instrument(skip(self), fields(lat = search.lat, lng = search.lng, radius = search.radius))]
    pub async fn nearby_search(&self, search: &NearbySearch) -> Result<Value, PlacesError> {
        let params = nearby_search_params(search, &self.config.api_key);
        self.get("nearbysearch/json", params).await
    }

    #[instrument(skip(self))]
    pub async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<Value, PlacesError> {
        let params = place_details_params(place_id, fields, &self.config.api_key);
        self.get("details/json", params).await
    }

    async fn get(&self, resource: &str, query: QueryPairs) -> Result<Value, PlacesError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), resource);
        let request = HttpRequest::Get {
            url,
            query,
            timeout: self.config.timeout,
        };

        let response = self.transport.execute(&request).await?;
        debug!(resource, "Places request completed");
        Ok(response)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

// Compact view of a single Place result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub types: Option<Vec<String>>,
    pub location: Option<LatLng>,
    pub address: Option<String>,
}

impl PlaceSummary {
    /// Projects a raw Place object; missing or mistyped fields become `None`.
    pub fn from_place(place: &Value) -> Self {
        let text = |key: &str| place.get(key).and_then(Value::as_str).map(str::to_string);

        let types = place.get("types").and_then(Value::as_array).map(|types| {
            types
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });

        let location = place
            .get("geometry")
            .and_then(|g| g.get("location"))
            .and_then(|loc| {
                Some(LatLng {
                    lat: loc.get("lat")?.as_f64()?,
                    lng: loc.get("lng")?.as_f64()?,
                })
            });

        let address = text("formatted_address")
            .filter(|a| !a.is_empty())
            .or_else(|| text("vicinity"));

        Self {
            place_id: text("place_id"),
            name: text("name"),
            rating: place.get("rating").and_then(Value::as_f64),
            types,
            location,
            address,
        }
    }
}

// Summaries for every entry of a search response's `results` array
pub fn summarize_results(response: &Value) -> Vec<PlaceSummary> {
    response
        .get("results")
        .and_then(Value::as_array)
        .map(|results| results.iter().map(PlaceSummary::from_place).collect())
        .unwrap_or_default()
}
