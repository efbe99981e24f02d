// Credential resolution and per-client configuration
// Environment lookups happen here only; clients receive resolved values at construction.

use std::time::Duration;
use thiserror::Error;

pub const GOOGLE_MAPS_API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const BRIGHTDATA_API_KEY_VAR: &str = "BRIGHTDATA_API_KEY";
pub const BRIGHTDATA_SERP_ZONE_VAR: &str = "BRIGHTDATA_SERP_ZONE";

pub const PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
pub const GATEWAY_ENDPOINT: &str = "https://api.brightdata.com/request";

pub const PLACES_TIMEOUT: Duration = Duration::from_secs(10);
pub const GATEWAY_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing credentials: set {}", .0.join(" and "))]
    Missing(Vec<String>),
}

impl ConfigError {
    pub fn missing_variables(&self) -> &[String] {
        match self {
            ConfigError::Missing(vars) => vars,
        }
    }
}

// Treats unset and empty variables the same way
fn lookup_non_empty<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).filter(|value| !value.trim().is_empty())
}

fn env_lookup(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

// Places client configuration
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl PlacesConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: PLACES_BASE_URL.to_string(),
            timeout: PLACES_TIMEOUT,
        }
    }

    /// Resolves the API key, preferring an explicitly passed one over the environment.
    pub fn resolve<F>(explicit: Option<String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        explicit
            .filter(|key| !key.trim().is_empty())
            .or_else(|| lookup_non_empty(&lookup, GOOGLE_MAPS_API_KEY_VAR))
            .map(Self::new)
            .ok_or_else(|| ConfigError::Missing(vec![GOOGLE_MAPS_API_KEY_VAR.to_string()]))
    }

    pub fn from_env(explicit: Option<String>) -> Result<Self, ConfigError> {
        Self::resolve(explicit, env_lookup)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// SERP gateway configuration: both the API key and the zone are required
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub zone: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(api_key: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            zone: zone.into(),
            endpoint: GATEWAY_ENDPOINT.to_string(),
            timeout: GATEWAY_TIMEOUT,
        }
    }

    /// Resolves the gateway credentials, reporting every missing variable at once.
    pub fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup_non_empty(&lookup, BRIGHTDATA_API_KEY_VAR);
        let zone = lookup_non_empty(&lookup, BRIGHTDATA_SERP_ZONE_VAR);

        match (api_key, zone) {
            (Some(api_key), Some(zone)) => Ok(Self::new(api_key, zone)),
            (api_key, zone) => {
                let mut missing = Vec::new();
                if api_key.is_none() {
                    missing.push(BRIGHTDATA_API_KEY_VAR.to_string());
                }
                if zone.is_none() {
                    missing.push(BRIGHTDATA_SERP_ZONE_VAR.to_string());
                }
                Err(ConfigError::Missing(missing))
            }
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(env_lookup)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
