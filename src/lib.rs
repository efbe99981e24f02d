// Search helpers for Google Places and Google Hotels (via a SERP gateway)

pub mod config;
pub mod hotel_query;
pub mod hotel_search;
pub mod places;
pub mod pricing;
pub mod serp_extract;
pub mod transport;

// Re-export key types for convenience
pub use config::{ConfigError, GatewayConfig, PlacesConfig};
pub use hotel_query::{hotels_search_url, resolve_city, SearchQuery};
pub use hotel_search::{
    error_report, search_report, HotelRecord, HotelSearchClient, HotelSearchError,
};
pub use places::{
    summarize_results, LatLng, NearbySearch, PlaceSummary, PlacesClient, PlacesError,
};
pub use pricing::{nights_between, parse_price, total_price};
pub use serp_extract::{collect_candidates, dedup_candidates, extract_hotels, CandidateRecord};
pub use transport::{HttpRequest, HttpTransport, ReqwestTransport, TransportError};
