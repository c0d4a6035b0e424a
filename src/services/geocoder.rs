use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use crate::models::{GeocodeResponse, ResolvedAddress};

/// Errors that can occur when resolving an address
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Geocoder returned error: {0}")]
    Api(String),

    #[error("Unauthorized: geocoder rejected the API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Turns free text into a structured address
///
/// `Ok(None)` means the provider found nothing usable. Transport and auth
/// failures are errors and are not retried here.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<Option<ResolvedAddress>, GeocodeError>;

    /// Name used in logs
    fn name(&self) -> &str {
        "AddressResolver"
    }
}

/// Google Geocoding API client
pub struct GoogleGeocoder {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl GoogleGeocoder {
    pub const DEFAULT_ENDPOINT: &'static str = "https://maps.googleapis.com/maps/api/geocode/json";

    /// Create a new geocoder client
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint,
            api_key,
            client,
        })
    }

    fn request_url(&self, address: &str) -> String {
        format!(
            "{}?address={}&key={}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(address),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl AddressResolver for GoogleGeocoder {
    async fn resolve(&self, address: &str) -> Result<Option<ResolvedAddress>, GeocodeError> {
        tracing::debug!("Geocoding address: {}", address);

        let response = self.client.get(self.request_url(address)).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GeocodeError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Geocoder request failed: {} - {}", status, body);
            return Err(GeocodeError::Api(format!("Geocoding failed: {}", status)));
        }

        let body = response.text().await?;
        let payload: GeocodeResponse = serde_json::from_str(&body)
            .map_err(|e| GeocodeError::InvalidResponse(format!("Failed to parse geocode response: {}", e)))?;

        match payload.status.as_str() {
            "OK" => {}
            "REQUEST_DENIED" => {
                tracing::error!(
                    "Geocoder denied request: {}",
                    payload.error_message.as_deref().unwrap_or("no message")
                );
                return Err(GeocodeError::Unauthorized);
            }
            other => {
                tracing::warn!("No geocode result for {:?}: status {}", address, other);
                return Ok(None);
            }
        }

        let Some(first) = payload.results.first() else {
            tracing::warn!("No geocode result for {:?}: empty result list", address);
            return Ok(None);
        };

        Ok(Some(ResolvedAddress::from(first)))
    }

    fn name(&self) -> &str {
        "google"
    }
}
