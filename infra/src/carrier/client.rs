//! Carrier lookup HTTP client
//!
//! Calls `GET {base_url}/format/{api_key}/{api_secret}/{number}` with a bounded
//! timeout. One request per lookup, no retries: a failed call is reported to
//! the orchestrator, which fails that number only.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use pv_core::errors::CarrierError;
use pv_core::{CarrierLookupTrait, CarrierReply};
use pv_shared::utils::phone::mask_phone_number;
use pv_shared::CarrierApiConfig;

use super::response::decode_reply;
use crate::InfrastructureError;

/// Client for the TMT Velocity carrier lookup API
#[derive(Clone)]
pub struct TmtCarrierClient {
    http: Client,
    config: CarrierApiConfig,
}

impl TmtCarrierClient {
    /// Create a new carrier client
    ///
    /// Missing credentials are not an error here; every lookup then fails
    /// with [`CarrierError::MissingCredentials`] so the service still starts.
    pub fn new(config: CarrierApiConfig) -> Result<Self, InfrastructureError> {
        if !config.has_credentials() {
            warn!("Carrier API credentials not configured; lookups will fail");
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .user_agent(config.user_agent.clone())
            .build()?;

        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "Carrier client created"
        );

        Ok(Self { http, config })
    }

    /// Request URL for a number; carries the credentials, never log it
    fn lookup_url(&self, number: &str) -> String {
        format!(
            "{}/format/{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_key.trim(),
            self.config.api_secret.trim(),
            number
        )
    }
}

#[async_trait]
impl CarrierLookupTrait for TmtCarrierClient {
    async fn lookup(&self, number: &str) -> Result<CarrierReply, CarrierError> {
        if !self.config.has_credentials() {
            return Err(CarrierError::MissingCredentials);
        }

        let masked = mask_phone_number(number);
        info!(number = %masked, event = "carrier_lookup", "Calling carrier API");

        let response = self
            .http
            .get(self.lookup_url(number))
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!(number = %masked, error = %e, "Carrier request failed");
                CarrierError::Transport {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(number = %masked, status = status.as_u16(), "Carrier returned non-200 status");
            return Err(CarrierError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            error!(number = %masked, error = %e, "Failed to read carrier response");
            CarrierError::Transport {
                message: e.to_string(),
            }
        })?;

        let reply = decode_reply(number, &body)?;
        debug!(
            number = %masked,
            success = matches!(reply, CarrierReply::Success(_)),
            "Carrier reply decoded"
        );
        Ok(reply)
    }
}
