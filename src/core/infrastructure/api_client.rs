//! Authenticated HTTP transport for the control-plane API.

use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult},
    model::{proxmox_auth::ProxmoxAuth, proxmox_connection::ProxmoxConnection},
    value_object::ProxmoxUrl,
};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{
    Client,
    header::{ACCEPT, COOKIE},
};
use serde_json::Value;
use std::num::NonZeroU32;
use tracing::trace;

/// Header carrying the anti-forgery token.
pub const CSRF_HEADER: &str = "CSRFPreventionToken";

/// Read access to the control plane.
///
/// Implemented by [`ApiClient`]; the enumerators and the detail aggregator
/// only depend on this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Issues a GET for `path` (relative to the API base, may carry a query
    /// string) and returns the raw JSON body, envelope included.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Connection` on transport failure, a non-2xx
    /// status, or a body that is not JSON.
    async fn get(&self, path: &str) -> ProxmoxResult<Value>;
}

/// HTTP client bound to one credential and one base endpoint.
///
/// Every request carries the ticket as the `PVEAuthCookie` session cookie and
/// the CSRF token header. There is no retry, no refresh and no backoff; a
/// 401 is reported like any other non-2xx status. Concurrent requests are
/// independent of each other.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    base_url: ProxmoxUrl,
    auth: ProxmoxAuth,
    rate_limiter: Option<DefaultDirectRateLimiter>,
}

impl ApiClient {
    /// Wraps `http_client` (typically the one the login went over) for
    /// `connection`, authenticating with `auth`.
    pub fn new(http_client: Client, connection: &ProxmoxConnection, auth: ProxmoxAuth) -> Self {
        let rate_limiter = connection.rate_limit().and_then(|rl| {
            let rate = NonZeroU32::new(rl.requests_per_second)?;
            let burst = NonZeroU32::new(rl.burst_size)?;
            Some(DefaultDirectRateLimiter::direct(
                Quota::per_second(rate).allow_burst(burst),
            ))
        });

        Self {
            http_client,
            base_url: connection.proxmox_url().clone(),
            auth,
            rate_limiter,
        }
    }
}

#[async_trait]
impl ControlPlane for ApiClient {
    async fn get(&self, path: &str) -> ProxmoxResult<Value> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.base_url.endpoint(path);
        trace!(%url, "GET");

        let response = self
            .http_client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(COOKIE, self.auth.ticket().as_cookie_header())
            .header(CSRF_HEADER, self.auth.csrf_token().as_str())
            .send()
            .await
            .map_err(|e| ProxmoxError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(ProxmoxError::Connection(format!(
                "API error ({}) for {}: {}",
                status, path, error_text
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProxmoxError::Connection(format!("Failed to parse response: {}", e)))
    }
}
