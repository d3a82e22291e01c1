//! Configuration for the data-acquisition core.
//!
//! Values come from environment-style key/value pairs (`PROXMOX_*`), either
//! from the process environment (after loading an optional `.env` file) or
//! from a single env file read in isolation.

use crate::core::domain::error::{ProxmoxResult, ValidationError};
use std::{collections::HashMap, env, fmt, path::Path};

pub const ENV_API_URL: &str = "PROXMOX_API_URL";
pub const ENV_USERNAME: &str = "PROXMOX_USERNAME";
pub const ENV_PASSWORD: &str = "PROXMOX_PASSWORD";
pub const ENV_ACCEPT_INVALID_CERTS: &str = "PROXMOX_ACCEPT_INVALID_CERTS";
pub const ENV_RATE_LIMIT_RPS: &str = "PROXMOX_RATE_LIMIT_RPS";
pub const ENV_RATE_LIMIT_BURST: &str = "PROXMOX_RATE_LIMIT_BURST";

/// Identity used when none is configured.
pub const DEFAULT_USERNAME: &str = "root@pam";

/// Client-side request pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

/// Raw, not yet validated settings. Validation into value objects happens
/// when the dashboard is built.
#[derive(Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base endpoint of the API, e.g. `https://pve:8006/api2/json`.
    pub api_url: String,
    /// Identity, optionally qualified with `@realm`.
    pub username: String,
    pub password: String,
    /// Accept the control plane's self-signed certificate.
    pub accept_invalid_certs: bool,
    pub rate_limit: Option<RateLimitConfig>,
}

impl DashboardConfig {
    /// Reads the configuration from the process environment, loading a
    /// `.env` file from the working directory first if one exists.
    pub fn from_env() -> ProxmoxResult<Self> {
        match dotenvy::dotenv() {
            Err(e) if !e.not_found() => {
                tracing::warn!(error = %e, "ignoring unreadable .env file");
            }
            _ => {}
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration from one env file without modifying the
    /// process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> ProxmoxResult<Self> {
        let path = path.as_ref();
        let entries = dotenvy::from_path_iter(path)
            .map_err(|e| ValidationError::Format(format!("{}: {}", path.display(), e)))?
            .collect::<Result<HashMap<String, String>, _>>()
            .map_err(|e| ValidationError::Format(format!("{}: {}", path.display(), e)))?;
        Self::from_lookup(|key| entries.get(key).cloned())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> ProxmoxResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_empty(ENV_API_URL).ok_or_else(|| ValidationError::missing(ENV_API_URL))?;
        let password =
            non_empty(ENV_PASSWORD).ok_or_else(|| ValidationError::missing(ENV_PASSWORD))?;
        let username = non_empty(ENV_USERNAME).unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let accept_invalid_certs = match non_empty(ENV_ACCEPT_INVALID_CERTS) {
            Some(raw) => parse_bool(ENV_ACCEPT_INVALID_CERTS, &raw)?,
            None => true,
        };

        let rate_limit = match non_empty(ENV_RATE_LIMIT_RPS) {
            Some(rps) => {
                let requests_per_second = parse_u32(ENV_RATE_LIMIT_RPS, &rps)?;
                let burst_size = match non_empty(ENV_RATE_LIMIT_BURST) {
                    Some(burst) => parse_u32(ENV_RATE_LIMIT_BURST, &burst)?,
                    None => requests_per_second,
                };
                Some(RateLimitConfig {
                    requests_per_second,
                    burst_size,
                })
            }
            None => None,
        };

        Ok(Self {
            api_url,
            username,
            password,
            accept_invalid_certs,
            rate_limit,
        })
    }
}

impl fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("api_url", &self.api_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, ValidationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ValidationError::Field {
            field: field.to_string(),
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}

fn parse_u32(field: &str, raw: &str) -> Result<u32, ValidationError> {
    raw.trim().parse().map_err(|_| ValidationError::Field {
        field: field.to_string(),
        message: format!("expected a non-negative integer, got '{}'", raw.trim()),
    })
}
