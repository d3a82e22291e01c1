use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult, ValidationError},
    model::dashboard_config::{DashboardConfig, RateLimitConfig},
    value_object::{ProxmoxPassword, ProxmoxRealm, ProxmoxUrl, ProxmoxUsername},
};
use reqwest::Client;

/// Validated connection settings for one control plane.
///
/// Holds no session state. Every top-level operation builds its own HTTP
/// client and credential from these settings.
#[derive(Debug, Clone)]
pub struct ProxmoxConnection {
    proxmox_url: ProxmoxUrl,
    proxmox_username: ProxmoxUsername,
    proxmox_password: ProxmoxPassword,
    proxmox_realm: ProxmoxRealm,
    accept_invalid_certs: bool,
    rate_limit: Option<RateLimitConfig>,
}

impl ProxmoxConnection {
    pub fn new(
        proxmox_url: ProxmoxUrl,
        proxmox_username: ProxmoxUsername,
        proxmox_password: ProxmoxPassword,
        proxmox_realm: ProxmoxRealm,
        accept_invalid_certs: bool,
        rate_limit: Option<RateLimitConfig>,
    ) -> Self {
        Self {
            proxmox_url,
            proxmox_username,
            proxmox_password,
            proxmox_realm,
            accept_invalid_certs,
            rate_limit,
        }
    }

    /// Validates raw configuration into connection settings.
    pub fn from_config(config: &DashboardConfig) -> ProxmoxResult<Self> {
        let url = ProxmoxUrl::new(&config.api_url)?;
        let (username, realm) = ProxmoxUsername::from_identity(&config.username)?;
        let password = ProxmoxPassword::new(config.password.clone())?;
        if let Some(rl) = config.rate_limit {
            validate_rate_limit(&rl)?;
        }
        Ok(Self::new(
            url,
            username,
            password,
            realm,
            config.accept_invalid_certs,
            config.rate_limit,
        ))
    }

    pub fn proxmox_url(&self) -> &ProxmoxUrl {
        &self.proxmox_url
    }

    pub fn proxmox_username(&self) -> &ProxmoxUsername {
        &self.proxmox_username
    }

    pub fn proxmox_password(&self) -> &ProxmoxPassword {
        &self.proxmox_password
    }

    pub fn proxmox_realm(&self) -> &ProxmoxRealm {
        &self.proxmox_realm
    }

    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    pub fn rate_limit(&self) -> Option<RateLimitConfig> {
        self.rate_limit
    }

    /// Builds an HTTP client with this connection's certificate policy.
    ///
    /// Relaxed certificate validation is an explicit trust decision for
    /// on-premise control planes with self-signed certificates.
    pub(crate) fn http_client(&self) -> ProxmoxResult<Client> {
        Client::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| ProxmoxError::Connection(e.to_string()))
    }
}

pub(crate) fn validate_rate_limit(rate_limit: &RateLimitConfig) -> Result<(), ValidationError> {
    if rate_limit.requests_per_second == 0 {
        return Err(ValidationError::Field {
            field: "requests_per_second".to_string(),
            message: "Rate limit must allow at least one request per second".to_string(),
        });
    }
    if rate_limit.burst_size == 0 {
        return Err(ValidationError::Field {
            field: "burst_size".to_string(),
            message: "Burst size must be at least 1".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DashboardConfig {
        DashboardConfig {
            api_url: "https://pve.example.com:8006/api2/json".to_string(),
            username: "monitor@pve".to_string(),
            password: "secret".to_string(),
            accept_invalid_certs: true,
            rate_limit: None,
        }
    }

    #[test]
    fn test_from_config_splits_identity() {
        let connection = ProxmoxConnection::from_config(&config()).unwrap();
        assert_eq!(connection.proxmox_username().as_str(), "monitor");
        assert_eq!(connection.proxmox_realm().as_str(), "pve");
        assert!(connection.accepts_invalid_certs());
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let mut config = config();
        config.api_url = "not a url".to_string();
        assert!(matches!(
            ProxmoxConnection::from_config(&config),
            Err(ProxmoxError::Validation(_))
        ));
    }

    #[test]
    fn test_from_config_rejects_zero_rate_limit() {
        let mut config = config();
        config.rate_limit = Some(RateLimitConfig {
            requests_per_second: 0,
            burst_size: 1,
        });
        assert!(ProxmoxConnection::from_config(&config).is_err());

        config.rate_limit = Some(RateLimitConfig {
            requests_per_second: 1,
            burst_size: 0,
        });
        assert!(ProxmoxConnection::from_config(&config).is_err());
    }
}
