use crate::core::domain::error::ValidationError;
use std::fmt;
use url::Url;

const MAX_URL_LENGTH: usize = 2083;
const ALLOWED_SCHEMES: [&str; 2] = ["https", "http"];

/// The validated base endpoint of the control-plane API
/// (e.g. `https://pve.example.com:8006/api2/json`).
///
/// Every request path is resolved relative to this base.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxmoxUrl(Url);

impl ProxmoxUrl {
    /// Parses and validates a base URL.
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        validate_url(value)?;
        let url = Url::parse(value.trim())
            .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;
        Ok(Self(url))
    }

    /// Creates a URL without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(value: &str) -> Self {
        Self(Url::parse(value).unwrap_or_else(|e| panic!("invalid test url {value}: {e}")))
    }

    /// Returns the base URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Joins an API path (which may carry a query string) onto the base.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.0.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for ProxmoxUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProxmoxUrl").field(&self.0.as_str()).finish()
    }
}

impl fmt::Display for ProxmoxUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Validates a base URL string.
pub(crate) fn validate_url(url: &str) -> Result<(), ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::Field {
            field: "api_url".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }
    if url.len() > MAX_URL_LENGTH {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }
    let parsed = Url::parse(url)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme. Must be one of: {}",
            ALLOWED_SCHEMES.join(", ")
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::Format("URL must include a host".to_string()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ValidationError::Format(
            "Base URL cannot carry a query or fragment".to_string(),
        ));
    }
    Ok(())
}
