use crate::core::domain::error::ValidationError;
use std::fmt;

/// A Proxmox CSRF protection token, sent as the `CSRFPreventionToken` header.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxmoxCSRFToken(String);

impl ProxmoxCSRFToken {
    /// Creates a validated token.
    pub fn new(value: String) -> Result<Self, ValidationError> {
        validate_csrf_token(&value)?;
        Ok(Self(value))
    }

    /// Creates a new CSRF token without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Returns the token value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProxmoxCSRFToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProxmoxCSRFToken(<redacted>)")
    }
}

/// Validates that a token can be carried as a header value.
pub(crate) fn validate_csrf_token(token: &str) -> Result<(), ValidationError> {
    if token.is_empty() {
        return Err(ValidationError::Field {
            field: "csrf_token".to_string(),
            message: "CSRF token cannot be empty".to_string(),
        });
    }
    if !token.chars().all(|c| c.is_ascii_graphic()) {
        return Err(ValidationError::Format(
            "CSRF token must be visible ASCII".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_csrf_token() {
        assert!(validate_csrf_token("4EEC61E2:lFAtkSbQ3yRpq5Oow0/wSPVy8XY").is_ok());
        assert!(validate_csrf_token("").is_err());
        assert!(validate_csrf_token("with space").is_err());
        assert!(validate_csrf_token("line\nbreak").is_err());
    }
}
