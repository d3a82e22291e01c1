use crate::core::domain::error::ValidationError;
use std::fmt;

/// A Proxmox authentication ticket.
///
/// Opaque to this crate. It is only ever sent back as the `PVEAuthCookie`
/// session cookie and never outlives the operation that acquired it.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxmoxTicket(String);

impl ProxmoxTicket {
    /// Creates a validated ticket.
    pub fn new(value: String) -> Result<Self, ValidationError> {
        validate_ticket(&value)?;
        Ok(Self(value))
    }

    /// Creates a new ticket without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Returns the ticket value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formats the ticket as a cookie header.
    #[must_use]
    pub fn as_cookie_header(&self) -> String {
        format!("PVEAuthCookie={}", self.0)
    }
}

impl fmt::Debug for ProxmoxTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProxmoxTicket(<redacted>)")
    }
}

/// Validates that a ticket can be carried in a cookie header.
pub(crate) fn validate_ticket(ticket: &str) -> Result<(), ValidationError> {
    if ticket.is_empty() {
        return Err(ValidationError::Field {
            field: "ticket".to_string(),
            message: "Ticket cannot be empty".to_string(),
        });
    }
    if !ticket.chars().all(|c| c.is_ascii_graphic() && c != ';') {
        return Err(ValidationError::Format(
            "Ticket contains characters not allowed in a cookie".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ticket() {
        assert!(validate_ticket("PVE:root@pam:4EEC61E2::sig+/=").is_ok());
        assert!(validate_ticket("opaque").is_ok());
        assert!(validate_ticket("").is_err());
        assert!(validate_ticket("a b").is_err());
        assert!(validate_ticket("a;b").is_err());
    }

    #[test]
    fn test_cookie_header() {
        let ticket = ProxmoxTicket::new_unchecked("PVE:abc".to_string());
        assert_eq!(ticket.as_cookie_header(), "PVEAuthCookie=PVE:abc");
    }

    #[test]
    fn test_debug_is_redacted() {
        let ticket = ProxmoxTicket::new_unchecked("secret".to_string());
        assert!(!format!("{:?}", ticket).contains("secret"));
    }
}
