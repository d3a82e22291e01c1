use crate::core::domain::{error::ValidationError, value_object::proxmox_realm::ProxmoxRealm};

/// A validated Proxmox user name, without the trailing `@realm` qualifier.
///
/// The user part may itself contain `@` (e.g. `john@corp` in `john@corp@ad`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxUsername(String);

impl ProxmoxUsername {
    /// Creates a validated username. Any `@` is kept as part of the name;
    /// use [`ProxmoxUsername::from_identity`] for `user@realm` strings.
    pub fn new(username: String) -> Result<Self, ValidationError> {
        validate_username(&username)?;
        Ok(Self(username))
    }

    /// Splits a configured identity such as `root@pam` into the bare user
    /// name and its realm. Without a suffix the realm is
    /// [`ProxmoxRealm::DEFAULT`].
    pub fn from_identity(identity: &str) -> Result<(Self, ProxmoxRealm), ValidationError> {
        let identity = identity.trim();
        match identity.rsplit_once('@') {
            Some((user, realm)) => Ok((
                Self::new(user.to_string())?,
                ProxmoxRealm::new(realm.to_string())?,
            )),
            None => Ok((Self::new(identity.to_string())?, ProxmoxRealm::default())),
        }
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a bare username.
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::Field {
            field: "username".to_string(),
            message: "Username cannot be empty".to_string(),
        });
    }
    if username.len() > 64 {
        return Err(ValidationError::Format(format!(
            "Username length must be at most 64 characters (got {})",
            username.len()
        )));
    }
    if username
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == ':' || c == '/')
    {
        return Err(ValidationError::Format(
            "Username must not contain whitespace, ':' or '/'".to_string(),
        ));
    }
    Ok(())
}
