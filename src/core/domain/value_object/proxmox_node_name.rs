use crate::core::domain::error::ValidationError;

/// A cluster node name, safe to place in a request path.
///
/// Proxmox node names are DNS labels: ASCII letters, digits and inner
/// hyphens, at most 63 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxNodeName(String);

impl ProxmoxNodeName {
    /// Creates a validated node name.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        validate_node_name(name)?;
        Ok(Self(name.to_string()))
    }

    /// Returns the node name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a node name as a DNS label.
pub(crate) fn validate_node_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Field {
            field: "node".to_string(),
            message: "Node name cannot be empty".to_string(),
        });
    }
    if name.len() > 63 {
        return Err(ValidationError::Format(format!(
            "Node name length must be at most 63 characters (got {})",
            name.len()
        )));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(ValidationError::Format(
            "Node name must not start or end with '-'".to_string(),
        ));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::Format(format!(
            "Node name '{}' contains invalid characters",
            name
        )));
    }
    Ok(())
}

/// Checks that a machine id is a plain decimal VMID.
pub(crate) fn is_vmid(id: &str) -> bool {
    !id.is_empty() && id.len() <= 10 && id.bytes().all(|b| b.is_ascii_digit())
}
