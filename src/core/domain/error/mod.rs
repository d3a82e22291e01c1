use thiserror::Error;

/// The main error type for dashboard data acquisition.
///
/// Only `Authentication`, `NotFound` and `Validation` ever escape a top-level
/// query. `Connection` and `Shape` are raised by the transport and the
/// envelope unwrapper and absorbed at their call sites, where they turn into
/// an empty sequence or a documented default.
#[derive(Error, Debug)]
pub enum ProxmoxError {
    /// The control plane rejected the credentials, or the login call itself
    /// could not complete
    ///
    /// # Fields
    /// * `0` - A description of the authentication failure
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// A data request failed at the transport level or returned a non-2xx status
    ///
    /// # Fields
    /// * `0` - A description of what went wrong
    #[error("Connection error: {0}")]
    Connection(String),

    /// An unwrapped payload did not have the expected structure
    ///
    /// # Fields
    /// * `0` - What was expected and what was found
    #[error("Unexpected response shape: {0}")]
    Shape(String),

    /// The requested machine is not listed on its claimed host
    #[error("Machine {machine_id} not found on node {node}")]
    NotFound { machine_id: String, node: String },

    /// Represents validation failures of configuration values
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

impl ValidationError {
    pub(crate) fn missing(field: &str) -> Self {
        ValidationError::Field {
            field: field.to_string(),
            message: format!("{} is required", field),
        }
    }
}

/// Type alias for Results that may fail with a ProxmoxError
pub type ProxmoxResult<T> = Result<T, ProxmoxError>;
