use serde::Deserialize;

/// Payload of `POST /access/ticket`, after the envelope has been removed.
#[derive(Deserialize)]
pub struct LoginResponseData {
    pub ticket: String,
    #[serde(rename = "CSRFPreventionToken")]
    pub csrf_token: String,
}
