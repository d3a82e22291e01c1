use crate::{
    auth::application::{request::login_request::LoginRequest, response::login_response::LoginResponseData},
    core::{
        domain::{
            error::{ProxmoxError, ProxmoxResult},
            model::{proxmox_auth::ProxmoxAuth, proxmox_connection::ProxmoxConnection},
            value_object::{ProxmoxCSRFToken, ProxmoxTicket},
        },
        infrastructure::envelope::unwrap_object,
    },
};

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;
use tracing::{debug, instrument};

const LOGIN_PATH: &str = "/access/ticket";

/// Acquires a fresh credential from the control plane.
///
/// Every failure, including an unreachable endpoint or an unusable
/// response, is reported as `ProxmoxError::Authentication`. There is no retry.
pub struct LoginService {
    default_headers: HeaderMap,
}

impl LoginService {
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self { default_headers }
    }

    /// Logs in over `http_client`, which the caller reuses for the
    /// authenticated requests that follow.
    #[instrument(skip_all, fields(user = %connection.proxmox_username().as_str(), realm = %connection.proxmox_realm().as_str()))]
    pub async fn execute(
        &self,
        http_client: &Client,
        connection: &ProxmoxConnection,
    ) -> ProxmoxResult<ProxmoxAuth> {
        let url = connection.proxmox_url().endpoint(LOGIN_PATH);
        let request = self.build_login_request(connection);
        let response = self.send_request(http_client, &url, &request).await?;

        match response.status() {
            StatusCode::OK => self.handle_successful_login(response).await,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                ProxmoxError::Authentication("Invalid credentials provided".to_string()),
            ),
            StatusCode::NOT_FOUND => Err(ProxmoxError::Authentication(
                "Login endpoint not found".to_string(),
            )),
            StatusCode::SERVICE_UNAVAILABLE => Err(ProxmoxError::Authentication(
                "Proxmox service is currently unavailable".to_string(),
            )),
            status => Err(ProxmoxError::Authentication(format!(
                "Unexpected response status: {}",
                status
            ))),
        }
    }

    fn build_login_request(&self, connection: &ProxmoxConnection) -> LoginRequest {
        LoginRequest {
            username: connection.proxmox_username().as_str().to_string(),
            password: connection.proxmox_password().as_str().to_string(),
            realm: connection.proxmox_realm().as_str().to_string(),
        }
    }

    async fn send_request(
        &self,
        client: &Client,
        url: &str,
        request: &LoginRequest,
    ) -> ProxmoxResult<reqwest::Response> {
        client
            .post(url)
            .headers(self.default_headers.clone())
            .body(request.to_form())
            .send()
            .await
            .map_err(|e| ProxmoxError::Authentication(format!("Login request failed: {}", e)))
    }

    async fn handle_successful_login(
        &self,
        response: reqwest::Response,
    ) -> ProxmoxResult<ProxmoxAuth> {
        let body = response.json::<Value>().await.map_err(|e| {
            ProxmoxError::Authentication(format!("Failed to parse login response: {}", e))
        })?;

        let payload = unwrap_object(body)
            .map_err(|e| ProxmoxError::Authentication(format!("Invalid login response: {}", e)))?;
        let data: LoginResponseData = serde_json::from_value(Value::Object(payload))
            .map_err(|e| ProxmoxError::Authentication(format!("Invalid login response: {}", e)))?;

        let ticket = ProxmoxTicket::new(data.ticket)
            .map_err(|e| ProxmoxError::Authentication(format!("Invalid ticket: {}", e)))?;
        let csrf_token = ProxmoxCSRFToken::new(data.csrf_token)
            .map_err(|e| ProxmoxError::Authentication(format!("Invalid CSRF token: {}", e)))?;

        debug!("credential acquired");
        Ok(ProxmoxAuth::new(ticket, csrf_token))
    }
}

impl Default for LoginService {
    fn default() -> Self {
        Self::new()
    }
}
