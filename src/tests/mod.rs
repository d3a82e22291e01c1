mod resources;

use crate::ProxmoxDashboard;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

pub(crate) const TEST_TICKET: &str = "PVE:monitor@pve:4EEC61E2::sig";
pub(crate) const TEST_CSRF: &str = "4EEC61E2:token";

pub(crate) fn create_test_dashboard(mock_server: &MockServer) -> ProxmoxDashboard {
    ProxmoxDashboard::builder()
        .api_url(format!("{}/api2/json", mock_server.uri()))
        .credentials("monitor@pve", "testpass")
        .build()
        .unwrap()
}

/// Accepts every login and expects it `times` times.
pub(crate) async fn mount_login(mock_server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/api2/json/access/ticket"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "ticket": TEST_TICKET,
                "CSRFPreventionToken": TEST_CSRF,
                "username": "monitor@pve"
            }
        })))
        .expect(times)
        .mount(mock_server)
        .await;
}

pub(crate) async fn mount_login_rejected(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api2/json/access/ticket"))
        .respond_with(ResponseTemplate::new(401))
        .mount(mock_server)
        .await;
}

pub(crate) async fn mount_get(mock_server: &MockServer, api_path: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api2/json{}", api_path)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

pub(crate) async fn mount_failure(mock_server: &MockServer, api_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/api2/json{}", api_path)))
        .respond_with(ResponseTemplate::new(status))
        .mount(mock_server)
        .await;
}
