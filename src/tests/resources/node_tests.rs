use crate::{
    NodeStatus, ProxmoxError,
    tests::{
        TEST_CSRF, TEST_TICKET, create_test_dashboard, mount_failure, mount_get, mount_login,
        mount_login_rejected,
    },
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

#[tokio::test]
async fn test_nodes_list_success() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes"))
        .and(header("Cookie", format!("PVEAuthCookie={}", TEST_TICKET).as_str()))
        .and(header("CSRFPreventionToken", TEST_CSRF))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "node": "pve1",
                    "status": "online",
                    "cpu": 0.15,
                    "maxcpu": 8,
                    "mem": 8589934592_i64,
                    "maxmem": 17179869184_i64,
                    "uptime": 1234567,
                    "id": "node/pve1",
                    "ssl_fingerprint": "AA:BB:CC:DD:EE:FF"
                },
                {
                    "node": "pve2",
                    "status": "offline",
                    "maxcpu": "16",
                    "id": "node/pve2"
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let nodes = create_test_dashboard(&mock_server).list_nodes().await.unwrap();
    assert_eq!(nodes.len(), 2);

    let node1 = &nodes[0];
    assert_eq!(node1.name, "pve1");
    assert_eq!(node1.status, NodeStatus::Online);
    assert_eq!(node1.cpu_used_units, 0.15);
    assert_eq!(node1.cpu_capacity_units, 8);
    assert_eq!(node1.mem_used_bytes, 8589934592);
    assert_eq!(node1.mem_capacity_bytes, 17179869184);
    assert_eq!(node1.uptime_seconds, 1234567);

    let node2 = &nodes[1];
    assert_eq!(node2.name, "pve2");
    assert_eq!(node2.status, NodeStatus::Other);
    assert_eq!(node2.cpu_capacity_units, 16);
    assert_eq!(node2.mem_used_bytes, 0);
    assert_eq!(node2.uptime_seconds, 0);
}

#[tokio::test]
async fn test_nodes_list_double_envelope() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_get(
        &mock_server,
        "/nodes",
        serde_json::json!({"data": {"data": [{"node": "pve1", "status": "online"}]}}),
    )
    .await;

    let nodes = create_test_dashboard(&mock_server).list_nodes().await.unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].name, "pve1");
}

#[tokio::test]
async fn test_nodes_list_empty() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_get(&mock_server, "/nodes", serde_json::json!({"data": []})).await;

    let nodes = create_test_dashboard(&mock_server).list_nodes().await.unwrap();
    assert!(nodes.is_empty());
}

#[tokio::test]
async fn test_nodes_list_server_error_is_empty() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_failure(&mock_server, "/nodes", 500).await;

    let nodes = create_test_dashboard(&mock_server).list_nodes().await.unwrap();
    assert!(nodes.is_empty());
}

#[tokio::test]
async fn test_nodes_list_rejected_login_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_login_rejected(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = create_test_dashboard(&mock_server).list_nodes().await;
    assert!(matches!(result, Err(ProxmoxError::Authentication(_))));
}

#[tokio::test]
async fn test_each_query_acquires_fresh_credential() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 2).await;
    mount_get(&mock_server, "/nodes", serde_json::json!({"data": [{"node": "pve1"}]})).await;

    let dashboard = create_test_dashboard(&mock_server);
    dashboard.list_nodes().await.unwrap();
    dashboard.list_nodes().await.unwrap();
}
