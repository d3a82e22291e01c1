use crate::{
    FlagState, MachineStatus, ProxmoxError,
    tests::{create_test_dashboard, mount_failure, mount_get, mount_login, mount_login_rejected},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

async fn mount_listing(mock_server: &MockServer) {
    mount_get(
        mock_server,
        "/nodes/pve1/qemu",
        json!({"data": [{
            "vmid": 100,
            "name": "web",
            "status": "running",
            "cpus": 2,
            "maxmem": 2147483648_u64,
            "net0": "virtio=AA:BB:CC:DD:EE:FF,bridge=vmbr0"
        }]}),
    )
    .await;
}

async fn mount_history_and_storage(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/qemu/100/rrddata"))
        .and(query_param("timeframe", "hour"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"time": 1700000000, "cpu": 0.05, "netin": 1024},
            {"time": 1700000060, "cpu": 0.07, "netin": 2048}
        ]})))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve1/storage/local/content"))
        .and(query_param("content", "backup"))
        .and(query_param("vmid", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{
            "volid": "local:backup/vzdump-qemu-100-2024_01_01-00_00_00.vma.zst",
            "ctime": 1704067200,
            "format": "vma.zst",
            "size": 734003200
        }]})))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_detail_status_failure_uses_default() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_listing(&mock_server).await;
    mount_failure(&mock_server, "/nodes/pve1/qemu/100/status/current", 500).await;
    mount_get(
        &mock_server,
        "/nodes/pve1/qemu/100/config",
        json!({"data": {"name": "web", "cores": 2, "memory": 2048, "onboot": 1}}),
    )
    .await;
    mount_get(
        &mock_server,
        "/nodes/pve1/qemu/100/snapshot",
        json!({"data": [{"name": "current", "description": "You are here!"}]}),
    )
    .await;
    mount_history_and_storage(&mock_server).await;

    let detail = create_test_dashboard(&mock_server)
        .get_detail("100", "pve1")
        .await
        .unwrap();

    assert_eq!(detail.status.status, detail.basic.status);
    assert_eq!(detail.status.uptime, 0);
    assert_eq!(detail.status.qmpstatus, "unknown");

    assert_eq!(detail.config.flag("onboot"), FlagState::Enabled);
    assert_eq!(detail.performance_history.len(), 2);
    assert!(detail.snapshots.is_empty());
    assert_eq!(detail.backups.len(), 1);
    assert_eq!(detail.backups[0].format, "vma.zst");
}

#[tokio::test]
async fn test_detail_status_precedence() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_listing(&mock_server).await;
    mount_get(
        &mock_server,
        "/nodes/pve1/qemu/100/status/current",
        json!({"data": {"status": "stopped", "uptime": 86400, "qmpstatus": "prelaunch"}}),
    )
    .await;
    mount_get(
        &mock_server,
        "/nodes/pve1/qemu/100/config",
        json!({"data": {"name": "renamed", "cores": 8, "memory": "16384", "ostype": "l26"}}),
    )
    .await;
    mount_get(&mock_server, "/nodes/pve1/qemu/100/snapshot", json!({"data": []})).await;
    mount_history_and_storage(&mock_server).await;

    let detail = create_test_dashboard(&mock_server)
        .get_detail("100", "pve1")
        .await
        .unwrap();

    assert_eq!(detail.basic.status, MachineStatus::Running);
    assert_eq!(detail.status.status, MachineStatus::Running);
    assert_eq!(detail.status.uptime, 86400);
    assert_eq!(detail.status.qmpstatus, "prelaunch");

    assert_eq!(detail.config.name, "web");
    assert_eq!(detail.config.cores, 2);
    assert_eq!(detail.config.memory_mb, 2048);
    assert_eq!(detail.config.text("ostype"), Some("l26"));
}

#[tokio::test]
async fn test_detail_unknown_machine_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_listing(&mock_server).await;

    let result = create_test_dashboard(&mock_server)
        .get_detail("999", "pve1")
        .await;
    assert!(matches!(result, Err(ProxmoxError::NotFound { .. })));
}

#[tokio::test]
async fn test_detail_unknown_node_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_failure(&mock_server, "/nodes/ghost/qemu", 500).await;

    let result = create_test_dashboard(&mock_server)
        .get_detail("100", "ghost")
        .await;
    assert!(matches!(result, Err(ProxmoxError::NotFound { .. })));
}

#[tokio::test]
async fn test_detail_node_name_cannot_reach_another_node() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 5).await;

    Mock::given(method("GET"))
        .and(path("/api2/json/nodes/pve2/qemu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"vmid": 100, "name": "secret-vm", "status": "running"}
        ]})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dashboard = create_test_dashboard(&mock_server);
    for node in [
        "../nodes/pve2",
        "pve1/../pve2",
        "pve2?vmid=100",
        "pve2#frag",
        "pve2/",
    ] {
        let result = dashboard.get_detail("100", node).await;
        assert!(
            matches!(result, Err(ProxmoxError::NotFound { .. })),
            "node {:?} should be not found, got {:?}",
            node,
            result.map(|d| (d.basic.name, d.basic.node))
        );
    }
}

#[tokio::test]
async fn test_detail_rejected_login_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_login_rejected(&mock_server).await;
    mount_listing(&mock_server).await;

    let result = create_test_dashboard(&mock_server)
        .get_detail("100", "pve1")
        .await;
    assert!(matches!(result, Err(ProxmoxError::Authentication(_))));
}
