use crate::{
    ByteUsage, CpuUsage, MachineStatus, NetworkInfo, ProxmoxError, VirtualMachine,
    tests::{create_test_dashboard, mount_failure, mount_get, mount_login, mount_login_rejected},
};
use serde_json::json;
use wiremock::MockServer;

#[tokio::test]
async fn test_vms_list_reference_scenario() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_get(
        &mock_server,
        "/nodes",
        json!({"data": [{"node": "pve1", "status": "online"}]}),
    )
    .await;
    mount_get(
        &mock_server,
        "/nodes/pve1/qemu",
        json!({"data": [{
            "vmid": 100,
            "status": "running",
            "mem": 512000000,
            "maxmem": 1073741824,
            "cpu": 0.15,
            "cpus": 2,
            "net0": "virtio=AA:BB:CC:DD:EE:FF,bridge=vmbr0"
        }]}),
    )
    .await;

    let machines = create_test_dashboard(&mock_server)
        .list_machines()
        .await
        .unwrap();

    assert_eq!(
        machines,
        vec![VirtualMachine {
            id: "100".to_string(),
            name: "VM 100".to_string(),
            status: MachineStatus::Running,
            memory: ByteUsage {
                used: 512000000,
                total: 1073741824,
            },
            cpu: CpuUsage {
                usage: 0.15,
                cores: 2,
            },
            disk: ByteUsage { used: 0, total: 1 },
            network: NetworkInfo {
                mac_address: "AA:BB:CC:DD:EE:FF".to_string(),
                ip_address: None,
            },
            uptime: None,
            node: "pve1".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_vms_list_failing_node_is_isolated() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_get(
        &mock_server,
        "/nodes",
        json!({"data": [{"node": "pve1"}, {"node": "pve2"}, {"node": "pve3"}]}),
    )
    .await;
    mount_get(
        &mock_server,
        "/nodes/pve1/qemu",
        json!({"data": [{"vmid": 100, "name": "web"}, {"vmid": 101, "name": "db"}]}),
    )
    .await;
    mount_failure(&mock_server, "/nodes/pve2/qemu", 500).await;
    mount_get(
        &mock_server,
        "/nodes/pve3/qemu",
        json!({"data": [{"vmid": 300, "name": "cache"}]}),
    )
    .await;

    let machines = create_test_dashboard(&mock_server)
        .list_machines()
        .await
        .unwrap();

    let names: Vec<_> = machines.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["web", "db", "cache"]);
    assert!(machines.iter().all(|m| m.node != "pve2"));
}

#[tokio::test]
async fn test_vms_list_same_id_on_two_nodes() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_get(
        &mock_server,
        "/nodes",
        json!({"data": [{"node": "pve1"}, {"node": "pve2"}]}),
    )
    .await;
    mount_get(&mock_server, "/nodes/pve1/qemu", json!({"data": [{"vmid": 100}]})).await;
    mount_get(&mock_server, "/nodes/pve2/qemu", json!({"data": [{"vmid": 100}]})).await;

    let machines = create_test_dashboard(&mock_server)
        .list_machines()
        .await
        .unwrap();

    assert_eq!(machines.len(), 2);
    assert_eq!(
        machines
            .iter()
            .map(|m| (m.id.as_str(), m.node.as_str()))
            .collect::<Vec<_>>(),
        [("100", "pve1"), ("100", "pve2")]
    );
}

#[tokio::test]
async fn test_vms_list_without_nodes() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, 1).await;
    mount_failure(&mock_server, "/nodes", 503).await;

    let machines = create_test_dashboard(&mock_server)
        .list_machines()
        .await
        .unwrap();
    assert!(machines.is_empty());
}

#[tokio::test]
async fn test_vms_list_rejected_login_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_login_rejected(&mock_server).await;

    let result = create_test_dashboard(&mock_server).list_machines().await;
    assert!(matches!(result, Err(ProxmoxError::Authentication(_))));
}
