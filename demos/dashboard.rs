use pve_telemetry::{ProxmoxDashboard, ProxmoxResult, format_bytes, format_uptime};
use tracing_subscriber::EnvFilter;

/// Prints the cluster overview, then the detail of the machine named by
/// `cargo run --example dashboard -- <vmid> <node>` if given.
#[tokio::main]
async fn main() -> ProxmoxResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dashboard = ProxmoxDashboard::from_env()?;

    for node in dashboard.list_nodes().await? {
        println!(
            "node {:<12} {:?}  mem {} / {}  up {}",
            node.name,
            node.status,
            format_bytes(node.mem_used_bytes, 1),
            format_bytes(node.mem_capacity_bytes, 1),
            format_uptime(node.uptime_seconds),
        );
    }

    for vm in dashboard.list_machines().await? {
        println!(
            "  {:>5} {:<20} {:<8} cpu {:>5.1}%  mem {:>5.1}%  disk {:>5.1}%  {}  on {}",
            vm.id,
            vm.name,
            vm.status.as_str(),
            vm.cpu_percent(),
            vm.memory_ratio() * 100.0,
            vm.disk_ratio() * 100.0,
            vm.network.mac_address,
            vm.node,
        );
    }

    let mut args = std::env::args().skip(1);
    if let (Some(vmid), Some(node)) = (args.next(), args.next()) {
        let detail = dashboard.get_detail(&vmid, &node).await?;
        println!("\n{} ({}) on {}", detail.config.name, detail.basic.id, node);
        println!("  status    {} / qmp {}", detail.status.status.as_str(), detail.status.qmpstatus);
        println!("  uptime    {}", format_uptime(detail.status.uptime));
        println!("  cores     {}", detail.config.cores);
        println!("  memory    {} MB", detail.config.memory_mb);
        for (key, value) in detail
            .config
            .entries
            .iter()
            .filter(|(k, _)| k.starts_with("net") || k.starts_with("scsi") || k.starts_with("virtio"))
        {
            println!("  {:<9} {:?}", key, value);
        }
        println!("  samples   {}", detail.performance_history.len());
        for snapshot in &detail.snapshots {
            println!("  snapshot  {} @ {}", snapshot.name, snapshot.taken_at_epoch_seconds);
        }
        for backup in &detail.backups {
            println!(
                "  backup    {} ({})",
                backup.volume_id,
                format_bytes(backup.size_bytes, 2)
            );
        }
    }

    Ok(())
}
