use crate::{
    core::{
        domain::{
            error::{ProxmoxError, ProxmoxResult},
            model::{
                machine_detail::{
                    Backup, BackupRecord, ConfigFacet, MachineDetail, PerformanceSample, Snapshot,
                    SnapshotRecord, StatusFacet, VmStatusCurrent,
                },
                vm::VirtualMachine,
            },
            service::machine_normalizer::normalize_item,
            value_object::{ProxmoxNodeName, proxmox_node_name::is_vmid},
        },
        infrastructure::{
            api_client::ControlPlane,
            envelope::{decode_each, unwrap_array, unwrap_object},
        },
    },
    resources::application::service::machine_service::MachineService,
};
use serde_json::Value;
use tracing::{debug, warn};

/// Lookback window of the performance history.
const RRD_TIMEFRAME: &str = "hour";

/// Storage queried for backup volumes. Other storages are not searched.
const BACKUP_STORAGE: &str = "local";

/// Assembles the detail view of one machine.
pub struct DetailService<'a> {
    api: &'a dyn ControlPlane,
}

impl<'a> DetailService<'a> {
    pub fn new(api: &'a dyn ControlPlane) -> Self {
        Self { api }
    }

    /// Locates `machine_id` on `node` and fetches its five facets
    /// concurrently. Each facet falls back to its default on failure.
    ///
    /// # Errors
    /// Returns `ProxmoxError::NotFound` when `node` is not a valid node name,
    /// `machine_id` is not a VMID, or the node's machine listing fails or does
    /// not contain `machine_id`.
    pub async fn get(&self, machine_id: &str, node: &str) -> ProxmoxResult<MachineDetail> {
        if !is_vmid(machine_id) || ProxmoxNodeName::new(node).is_err() {
            warn!(machine_id, node, "rejected malformed machine reference");
            return Err(ProxmoxError::NotFound {
                machine_id: machine_id.to_string(),
                node: node.to_string(),
            });
        }

        let basic = self.locate(machine_id, node).await?;
        let base = format!("/nodes/{}/qemu/{}", node, machine_id);

        let (status, config, performance_history, snapshots, backups) = tokio::join!(
            self.status(&base, &basic),
            self.config(&base, &basic),
            self.performance_history(&base),
            self.snapshots(&base),
            self.backups(node, machine_id),
        );

        let detail = MachineDetail {
            status: or_default(status, "status", &basic, || StatusFacet::fallback(&basic)),
            config: or_default(config, "config", &basic, || ConfigFacet::fallback(&basic)),
            performance_history: or_default(performance_history, "rrddata", &basic, Vec::new),
            snapshots: or_default(snapshots, "snapshot", &basic, Vec::new),
            backups: or_default(backups, "backup", &basic, Vec::new),
            basic,
        };
        debug!(
            machine_id,
            node,
            samples = detail.performance_history.len(),
            snapshots = detail.snapshots.len(),
            backups = detail.backups.len(),
            "assembled machine detail"
        );
        Ok(detail)
    }

    async fn locate(&self, machine_id: &str, node: &str) -> ProxmoxResult<VirtualMachine> {
        let not_found = || ProxmoxError::NotFound {
            machine_id: machine_id.to_string(),
            node: node.to_string(),
        };

        let items = MachineService::new(self.api)
            .list_on_node(node)
            .await
            .map_err(|e| {
                warn!(node, error = %e, "machine listing failed during lookup");
                not_found()
            })?;

        items
            .into_iter()
            .find(|item| item.vmid.as_deref().map(str::trim) == Some(machine_id))
            .map(|item| normalize_item(item, node))
            .ok_or_else(not_found)
    }

    async fn status(&self, base: &str, basic: &VirtualMachine) -> ProxmoxResult<StatusFacet> {
        let map = unwrap_object(self.api.get(&format!("{}/status/current", base)).await?)?;
        let raw: VmStatusCurrent = serde_json::from_value(Value::Object(map))
            .map_err(|e| ProxmoxError::Shape(e.to_string()))?;
        Ok(StatusFacet::merge(raw, basic))
    }

    async fn config(&self, base: &str, basic: &VirtualMachine) -> ProxmoxResult<ConfigFacet> {
        let map = unwrap_object(self.api.get(&format!("{}/config", base)).await?)?;
        Ok(ConfigFacet::merge(map, basic))
    }

    async fn performance_history(&self, base: &str) -> ProxmoxResult<Vec<PerformanceSample>> {
        let path = format!("{}/rrddata?timeframe={}", base, RRD_TIMEFRAME);
        let samples = unwrap_array(self.api.get(&path).await?)?;
        Ok(samples
            .into_iter()
            .filter(Value::is_object)
            .map(PerformanceSample::from_json)
            .collect())
    }

    async fn snapshots(&self, base: &str) -> ProxmoxResult<Vec<Snapshot>> {
        let records = unwrap_array(self.api.get(&format!("{}/snapshot", base)).await?)?;
        Ok(decode_each::<SnapshotRecord>(records)
            .into_iter()
            .filter_map(Snapshot::from_record)
            .collect())
    }

    async fn backups(&self, node: &str, machine_id: &str) -> ProxmoxResult<Vec<Backup>> {
        let path = format!(
            "/nodes/{}/storage/{}/content?content=backup&vmid={}",
            node, BACKUP_STORAGE, machine_id
        );
        let records = unwrap_array(self.api.get(&path).await?)?;
        Ok(decode_each::<BackupRecord>(records)
            .into_iter()
            .filter_map(Backup::from_record)
            .collect())
    }
}

fn or_default<T>(
    result: ProxmoxResult<T>,
    facet: &str,
    basic: &VirtualMachine,
    default: impl FnOnce() -> T,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(facet, machine_id = %basic.id, node = %basic.node, error = %e, "facet unavailable, using default");
            default()
        }
    }
}
