use crate::{
    core::{
        domain::{
            error::ProxmoxResult,
            model::vm::{VirtualMachine, VmListItem},
            service::machine_normalizer::{decode_record, normalize_item},
            value_object::ProxmoxNodeName,
        },
        infrastructure::{api_client::ControlPlane, envelope::unwrap_array},
    },
    resources::application::service::node_service::NodeService,
};
use futures::future::join_all;
use tracing::{debug, warn};

/// Lists guest machines, per host or across the whole cluster.
pub struct MachineService<'a> {
    api: &'a dyn ControlPlane,
}

impl<'a> MachineService<'a> {
    pub fn new(api: &'a dyn ControlPlane) -> Self {
        Self { api }
    }

    /// Fetches the raw machine records of one host, in source order.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Validation` for a node name that is not a DNS
    /// label (no request is sent), otherwise the transport or shape error of
    /// the listing call. Callers decide whether that is a default or an
    /// outcome.
    pub async fn list_on_node(&self, node: &str) -> ProxmoxResult<Vec<VmListItem>> {
        let node = ProxmoxNodeName::new(node)?;
        let raw = self
            .api
            .get(&format!("/nodes/{}/qemu", node.as_str()))
            .await?;
        Ok(unwrap_array(raw)?.iter().map(decode_record).collect())
    }

    /// Lists the machines of every host.
    ///
    /// Hosts are queried concurrently. A host whose listing fails contributes
    /// nothing and does not affect the others. The result keeps node order,
    /// then source order within a node. Machines sharing an id on different
    /// nodes are all kept.
    pub async fn list_all(&self) -> Vec<VirtualMachine> {
        let nodes = NodeService::new(self.api).list().await;
        if nodes.is_empty() {
            return Vec::new();
        }

        let per_node = join_all(nodes.iter().map(|node| async move {
            match self.list_on_node(&node.name).await {
                Ok(items) => items
                    .into_iter()
                    .map(|item| normalize_item(item, &node.name))
                    .collect::<Vec<_>>(),
                Err(e) => {
                    warn!(node = %node.name, error = %e, "machine listing failed");
                    Vec::new()
                }
            }
        }))
        .await;

        let machines: Vec<VirtualMachine> = per_node.into_iter().flatten().collect();
        debug!(nodes = nodes.len(), count = machines.len(), "listed machines");
        machines
    }
}
