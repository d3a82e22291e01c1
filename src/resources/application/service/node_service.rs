use crate::core::{
    domain::{
        error::ProxmoxResult,
        model::node::{Node, NodeListItem},
    },
    infrastructure::{
        api_client::ControlPlane,
        envelope::{decode_each, unwrap_array},
    },
};
use tracing::{debug, warn};

const NODES_PATH: &str = "/nodes";

/// Lists the cluster hosts.
pub struct NodeService<'a> {
    api: &'a dyn ControlPlane,
}

impl<'a> NodeService<'a> {
    pub fn new(api: &'a dyn ControlPlane) -> Self {
        Self { api }
    }

    /// Returns every named host in the order the control plane lists them.
    ///
    /// Never fails: a transport error or a malformed payload yields an empty
    /// list, so the dashboard degrades to partial visibility.
    pub async fn list(&self) -> Vec<Node> {
        match self.fetch().await {
            Ok(nodes) => {
                debug!(count = nodes.len(), "listed nodes");
                nodes
            }
            Err(e) => {
                warn!(error = %e, "node listing failed");
                Vec::new()
            }
        }
    }

    async fn fetch(&self) -> ProxmoxResult<Vec<Node>> {
        let items = unwrap_array(self.api.get(NODES_PATH).await?)?;
        Ok(decode_each::<NodeListItem>(items)
            .into_iter()
            .filter_map(Node::from_raw)
            .collect())
    }
}
