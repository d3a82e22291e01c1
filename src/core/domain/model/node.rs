//! Cluster hosts as returned by the `/nodes` endpoint.

use crate::core::domain::value_object::serde_helpers::lenient;
use serde::{Deserialize, Serialize};

/// A node record as the control plane sends it.
///
/// Every field is optional and decoded leniently so that a partial record
/// never rejects the whole listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NodeListItem {
    /// The node name (e.g., "pve1").
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub node: Option<String>,
    /// Current node status (e.g., "online", "offline", "unknown").
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    /// CPU usage (0.0 to 1.0).
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub cpu: Option<f64>,
    /// Number of logical CPUs.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub maxcpu: Option<u64>,
    /// Memory usage in bytes.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub mem: Option<u64>,
    /// Memory capacity in bytes.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub maxmem: Option<u64>,
    /// System uptime in seconds.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub uptime: Option<u64>,
}

/// Reachability of a node as reported by the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Online,
    Other,
}

impl NodeStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("online") => NodeStatus::Online,
            _ => NodeStatus::Other,
        }
    }
}

/// A cluster host snapshot. Identified by `name` only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    pub status: NodeStatus,
    /// CPU load as reported (fraction of `cpu_capacity_units`).
    pub cpu_used_units: f64,
    pub cpu_capacity_units: u64,
    pub mem_used_bytes: u64,
    pub mem_capacity_bytes: u64,
    pub uptime_seconds: u64,
}

impl Node {
    /// Renames a raw record into a `Node`. Records without a name are
    /// dropped because nothing can be addressed on them.
    pub fn from_raw(raw: NodeListItem) -> Option<Self> {
        let name = raw.node.filter(|n| !n.trim().is_empty())?;
        Some(Self {
            name,
            status: NodeStatus::parse(raw.status.as_deref()),
            cpu_used_units: raw.cpu.unwrap_or(0.0),
            cpu_capacity_units: raw.maxcpu.unwrap_or(0),
            mem_used_bytes: raw.mem.unwrap_or(0),
            mem_capacity_bytes: raw.maxmem.unwrap_or(0),
            uptime_seconds: raw.uptime.unwrap_or(0),
        })
    }
}
