//! Domain models for QEMU guest machines.
//!
//! `VmListItem` is the record shape of the `/nodes/{node}/qemu` endpoint.
//! `VirtualMachine` is the canonical entity handed to presentation code.

use crate::core::domain::value_object::serde_helpers::lenient;
use serde::{Deserialize, Serialize};

/// A guest machine as returned by the `/nodes/{node}/qemu` endpoint.
///
/// All fields are optional and decoded leniently; normalization into a
/// [`VirtualMachine`] fills in the defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VmListItem {
    /// The VM identifier, sent as a number or a string.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub vmid: Option<String>,
    /// Human-readable name.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    /// Current status (e.g., "running", "stopped").
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    /// CPU usage (0.0 to 1.0).
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub cpu: Option<f64>,
    /// Number of virtual CPUs.
    #[serde(default, alias = "maxcpu", deserialize_with = "lenient::opt_u32")]
    pub cpus: Option<u32>,
    /// Memory usage in bytes.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub mem: Option<u64>,
    /// Maximum memory in bytes.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub maxmem: Option<u64>,
    /// Disk usage in bytes.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub disk: Option<u64>,
    /// Maximum disk space in bytes.
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub maxdisk: Option<u64>,
    /// Uptime in seconds (if running).
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub uptime: Option<u64>,
    /// First network interface descriptor, e.g. `virtio=AA:BB:..,bridge=vmbr0`.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub net0: Option<String>,
    /// Guest IP address, when the control plane knows it.
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub ip: Option<String>,
}

/// Run state of a guest machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    Running,
    #[default]
    Stopped,
    Paused,
}

impl MachineStatus {
    /// Maps the control plane's status strings. Anything unrecognised counts
    /// as stopped.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("running") => MachineStatus::Running,
            Some("paused") | Some("suspended") => MachineStatus::Paused,
            _ => MachineStatus::Stopped,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Running => "running",
            MachineStatus::Stopped => "stopped",
            MachineStatus::Paused => "paused",
        }
    }
}

/// Used/total pair in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ByteUsage {
    pub used: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CpuUsage {
    /// Fraction in `[0, 1]`, not a percentage.
    pub usage: f64,
    /// Always at least 1.
    pub cores: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    /// MAC address of `net0`, or `"N/A"`.
    pub mac_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// The canonical guest machine entity.
///
/// `id` is only unique per node; a machine is identified by `(id, node)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualMachine {
    pub id: String,
    pub name: String,
    pub status: MachineStatus,
    pub memory: ByteUsage,
    pub cpu: CpuUsage,
    /// `total` is never 0.
    pub disk: ByteUsage,
    pub network: NetworkInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    pub node: String,
}

impl VirtualMachine {
    /// CPU usage as a percentage.
    pub fn cpu_percent(&self) -> f64 {
        self.cpu.usage * 100.0
    }

    pub fn disk_ratio(&self) -> f64 {
        self.disk.used as f64 / self.disk.total.max(1) as f64
    }

    /// Memory ratio, 0 when the total is unknown.
    pub fn memory_ratio(&self) -> f64 {
        if self.memory.total == 0 {
            0.0
        } else {
            self.memory.used as f64 / self.memory.total as f64
        }
    }

    /// Configured memory in whole MiB.
    pub fn memory_total_mb(&self) -> u64 {
        self.memory.total / (1024 * 1024)
    }
}
