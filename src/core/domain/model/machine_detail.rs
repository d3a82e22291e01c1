//! The per-machine detail aggregate and its facets.
//!
//! A [`MachineDetail`] is assembled fresh for each request from five
//! independently fetched facets plus the enumeration record (`basic`).

use crate::core::domain::{
    model::vm::{MachineStatus, VirtualMachine},
    value_object::serde_helpers::{lenient, value_as_f64, value_as_u64},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// `qmpstatus` reported when the status facet could not be fetched.
pub const QMP_STATUS_UNKNOWN: &str = "unknown";

/// Raw shape of `/nodes/{node}/qemu/{id}/status/current`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VmStatusCurrent {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub uptime: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub qmpstatus: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub cpu: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub mem: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub maxmem: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub netin: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub netout: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub diskread: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub diskwrite: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub pid: Option<u64>,
}

/// Current runtime status of a machine.
///
/// `status` always carries the enumeration-derived state, never the value
/// the status endpoint reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusFacet {
    pub status: MachineStatus,
    pub uptime: u64,
    pub qmpstatus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mem: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxmem: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netin: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diskread: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diskwrite: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u64>,
}

impl StatusFacet {
    /// The status used when the status endpoint fails.
    pub fn fallback(basic: &VirtualMachine) -> Self {
        Self::merge(VmStatusCurrent::default(), basic)
    }

    /// Merges the raw status facet, then reconciles `status` from `basic`.
    pub fn merge(raw: VmStatusCurrent, basic: &VirtualMachine) -> Self {
        Self {
            status: basic.status,
            uptime: raw.uptime.unwrap_or(0),
            qmpstatus: raw
                .qmpstatus
                .unwrap_or_else(|| QMP_STATUS_UNKNOWN.to_string()),
            cpu: raw.cpu,
            mem: raw.mem,
            maxmem: raw.maxmem,
            netin: raw.netin,
            netout: raw.netout,
            diskread: raw.diskread,
            diskwrite: raw.diskwrite,
            pid: raw.pid,
        }
    }
}

/// One scalar value of the open-ended machine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl ConfigValue {
    /// Converts a JSON value. `null` yields `None`; non-integral numbers and
    /// nested structures are kept as text.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(ConfigValue::Flag(b)),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Text(n.to_string()),
            }),
            Value::String(s) => Some(ConfigValue::Text(s)),
            other => Some(ConfigValue::Text(other.to_string())),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            ConfigValue::Text(s) => s.trim().parse().ok(),
            ConfigValue::Flag(_) => None,
        }
    }
}

/// Explicit tri-state for `0`/`1` style configuration toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagState {
    Enabled,
    Disabled,
    /// The key is absent or its value is not a recognisable toggle.
    Unspecified,
}

/// Machine configuration.
///
/// `name`, `cores` and `memory_mb` are reconciled from the enumeration pass;
/// every other key comes verbatim from the config endpoint in `entries`.
/// Filtering `entries` by key prefix (`net*`, `scsi*`, `virtio*`, `ide*`,
/// `sata*`) is left to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigFacet {
    pub name: String,
    pub cores: u32,
    /// Configured memory in MiB.
    #[serde(rename = "memory")]
    pub memory_mb: u64,
    #[serde(flatten)]
    pub entries: BTreeMap<String, ConfigValue>,
}

impl ConfigFacet {
    const RECONCILED_KEYS: [&'static str; 3] = ["name", "cores", "memory"];

    /// The config used when the config endpoint fails.
    pub fn fallback(basic: &VirtualMachine) -> Self {
        Self::merge(serde_json::Map::new(), basic)
    }

    /// Merges the raw config map, then overwrites the identity and sizing
    /// fields from `basic`.
    pub fn merge(raw: serde_json::Map<String, Value>, basic: &VirtualMachine) -> Self {
        let entries = raw
            .into_iter()
            .filter(|(key, _)| !Self::RECONCILED_KEYS.contains(&key.as_str()))
            .filter_map(|(key, value)| ConfigValue::from_json(value).map(|v| (key, v)))
            .collect();
        Self {
            name: basic.name.clone(),
            cores: basic.cpu.cores,
            memory_mb: basic.memory_total_mb(),
            entries,
        }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Text value of a key, if present as text.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_text)
    }

    /// Reads a toggle: non-zero is enabled, zero is disabled, and an absent
    /// or non-numeric value is unspecified.
    pub fn flag(&self, key: &str) -> FlagState {
        match self.get(key) {
            Some(ConfigValue::Flag(true)) => FlagState::Enabled,
            Some(ConfigValue::Flag(false)) => FlagState::Disabled,
            Some(value) => match value.as_integer() {
                Some(0) => FlagState::Disabled,
                Some(_) => FlagState::Enabled,
                None => FlagState::Unspecified,
            },
            None => FlagState::Unspecified,
        }
    }
}

/// One performance-history sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceSample {
    /// Sample timestamp (UNIX epoch), when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
    /// Every other numeric series value in the sample, by name.
    #[serde(flatten)]
    pub metrics: BTreeMap<String, f64>,
}

impl PerformanceSample {
    /// Decodes one sample map, dropping non-numeric values.
    pub fn from_json(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        let mut sample = Self::default();
        for (key, value) in map {
            if key == "time" {
                sample.time = value_as_u64(&value);
            } else if let Some(v) = value_as_f64(&value) {
                sample.metrics.insert(key, v);
            }
        }
        sample
    }
}

/// A snapshot from `/nodes/{node}/qemu/{id}/snapshot`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub name: String,
    pub taken_at_epoch_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SnapshotRecord {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub snaptime: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub parent: Option<String>,
}

impl Snapshot {
    /// Name of the synthetic entry the control plane appends for the live
    /// state. It is not a snapshot.
    pub const CURRENT_MARKER: &'static str = "current";

    pub(crate) fn from_record(record: SnapshotRecord) -> Option<Self> {
        let name = record.name.filter(|n| !n.is_empty())?;
        if name == Self::CURRENT_MARKER {
            return None;
        }
        Some(Self {
            name,
            taken_at_epoch_seconds: record.snaptime.unwrap_or(0),
            description: record.description.filter(|d| !d.trim().is_empty()),
            parent: record.parent,
        })
    }
}

/// A backup volume from the storage content listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub volume_id: String,
    pub created_at_epoch_seconds: u64,
    pub format: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct BackupRecord {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub volid: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub ctime: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub size: Option<u64>,
}

impl Backup {
    pub(crate) fn from_record(record: BackupRecord) -> Option<Self> {
        Some(Self {
            volume_id: record.volid.filter(|v| !v.is_empty())?,
            created_at_epoch_seconds: record.ctime.unwrap_or(0),
            format: record.format.unwrap_or_default(),
            size_bytes: record.size.unwrap_or(0),
        })
    }
}

/// Everything the detail view shows about one machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineDetail {
    pub status: StatusFacet,
    pub config: ConfigFacet,
    /// Samples in source order.
    pub performance_history: Vec<PerformanceSample>,
    pub snapshots: Vec<Snapshot>,
    pub backups: Vec<Backup>,
    pub basic: VirtualMachine,
}
