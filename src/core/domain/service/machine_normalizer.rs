//! Maps raw `/nodes/{node}/qemu` records onto [`VirtualMachine`].
//!
//! Normalization is total: every absent or malformed field is replaced by a
//! default, so one partial record can never abort enumeration of the rest.

use crate::core::domain::model::vm::{
    ByteUsage, CpuUsage, MachineStatus, NetworkInfo, VirtualMachine, VmListItem,
};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Placeholder when no MAC address can be extracted.
pub const MAC_UNAVAILABLE: &str = "N/A";

/// Id used for records that carry no `vmid` at all.
pub const UNKNOWN_ID: &str = "unknown";

static MAC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}").expect("static MAC pattern is valid")
});

/// Decodes a raw record. Anything that is not a JSON object yields an empty
/// record.
pub fn decode_record(raw: &Value) -> VmListItem {
    if !raw.is_object() {
        return VmListItem::default();
    }
    serde_json::from_value(raw.clone()).unwrap_or_default()
}

/// Normalizes one raw record owned by `node`.
pub fn normalize(raw: &Value, node: &str) -> VirtualMachine {
    normalize_item(decode_record(raw), node)
}

/// Normalizes an already decoded record owned by `node`.
pub fn normalize_item(item: VmListItem, node: &str) -> VirtualMachine {
    let id = item
        .vmid
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| UNKNOWN_ID.to_string());
    let name = item
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("VM {}", id));

    VirtualMachine {
        name,
        status: MachineStatus::parse(item.status.as_deref()),
        memory: ByteUsage {
            used: item.mem.unwrap_or(0),
            total: item.maxmem.unwrap_or(0),
        },
        cpu: CpuUsage {
            usage: item.cpu.unwrap_or(0.0).clamp(0.0, 1.0),
            cores: item.cpus.unwrap_or(1).max(1),
        },
        disk: ByteUsage {
            used: item.disk.unwrap_or(0),
            total: item.maxdisk.unwrap_or(1).max(1),
        },
        network: NetworkInfo {
            mac_address: item
                .net0
                .as_deref()
                .and_then(extract_mac)
                .unwrap_or_else(|| MAC_UNAVAILABLE.to_string()),
            ip_address: item.ip.filter(|ip| !ip.trim().is_empty()),
        },
        uptime: item.uptime,
        node: node.to_string(),
        id,
    }
}

/// Finds the first colon- or hyphen-delimited six-byte hex address in an
/// interface descriptor.
pub fn extract_mac(descriptor: &str) -> Option<String> {
    MAC_PATTERN
        .find(descriptor)
        .map(|m| m.as_str().to_string())
}
