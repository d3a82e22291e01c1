pub mod dashboard_config;
pub mod machine_detail;
pub mod node;
pub mod proxmox_auth;
pub mod proxmox_connection;
pub mod vm;
