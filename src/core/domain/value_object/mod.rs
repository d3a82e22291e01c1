mod proxmox_csrf_token;
pub(crate) mod proxmox_node_name;
mod proxmox_password;
mod proxmox_realm;
mod proxmox_ticket;
mod proxmox_uri;
mod proxmox_username;
pub(crate) mod serde_helpers;

pub use proxmox_csrf_token::ProxmoxCSRFToken;
pub use proxmox_node_name::ProxmoxNodeName;
pub use proxmox_password::ProxmoxPassword;
pub use proxmox_realm::ProxmoxRealm;
pub use proxmox_ticket::ProxmoxTicket;
pub use proxmox_uri::ProxmoxUrl;
pub use proxmox_username::ProxmoxUsername;
