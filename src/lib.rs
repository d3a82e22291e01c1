mod auth;
mod core;
mod resources;

pub use crate::core::domain::{
    error::{ProxmoxError, ProxmoxResult, ValidationError},
    model::{
        dashboard_config::{DashboardConfig, RateLimitConfig},
        machine_detail::{
            Backup, ConfigFacet, ConfigValue, FlagState, MachineDetail, PerformanceSample,
            Snapshot, StatusFacet,
        },
        node::{Node, NodeStatus},
        proxmox_connection::ProxmoxConnection,
        vm::{ByteUsage, CpuUsage, MachineStatus, NetworkInfo, VirtualMachine},
    },
    service::{
        format::{format_bytes, format_uptime},
        machine_normalizer::normalize,
    },
};
use crate::{
    auth::application::service::login_service::LoginService,
    core::{
        domain::model::dashboard_config::DEFAULT_USERNAME, infrastructure::api_client::ApiClient,
    },
    resources::application::service::{
        detail_service::DetailService, machine_service::MachineService,
        node_service::NodeService,
    },
};
use tracing::instrument;

/// Read-only telemetry access to a Proxmox VE cluster.
///
/// Every query authenticates from scratch: it acquires a new ticket, builds a
/// transport around it, and drops both when it returns. Nothing is shared
/// between two queries, so a dashboard can be queried concurrently.
///
/// # Examples
///
/// ```no_run
/// use pve_telemetry::{ProxmoxDashboard, ProxmoxResult};
///
/// #[tokio::main]
/// async fn main() -> ProxmoxResult<()> {
///     let dashboard = ProxmoxDashboard::builder()
///         .api_url("https://pve.example.com:8006/api2/json")
///         .credentials("monitor@pve", "secret")
///         .accept_invalid_certs(true)
///         .build()?;
///
///     for vm in dashboard.list_machines().await? {
///         println!("{} on {}: {}", vm.name, vm.node, vm.status.as_str());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ProxmoxDashboard {
    connection: ProxmoxConnection,
}

/// Builder for ProxmoxDashboard configuration
#[derive(Debug, Default)]
pub struct ProxmoxDashboardBuilder {
    api_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    accept_invalid_certs: Option<bool>,
    rate_limit: Option<RateLimitConfig>,
}

impl ProxmoxDashboardBuilder {
    /// Base endpoint of the API, e.g. `https://pve:8006/api2/json`.
    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Identity and secret. The identity may carry an `@realm` suffix;
    /// without one the `pam` realm is used.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Whether to accept self-signed certificates. Defaults to `true`.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = Some(accept);
        self
    }

    /// Paces requests client-side. Off by default.
    pub fn rate_limit(mut self, requests_per_second: u32, burst_size: u32) -> Self {
        self.rate_limit = Some(RateLimitConfig {
            requests_per_second,
            burst_size,
        });
        self
    }

    /// Validates the settings. Performs no network I/O.
    ///
    /// # Errors
    /// Returns `ProxmoxError::Validation` for a missing or invalid value.
    pub fn build(self) -> ProxmoxResult<ProxmoxDashboard> {
        let config = DashboardConfig {
            api_url: self
                .api_url
                .ok_or_else(|| ValidationError::missing("api_url"))?,
            username: self
                .username
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: self
                .password
                .ok_or_else(|| ValidationError::missing("password"))?,
            accept_invalid_certs: self.accept_invalid_certs.unwrap_or(true),
            rate_limit: self.rate_limit,
        };
        ProxmoxDashboard::from_config(&config)
    }
}

impl ProxmoxDashboard {
    /// Creates a new builder for ProxmoxDashboard configuration
    pub fn builder() -> ProxmoxDashboardBuilder {
        ProxmoxDashboardBuilder::default()
    }

    /// Validates `config` into a dashboard.
    pub fn from_config(config: &DashboardConfig) -> ProxmoxResult<Self> {
        Ok(Self {
            connection: ProxmoxConnection::from_config(config)?,
        })
    }

    /// Reads `PROXMOX_*` settings from the environment (and `.env`).
    pub fn from_env() -> ProxmoxResult<Self> {
        Self::from_config(&DashboardConfig::from_env()?)
    }

    pub fn connection(&self) -> &ProxmoxConnection {
        &self.connection
    }

    /// Lists the cluster hosts.
    ///
    /// # Errors
    /// Fails only with `ProxmoxError::Authentication`. A failed listing is an
    /// empty list.
    #[instrument(skip(self))]
    pub async fn list_nodes(&self) -> ProxmoxResult<Vec<Node>> {
        let api = self.session().await?;
        Ok(NodeService::new(&api).list().await)
    }

    /// Lists the machines of every host, fanned out across hosts.
    ///
    /// # Errors
    /// Fails only with `ProxmoxError::Authentication`. Hosts whose listing
    /// fails contribute nothing.
    #[instrument(skip(self))]
    pub async fn list_machines(&self) -> ProxmoxResult<Vec<VirtualMachine>> {
        let api = self.session().await?;
        Ok(MachineService::new(&api).list_all().await)
    }

    /// Fetches the detail view of machine `machine_id` on `node`.
    ///
    /// # Errors
    /// `ProxmoxError::Authentication` when login fails, and
    /// `ProxmoxError::NotFound` when `node` does not list `machine_id`, or
    /// when either is not a well-formed node name or machine id.
    #[instrument(skip(self))]
    pub async fn get_detail(&self, machine_id: &str, node: &str) -> ProxmoxResult<MachineDetail> {
        let api = self.session().await?;
        DetailService::new(&api).get(machine_id, node).await
    }

    /// Builds one HTTP client, logs in over it, and hands it to the
    /// transport.
    async fn session(&self) -> ProxmoxResult<ApiClient> {
        let http_client = self
            .connection
            .http_client()
            .map_err(|e| ProxmoxError::Authentication(e.to_string()))?;
        let auth = LoginService::new()
            .execute(&http_client, &self.connection)
            .await?;
        Ok(ApiClient::new(http_client, &self.connection, auth))
    }
}

#[cfg(test)]
mod tests;
