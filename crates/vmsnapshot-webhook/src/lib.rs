pub mod api;
pub mod cli;
pub mod config;
pub mod tracing;

use ::tracing::info;
use anyhow::{Result, anyhow};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::{net::SocketAddr, sync::Arc};
use vmsnapshot_admission::{
    VirtualMachineSnapshotAdmitter, kubernetes::KubeVirtualMachineLookup,
    virtual_machine::VirtualMachineLookup,
};

use crate::{
    api::state::ApiServerState,
    config::{Config, TlsConfig},
};

pub struct WebhookServer {
    router: Router,
    addr: SocketAddr,
    tls_config: Option<RustlsConfig>,
}

impl WebhookServer {
    /// Build the server, reading VirtualMachines from the cluster the
    /// process is running against.
    pub async fn new_from_config(config: Config) -> Result<Self> {
        let client = kube::Client::try_default()
            .await
            .map_err(|e| anyhow!("Cannot connect to Kubernetes cluster: {e}"))?;
        let lookup =
            KubeVirtualMachineLookup::with_api_version(client, &config.virtual_machine_api_version)?;
        info!(
            api_version = lookup.api_version(),
            "reading VirtualMachines from Kubernetes"
        );

        Self::new_with_lookup(config, lookup).await
    }

    pub async fn new_with_lookup<L>(config: Config, lookup: L) -> Result<Self>
    where
        L: VirtualMachineLookup + 'static,
    {
        let tls_config = match config.tls_config {
            Some(tls_config) => Some(load_tls_config(tls_config).await?),
            None => None,
        };

        let state = Arc::new(ApiServerState {
            admitter: VirtualMachineSnapshotAdmitter::new(lookup),
        });

        Ok(Self {
            router: api::router(state),
            addr: config.addr,
            tls_config,
        })
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn run(self) -> Result<()> {
        match self.tls_config {
            Some(tls_config) => {
                info!(address = self.addr.to_string().as_str(), "started HTTPS server");
                axum_server::bind_rustls(self.addr, tls_config)
                    .serve(self.router.into_make_service())
                    .await?;
            }
            None => {
                let listener = tokio::net::TcpListener::bind(self.addr).await?;
                info!(address = self.addr.to_string().as_str(), "started HTTP server");
                axum::serve(listener, self.router).await?;
            }
        }

        Ok(())
    }
}

async fn load_tls_config(tls_config: TlsConfig) -> Result<RustlsConfig> {
    RustlsConfig::from_pem_file(&tls_config.cert_file, &tls_config.key_file)
        .await
        .map_err(|e| {
            anyhow!(
                "cannot load TLS certificate {} and key {}: {e}",
                tls_config.cert_file,
                tls_config.key_file
            )
        })
}
