use axum::Router;
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};
use vmsnapshot_admission::{
    errors::LookupError,
    virtual_machine::{VirtualMachine, VirtualMachineLookup},
};
use vmsnapshot_webhook::{WebhookServer, config::Config};

/// In-memory stand-in for the cluster, keyed by `(namespace, name)`.
#[derive(Clone, Default)]
pub(crate) struct FakeCluster {
    vms: Arc<HashMap<(String, String), VirtualMachine>>,
    unreachable: bool,
    lookups: Arc<AtomicUsize>,
}

impl FakeCluster {
    pub(crate) fn new() -> Self {
        let vms = [("vm-stopped", Some(false)), ("vm-running", Some(true)), ("vm-new", None)]
            .into_iter()
            .map(|(name, running)| {
                let vm: VirtualMachine = serde_json::from_value(serde_json::json!({
                    "metadata": {"name": name, "namespace": "default"},
                    "spec": {"running": running},
                }))
                .unwrap();
                (("default".to_owned(), name.to_owned()), vm)
            })
            .collect();

        FakeCluster {
            vms: Arc::new(vms),
            ..Default::default()
        }
    }

    pub(crate) fn unreachable() -> Self {
        FakeCluster {
            unreachable: true,
            ..Default::default()
        }
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl VirtualMachineLookup for FakeCluster {
    async fn get(&self, namespace: &str, name: &str) -> Result<VirtualMachine, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return Err(LookupError::Other(anyhow::anyhow!(
                "dial tcp 10.96.0.1:443: connect: connection refused"
            )));
        }

        self.vms
            .get(&(namespace.to_owned(), name.to_owned()))
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                namespace: namespace.to_owned(),
                name: name.to_owned(),
            })
    }
}

pub(crate) fn default_test_config() -> Config {
    Config {
        addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
        tls_config: None,
        virtual_machine_api_version: "kubevirt.io/v1".to_owned(),
        log_level: "info".to_owned(),
        log_fmt: "json".to_owned(),
        log_no_color: false,
    }
}

pub(crate) async fn app(cluster: FakeCluster) -> Router {
    let server = WebhookServer::new_with_lookup(default_test_config(), cluster)
        .await
        .unwrap();

    server.router()
}
