use anyhow::anyhow;
use kube::{Api, api::ApiResource, core::DynamicObject};
use tracing::debug;

use crate::{
    constants::{
        VIRTUAL_MACHINE_GROUP, VIRTUAL_MACHINE_KIND, VIRTUAL_MACHINE_PLURAL, VIRTUAL_MACHINE_VERSION,
    },
    errors::LookupError,
    virtual_machine::{VirtualMachine, VirtualMachineLookup},
};

/// Retrieves VirtualMachines straight from the Kubernetes API server.
/// Every call results in a request, nothing is cached.
#[derive(Clone)]
pub struct KubeVirtualMachineLookup {
    client: kube::Client,
    resource: ApiResource,
}

impl KubeVirtualMachineLookup {
    pub fn new(client: kube::Client) -> Self {
        Self {
            client,
            resource: virtual_machine_resource(VIRTUAL_MACHINE_GROUP, VIRTUAL_MACHINE_VERSION),
        }
    }

    /// Read VirtualMachines using a specific `<group>/<version>`
    pub fn with_api_version(client: kube::Client, api_version: &str) -> anyhow::Result<Self> {
        let (group, version) = api_version
            .split_once('/')
            .ok_or_else(|| anyhow!("cannot determine group and version for {api_version}"))?;

        Ok(Self {
            client,
            resource: virtual_machine_resource(group, version),
        })
    }

    pub fn api_version(&self) -> &str {
        &self.resource.api_version
    }
}

fn virtual_machine_resource(group: &str, version: &str) -> ApiResource {
    ApiResource {
        group: group.to_string(),
        version: version.to_string(),
        api_version: format!("{group}/{version}"),
        kind: VIRTUAL_MACHINE_KIND.to_string(),
        plural: VIRTUAL_MACHINE_PLURAL.to_string(),
    }
}

impl VirtualMachineLookup for KubeVirtualMachineLookup {
    async fn get(&self, namespace: &str, name: &str) -> Result<VirtualMachine, LookupError> {
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), namespace, &self.resource);

        let object = api
            .get_opt(name)
            .await
            .map_err(|e| anyhow!("error fetching {}: {e}", self.resource.api_version))?
            .ok_or_else(|| LookupError::NotFound {
                namespace: namespace.to_owned(),
                name: name.to_owned(),
            })?;
        debug!(namespace, name, "VirtualMachine found");

        let value = serde_json::to_value(object)
            .map_err(|e| anyhow!("cannot serialize VirtualMachine {namespace}/{name}: {e}"))?;
        let vm = serde_json::from_value(value)
            .map_err(|e| anyhow!("cannot decode VirtualMachine {namespace}/{name}: {e}"))?;

        Ok(vm)
    }
}
