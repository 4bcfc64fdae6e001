use std::future::Future;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

use crate::errors::LookupError;

/// The subset of a `kubevirt.io` VirtualMachine needed to decide whether it
/// can be snapshotted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualMachine {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: VirtualMachineSpec,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualMachineSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
}

impl VirtualMachine {
    /// An unset `running` flag counts as stopped.
    pub fn is_running(&self) -> bool {
        self.spec.running == Some(true)
    }
}

/// Read access to the VirtualMachines of the cluster.
pub trait VirtualMachineLookup: Send + Sync {
    fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> impl Future<Output = Result<VirtualMachine, LookupError>> + Send;
}
