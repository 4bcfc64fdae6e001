use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Deserializer, Serialize};

/// A `snapshot.kubevirt.io` VirtualMachineSnapshot, as submitted to the
/// API server. The status is not consulted during admission.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineSnapshot {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: VirtualMachineSnapshotSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_json::Value>,
}

/// The desired state of a snapshot. The whole struct is immutable once the
/// snapshot has been created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineSnapshotSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: VirtualMachineSnapshotSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<String>,
}

/// Wire representation of the snapshot source: at most one of the fields is
/// expected to be set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineSnapshotSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_machine_name: Option<String>,
}

// An explicit `null` is decoded like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// The entity a snapshot has been requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceReference<'a> {
    VirtualMachine(&'a str),
}

impl VirtualMachineSnapshotSource {
    pub fn reference(&self) -> Option<SourceReference<'_>> {
        self.virtual_machine_name
            .as_deref()
            .map(SourceReference::VirtualMachine)
    }
}
