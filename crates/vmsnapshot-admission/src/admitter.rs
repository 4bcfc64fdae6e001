use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
use tracing::{debug, info};

use crate::{
    admission_request::{AdmissionRequest, Operation},
    admission_response::StatusCause,
    constants::{SNAPSHOT_API_GROUP, SNAPSHOT_RESOURCE},
    errors::{AdmissionError, LookupError, Result},
    field_path::FieldPath,
    virtual_machine::VirtualMachineLookup,
    virtual_machine_snapshot::{SourceReference, VirtualMachineSnapshot},
};

/// The outcome of a successful evaluation. Requests that could not be
/// evaluated end up as an `AdmissionError` instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Vec<StatusCause>),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Validates VirtualMachineSnapshot objects on CREATE and UPDATE.
///
/// The admitter keeps no state besides the handle used to read
/// VirtualMachines, hence it can be shared between concurrent requests.
pub struct VirtualMachineSnapshotAdmitter<L> {
    lookup: L,
}

impl<L: VirtualMachineLookup> VirtualMachineSnapshotAdmitter<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub async fn admit(&self, request: &AdmissionRequest) -> Result<Decision> {
        if request.resource.group != SNAPSHOT_API_GROUP
            || request.resource.resource != SNAPSHOT_RESOURCE
        {
            return Err(AdmissionError::UnexpectedResource(request.resource.clone()));
        }

        let snapshot = decode_snapshot(request.object.as_ref(), "object")?;

        let causes = match &request.operation {
            Operation::Create => {
                let namespace = request.namespace.as_deref().unwrap_or_default();
                self.validate_create(namespace, &snapshot).await?
            }
            Operation::Update => {
                let previous = decode_snapshot(request.old_object.as_ref(), "oldObject")?;
                validate_update(&previous, &snapshot)
            }
            operation => return Err(AdmissionError::UnexpectedOperation(operation.clone())),
        };

        if causes.is_empty() {
            Ok(Decision::Allow)
        } else {
            info!(
                uid = request.uid.as_str(),
                causes = causes.len(),
                "rejected VirtualMachineSnapshot admission"
            );
            Ok(Decision::Deny(causes))
        }
    }

    async fn validate_create(
        &self,
        namespace: &str,
        snapshot: &VirtualMachineSnapshot,
    ) -> Result<Vec<StatusCause>> {
        let source_field = FieldPath::new("spec").child("source");

        match snapshot.spec.source.reference() {
            Some(SourceReference::VirtualMachine(name)) => {
                self.validate_create_vm(&source_field.child("virtualMachineName"), namespace, name)
                    .await
            }
            None => Ok(vec![StatusCause::not_found(
                "missing source name",
                &source_field,
            )]),
        }
    }

    /// Ensure the VirtualMachine referenced by a new snapshot exists and is
    /// not running.
    pub async fn validate_create_vm(
        &self,
        field: &FieldPath,
        namespace: &str,
        name: &str,
    ) -> Result<Vec<StatusCause>> {
        let vm = match self.lookup.get(namespace, name).await {
            Ok(vm) => vm,
            // reported as an invalid value, not as a missing one
            Err(LookupError::NotFound { .. }) => {
                return Ok(vec![StatusCause::invalid(
                    format!("VirtualMachine \"{name}\" does not exist"),
                    field,
                )]);
            }
            Err(source) => {
                return Err(AdmissionError::Lookup {
                    namespace: namespace.to_owned(),
                    name: name.to_owned(),
                    source,
                });
            }
        };

        let mut causes = Vec::new();

        if vm.is_running() {
            debug!(namespace, name, "VirtualMachine is running");
            causes.push(StatusCause::invalid(
                format!("VirtualMachine \"{name}\" is running"),
                field,
            ));
        }

        Ok(causes)
    }
}

fn validate_update(
    previous: &VirtualMachineSnapshot,
    snapshot: &VirtualMachineSnapshot,
) -> Vec<StatusCause> {
    if previous.spec == snapshot.spec {
        return Vec::new();
    }

    vec![StatusCause::invalid(
        "spec in immutable after creation",
        &FieldPath::new("spec"),
    )]
}

fn decode_snapshot(
    raw: Option<&RawExtension>,
    field: &'static str,
) -> Result<VirtualMachineSnapshot> {
    let raw = raw.ok_or(AdmissionError::MissingObject(field))?;

    serde_json::from_value(raw.0.clone())
        .map_err(|source| AdmissionError::Deserialize { field, source })
}
