extern crate k8s_openapi;
extern crate kube;

pub mod admission_request;
pub mod admission_response;
pub mod admitter;
pub mod constants;
pub mod errors;
pub mod field_path;
pub mod kubernetes;
pub mod virtual_machine;
pub mod virtual_machine_snapshot;

pub use admitter::{Decision, VirtualMachineSnapshotAdmitter};
