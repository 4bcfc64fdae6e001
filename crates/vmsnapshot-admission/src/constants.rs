pub const SNAPSHOT_API_GROUP: &str = "snapshot.kubevirt.io";
pub const SNAPSHOT_RESOURCE: &str = "virtualmachinesnapshots";

pub const VIRTUAL_MACHINE_GROUP: &str = "kubevirt.io";
pub const VIRTUAL_MACHINE_VERSION: &str = "v1";
pub const VIRTUAL_MACHINE_API_VERSION: &str = "kubevirt.io/v1";
pub const VIRTUAL_MACHINE_KIND: &str = "VirtualMachine";
pub const VIRTUAL_MACHINE_PLURAL: &str = "virtualmachines";

pub const ADMISSION_REVIEW_API_VERSION: &str = "admission.k8s.io/v1";
pub const ADMISSION_REVIEW_KIND: &str = "AdmissionReview";
