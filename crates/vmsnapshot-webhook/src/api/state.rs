use vmsnapshot_admission::VirtualMachineSnapshotAdmitter;

pub(crate) struct ApiServerState<L> {
    pub(crate) admitter: VirtualMachineSnapshotAdmitter<L>,
}
