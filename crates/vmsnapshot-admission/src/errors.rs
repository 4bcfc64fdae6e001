use thiserror::Error;

use crate::admission_request::{GroupVersionResource, Operation};

pub type Result<T> = std::result::Result<T, AdmissionError>;

/// Faults that prevent an admission decision from being taken.
///
/// These are never turned into a denial: the webhook answers with an error
/// status instead, so that a broken request or a broken cluster connection
/// can be told apart from an invalid snapshot.
#[derive(Error, Debug)]
pub enum AdmissionError {
    #[error("unexpected resource {0}")]
    UnexpectedResource(GroupVersionResource),

    #[error("{0} is not set inside of the admission request")]
    MissingObject(&'static str),

    #[error("cannot decode {field}: {source}")]
    Deserialize {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected operation {0}")]
    UnexpectedOperation(Operation),

    #[error("cannot retrieve VirtualMachine {namespace}/{name}: {source}")]
    Lookup {
        namespace: String,
        name: String,
        #[source]
        source: LookupError,
    },
}

impl AdmissionError {
    /// Whether the fault lies with the request that was sent to the webhook,
    /// as opposed to the webhook not being able to do its job.
    pub fn is_bad_request(&self) -> bool {
        !matches!(self, AdmissionError::Lookup { .. })
    }
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("VirtualMachine {namespace}/{name} not found")]
    NotFound { namespace: String, name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
