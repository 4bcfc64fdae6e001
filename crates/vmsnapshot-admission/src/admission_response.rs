use serde::{Deserialize, Serialize};

use crate::{admitter::Decision, errors::AdmissionError, field_path::FieldPath};

/// This models the admission/v1/AdmissionResponse object of Kubernetes
/// See https://pkg.go.dev/k8s.io/kubernetes/pkg/apis/admission#AdmissionResponse
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionResponse {
    /// UID is an identifier for the individual request/response.
    /// This must be copied over from the corresponding AdmissionRequest.
    pub uid: String,

    /// Allowed indicates whether or not the admission request was permitted.
    pub allowed: bool,

    /// Status contains extra details into why an admission request was denied.
    /// This field IS NOT consulted in any way if "Allowed" is "true".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AdmissionResponseStatus>,
}

/// Values that Status.Status of an AdmissionResponse can have
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum AdmissionResponseStatusValue {
    Success,
    Failure,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
pub struct AdmissionResponseStatus {
    /// Status of the operation.
    /// One of: "Success" or "Failure".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AdmissionResponseStatusValue>,

    /// A human-readable description of the status of this operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// A machine-readable description of why this operation is in the
    /// "Failure" status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<StatusReason>,

    /// Extended data associated with the reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,

    /// Suggested HTTP return code for this status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl AdmissionResponse {
    pub fn allow(uid: String) -> AdmissionResponse {
        AdmissionResponse {
            uid,
            allowed: true,
            status: None,
        }
    }

    /// Reject the request because the submitted object is not valid. All the
    /// causes are reported back, the top level message is built from them.
    pub fn deny(uid: String, causes: Vec<StatusCause>) -> AdmissionResponse {
        let message = causes
            .iter()
            .filter_map(|cause| cause.message.as_deref())
            .collect::<Vec<_>>()
            .join(", ");

        AdmissionResponse {
            uid,
            allowed: false,
            status: Some(AdmissionResponseStatus {
                status: Some(AdmissionResponseStatusValue::Failure),
                message: Some(message),
                reason: Some(StatusReason::Invalid),
                details: Some(StatusDetails { causes }),
                code: Some(422),
            }),
        }
    }

    /// Reject the request because no decision could be taken.
    pub fn reject(uid: String, message: String, reason: StatusReason, code: u16) -> AdmissionResponse {
        AdmissionResponse {
            uid,
            allowed: false,
            status: Some(AdmissionResponseStatus {
                status: Some(AdmissionResponseStatusValue::Failure),
                message: Some(message),
                reason: Some(reason),
                details: None,
                code: Some(code),
            }),
        }
    }

    pub fn from_decision(uid: String, decision: Decision) -> AdmissionResponse {
        match decision {
            Decision::Allow => AdmissionResponse::allow(uid),
            Decision::Deny(causes) => AdmissionResponse::deny(uid, causes),
        }
    }

    pub fn from_admission_error(uid: String, error: &AdmissionError) -> AdmissionResponse {
        if error.is_bad_request() {
            AdmissionResponse::reject(uid, error.to_string(), StatusReason::BadRequest, 400)
        } else {
            AdmissionResponse::reject(
                uid,
                format!("internal server error: {error}"),
                StatusReason::InternalError,
                500,
            )
        }
    }

    /// The causes carried by a denial, empty for any other kind of response.
    pub fn causes(&self) -> &[StatusCause] {
        self.status
            .as_ref()
            .and_then(|status| status.details.as_ref())
            .map(|details| details.causes.as_slice())
            .unwrap_or_default()
    }
}

/// StatusReason is an enumeration of possible failure causes.
/// Each StatusReason must map to a single HTTP status code.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum StatusReason {
    /// StatusReasonInvalid means the requested create or update operation cannot be completed
    /// due to invalid data provided as part of the request.
    /// Status code 422.
    Invalid,

    /// StatusReasonBadRequest means that the request itself was invalid.
    /// Status code 400.
    BadRequest,

    /// StatusReasonInternalError indicates that an internal error occurred.
    /// Status code 500.
    InternalError,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
pub struct StatusDetails {
    /// The Causes array includes more details associated with the StatusReason
    /// failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<StatusCause>,
}

/// StatusCause provides more information about an api.Status failure, including cases when multiple errors are encountered.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
pub struct StatusCause {
    // A machine-readable description of the cause of the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<CauseType>,

    // A human-readable description of the cause of the error.  This field may be
    // presented as-is to a reader.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    // The field of the resource that has caused this error, as named by its JSON
    // serialization. May include dot and postfix notation for nested attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl StatusCause {
    pub fn new(reason: CauseType, message: impl Into<String>, field: &FieldPath) -> Self {
        StatusCause {
            reason: Some(reason),
            message: Some(message.into()),
            field: Some(field.to_string()),
        }
    }

    pub fn invalid(message: impl Into<String>, field: &FieldPath) -> Self {
        StatusCause::new(CauseType::FieldValueInvalid, message, field)
    }

    pub fn not_found(message: impl Into<String>, field: &FieldPath) -> Self {
        StatusCause::new(CauseType::FieldValueNotFound, message, field)
    }
}

/// CauseType is a machine readable value providing more detail about what occurred in a
/// status response.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub enum CauseType {
    /// CauseTypeFieldValueNotFound is used to report failure to find a requested value
    /// (e.g., looking up an ID).
    FieldValueNotFound,

    /// CauseTypeFieldValueInvalid is used to report malformed values (e.g., failed regex
    /// match).
    FieldValueInvalid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        admission_request::{GroupVersionResource, Operation},
        errors::LookupError,
    };
    use serde_json::json;

    #[test]
    fn allow_response_has_no_status() {
        let response = AdmissionResponse::allow("UID".to_owned());

        assert!(response.allowed);
        assert!(response.status.is_none());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"uid": "UID", "allowed": true})
        );
    }

    #[test]
    fn deny_response_carries_all_causes() {
        let field = FieldPath::new("spec");
        let causes = vec![
            StatusCause::invalid("first problem", &field),
            StatusCause::not_found("second problem", &field.child("source")),
        ];

        let response = AdmissionResponse::deny("UID".to_owned(), causes.clone());
        assert_eq!(response.uid, "UID");
        assert!(!response.allowed);
        assert_eq!(response.causes(), causes.as_slice());

        let status = response.status.unwrap();
        assert_eq!(status.code, Some(422));
        assert_eq!(status.reason, Some(StatusReason::Invalid));
        assert_eq!(status.status, Some(AdmissionResponseStatusValue::Failure));
        assert_eq!(
            status.message.as_deref(),
            Some("first problem, second problem")
        );
    }

    #[test]
    fn deny_response_wire_format() {
        let response = AdmissionResponse::deny(
            "UID".to_owned(),
            vec![StatusCause::invalid(
                "spec in immutable after creation",
                &FieldPath::new("spec"),
            )],
        );

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "uid": "UID",
                "allowed": false,
                "status": {
                    "status": "Failure",
                    "message": "spec in immutable after creation",
                    "reason": "Invalid",
                    "details": {
                        "causes": [{
                            "reason": "FieldValueInvalid",
                            "message": "spec in immutable after creation",
                            "field": "spec"
                        }]
                    },
                    "code": 422
                }
            })
        );
    }

    #[test]
    fn request_errors_are_bad_requests() {
        let error = AdmissionError::UnexpectedOperation(Operation::Delete);
        let response = AdmissionResponse::from_admission_error("UID".to_owned(), &error);

        assert!(!response.allowed);
        assert!(response.causes().is_empty());
        let status = response.status.unwrap();
        assert_eq!(status.code, Some(400));
        assert_eq!(status.reason, Some(StatusReason::BadRequest));
        assert_eq!(status.message.as_deref(), Some("unexpected operation DELETE"));
    }

    #[test]
    fn lookup_errors_are_internal_errors() {
        let error = AdmissionError::Lookup {
            namespace: "default".to_owned(),
            name: "vm1".to_owned(),
            source: LookupError::Other(anyhow::anyhow!("connection refused")),
        };
        let response = AdmissionResponse::from_admission_error("UID".to_owned(), &error);

        assert!(!response.allowed);
        let status = response.status.unwrap();
        assert_eq!(status.code, Some(500));
        assert_eq!(status.reason, Some(StatusReason::InternalError));
        assert!(status.details.is_none());
        assert!(status.message.unwrap().contains("connection refused"));
    }

    #[test]
    fn unexpected_resource_message() {
        let error = AdmissionError::UnexpectedResource(GroupVersionResource {
            group: "kubevirt.io".to_owned(),
            version: "v1".to_owned(),
            resource: "virtualmachines".to_owned(),
        });
        let response = AdmissionResponse::from_admission_error("UID".to_owned(), &error);

        assert_eq!(
            response.status.unwrap().message.as_deref(),
            Some("unexpected resource kubevirt.io/v1/virtualmachines")
        );
    }
}
