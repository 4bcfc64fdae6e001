use vmsnapshot_admission::{
    admission_request::AdmissionRequest,
    admission_response::AdmissionResponse,
    constants::{ADMISSION_REVIEW_API_VERSION, ADMISSION_REVIEW_KIND},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    pub request: AdmissionRequest,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReviewResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    pub response: AdmissionResponse,
}

impl AdmissionReviewResponse {
    /// Wrap the response using the same apiVersion of the review that was
    /// received, so that both `admission.k8s.io/v1` and `v1beta1` clients
    /// are served.
    pub fn new(api_version: Option<String>, response: AdmissionResponse) -> Self {
        AdmissionReviewResponse {
            api_version: Some(
                api_version.unwrap_or_else(|| String::from(ADMISSION_REVIEW_API_VERSION)),
            ),
            kind: Some(String::from(ADMISSION_REVIEW_KIND)),
            response,
        }
    }
}
