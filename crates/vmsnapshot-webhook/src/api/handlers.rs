use axum::{
    Json,
    extract::{self, FromRequest},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{Span, debug, error, warn};
use vmsnapshot_admission::{
    admission_request::AdmissionRequest, admission_response::AdmissionResponse,
    virtual_machine::VirtualMachineLookup,
};

use crate::api::{
    admission_review::{AdmissionReviewRequest, AdmissionReviewResponse},
    api_error::ApiError,
    state::ApiServerState,
};

// create an extractor that internally uses `axum::Json` but has a custom rejection
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub(crate) struct JsonExtractor<T>(T);

#[tracing::instrument(
    name = "validation",
    fields(
        request_uid=tracing::field::Empty,
        host=crate::config::HOSTNAME.as_str(),
        name=tracing::field::Empty,
        namespace=tracing::field::Empty,
        operation=tracing::field::Empty,
        kind=tracing::field::Empty,
        resource_group=tracing::field::Empty,
        resource_version=tracing::field::Empty,
        resource=tracing::field::Empty,
        allowed=tracing::field::Empty,
        response_code=tracing::field::Empty,
        response_message=tracing::field::Empty,
    ),
    skip_all)]
/// Validate a VirtualMachineSnapshot AdmissionReview.
pub(crate) async fn validate_handler<L: VirtualMachineLookup>(
    extract::State(state): extract::State<Arc<ApiServerState<L>>>,
    JsonExtractor(admission_review): JsonExtractor<AdmissionReviewRequest>,
) -> Json<AdmissionReviewResponse> {
    debug!(admission_review = ?admission_review, "admission review received");

    let AdmissionReviewRequest {
        api_version,
        request,
        ..
    } = admission_review;
    populate_span_with_admission_request_data(&request);

    let response = match state.admitter.admit(&request).await {
        Ok(decision) => AdmissionResponse::from_decision(request.uid.clone(), decision),
        Err(err) => {
            if err.is_bad_request() {
                warn!(error = err.to_string().as_str(), "cannot validate admission request");
            } else {
                error!(error = err.to_string().as_str(), "cannot validate admission request");
            }
            AdmissionResponse::from_admission_error(request.uid.clone(), &err)
        }
    };

    populate_span_with_admission_response_data(&response);
    debug!(response = ?response, "admission request evaluated");

    Json(AdmissionReviewResponse::new(api_version, response))
}

pub(crate) async fn readiness_handler() -> StatusCode {
    StatusCode::OK
}

fn populate_span_with_admission_request_data(adm_req: &AdmissionRequest) {
    Span::current().record("kind", adm_req.kind.kind.as_str());
    Span::current().record("name", adm_req.name.clone().unwrap_or_default().as_str());
    Span::current().record(
        "namespace",
        adm_req.namespace.clone().unwrap_or_default().as_str(),
    );
    Span::current().record("operation", adm_req.operation.to_string().as_str());
    Span::current().record("request_uid", adm_req.uid.as_str());
    Span::current().record("resource", adm_req.resource.resource.as_str());
    Span::current().record("resource_group", adm_req.resource.group.as_str());
    Span::current().record("resource_version", adm_req.resource.version.as_str());
}

fn populate_span_with_admission_response_data(response: &AdmissionResponse) {
    Span::current().record("allowed", response.allowed);
    if let Some(status) = &response.status {
        if let Some(code) = &status.code {
            Span::current().record("response_code", code);
        }
        if let Some(message) = &status.message {
            Span::current().record("response_message", message.as_str());
        }
    }
}
