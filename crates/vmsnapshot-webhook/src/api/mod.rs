pub mod admission_review;
pub(crate) mod api_error;
pub(crate) mod handlers;
pub(crate) mod state;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use vmsnapshot_admission::virtual_machine::VirtualMachineLookup;

use crate::api::{
    handlers::{readiness_handler, validate_handler},
    state::ApiServerState,
};

pub const VALIDATE_PATH: &str = "/virtualmachinesnapshots-validate";
pub const READINESS_PATH: &str = "/readiness";

pub(crate) fn router<L>(state: Arc<ApiServerState<L>>) -> Router
where
    L: VirtualMachineLookup + 'static,
{
    Router::new()
        .route(VALIDATE_PATH, post(validate_handler::<L>))
        .route(READINESS_PATH, get(readiness_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
