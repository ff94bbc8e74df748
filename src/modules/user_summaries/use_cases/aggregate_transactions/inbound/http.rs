use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use tracing::{Instrument, info_span, warn};
use uuid::Uuid;

use crate::modules::user_summaries::use_cases::aggregate_transactions::outcome::InvocationResponse;
use crate::shared::infrastructure::change_stream::StreamEvent;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<StreamEvent>, JsonRejection>,
) -> impl IntoResponse {
    let Json(event) = match body {
        Ok(b) => b,
        Err(rejection) => {
            warn!(%rejection, "Rejected change batch envelope");
            return StatusCode::UNPROCESSABLE_ENTITY.into_response();
        }
    };

    let invocation_id = Uuid::now_v7();
    let result = state
        .aggregator
        .process(&event.records)
        .instrument(info_span!("invocation", %invocation_id))
        .await;

    Json(InvocationResponse::from(&result)).into_response()
}
