use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{error::ApiResult, state::AppState};

pub const NO_CACHE: &str = "no-store, no-cache";

/// Legacy comment server endpoint.
///
/// Takes a `<thread res_from=".." version="20061206" thread=".." />` body and
/// answers with the replayed `<packet>`. Malformed bodies are rejected with
/// 400 before any thread is loaded; unknown threads are 404.
pub async fn post_comment(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let packet = state.engine.handle(&body, state.escape_mode).await?;
    tracing::debug!(bytes = packet.len(), packet = %packet, "Sending packet");

    Ok((
        [
            (header::CONTENT_TYPE, "text/xml; charset=utf-8"),
            (header::CACHE_CONTROL, NO_CACHE),
        ],
        packet,
    ))
}
