use axum::{
    body::Body,
    extract::{Query, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use nicogamma_persist::{PersistError, VideoStore};
use nicogamma_types::VideoId;
use serde::Deserialize;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::{
    error::{ApiError, ApiResult},
    handlers::comment::NO_CACHE,
    state::AppState,
};

/// Path the player is told to post comment requests to
const COMMENT_ENDPOINT: &str = "api/comment";

#[derive(Debug, Deserialize)]
pub struct VideoQuery {
    pub v: Option<String>,
}

impl VideoQuery {
    fn video_id(&self) -> Option<VideoId> {
        self.v.as_deref().and_then(|v| VideoId::new(v).ok())
    }
}

/// HTML index of every video
pub async fn index(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let videos = state.persist.videos().list_videos().await?;

    let mut body = String::from(
        r#"<html><meta charset="UTF-8"><title>nicogamma</title><h1>nicogamma</h1><h2>videos</h2><ul>"#,
    );
    for id in &videos {
        body.push_str(&format!(r#"<li><a href="/watch?v={id}">{id}</a></li>"#));
    }
    body.push_str("</ul>");

    Ok(Html(body))
}

/// Player page for one video
pub async fn watch(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VideoQuery>,
) -> ApiResult<Response> {
    let Some(id) = query.video_id() else {
        return Ok(not_found_page("invalid video id..."));
    };

    match state.persist.videos().get_video(&id).await {
        Ok(_) => {}
        Err(PersistError::VideoNotFound(_)) => return Ok(not_found_page("video not found...")),
        Err(e) => return Err(e.into()),
    }

    let body = format!(
        concat!(
            r#"<meta charset="UTF-8"><title>{id} - nicogamma</title>"#,
            r#"<h1>{id} - nicogamma <a href="/">back</a></h1>"#,
            r##"<embed type="application/x-shockwave-flash" src="flvplayer.swf" quality="high" bgcolor="#888888" "##,
            r#"flashvars="v={id}&amp;videoId={id}" width="960" height="540"/>"#,
        ),
        id = id
    );
    Ok(Html(body).into_response())
}

/// 404 page padded past the size at which old browsers swap in their own
/// "friendly" error page.
fn not_found_page(message: &str) -> Response {
    let body = format!(
        r#"<meta charset="UTF-8">{} <a href="/">back to top</a><!-- {} -->"#,
        message,
        " ".repeat(1024)
    );
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

/// Player bootstrap: where to fetch the media and which comment thread to load
pub async fn get_flv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VideoQuery>,
) -> ApiResult<Response> {
    let pairs: Vec<(&str, String)> = match query.video_id() {
        None => vec![("error", "invalid id".to_string())],
        Some(id) => {
            let info = state.persist.videos().get_video(&id).await?;
            let size = tokio::fs::metadata(&info.file).await?.len();

            vec![
                ("url", format!("smile?v={}", id)),
                ("l", size.to_string()),
                ("ms", COMMENT_ENDPOINT.to_string()),
                ("thread_id", info.thread.to_string()),
            ]
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, NO_CACHE),
        ],
        encode_pairs(&pairs),
    )
        .into_response())
}

/// `key=value&...` with both sides percent-encoded, `%20` for spaces
fn encode_pairs(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Media stream, with byte-range support
pub async fn smile(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VideoQuery>,
    request: Request,
) -> ApiResult<Response> {
    let id = query
        .video_id()
        .ok_or_else(|| ApiError::BadRequest("Invalid video id".to_string()))?;
    let info = state.persist.videos().get_video(&id).await?;

    serve_file(ServeFile::new(&info.file), request).await
}

/// The Flash player binary
pub async fn player(State(state): State<Arc<AppState>>, request: Request) -> ApiResult<Response> {
    let path = state.persist.data_dir().join("flvplayer.swf");
    serve_file(ServeFile::new(path), request).await
}

async fn serve_file(service: ServeFile, request: Request) -> ApiResult<Response> {
    let response = service
        .oneshot(request)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(response.map(Body::new))
}
