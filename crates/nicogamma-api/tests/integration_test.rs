use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use nicogamma_api::{
    build_router,
    config::{Config, LoggingConfig, ProtocolConfig, ServerConfig, StorageConfig},
    error::ApiError,
    state::AppState,
};
use nicogamma_persist::PersistClient;
use nicogamma_protocol::FixedClock;
use tempfile::TempDir;
use tower::ServiceExt;

const SERVER_TIME: i64 = 1190000000;

fn write(root: &Path, relative: &str, contents: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "threads/12345.json",
        br#"[{"thread": {"last_res": "3"}}, {"chat": {"no": "1", "content": "hi"}}]"#,
    );
    write(dir.path(), "threads/2.json", br#"[{"chat": {"mail": "a&b&c", "content": "<b>&&</b>"}}]"#);
    write(dir.path(), "videos/sm9/data.json", br#"{"thread": 12345, "file": "sm9.flv"}"#);
    write(dir.path(), "videos/sm9/sm9.flv", b"FLV\x01\x05\x00\x00\x00\x09");
    write(dir.path(), "flvplayer.swf", b"FWS");
    dir
}

fn config(data_dir: &Path, legacy: bool) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout_secs: 5,
        },
        storage: StorageConfig {
            data_dir: data_dir.to_path_buf(),
        },
        protocol: ProtocolConfig {
            legacy_ampersand_escape: legacy,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
    }
}

fn app_with(dir: &TempDir, legacy: bool) -> Router {
    let persist = PersistClient::new(dir.path());
    let state = AppState::with_clock(config(dir.path(), legacy), persist, Arc::new(FixedClock(SERVER_TIME)));
    build_router(Arc::new(state))
}

fn app(dir: &TempDir) -> Router {
    app_with(dir, false)
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_comment(app: Router, body: &str) -> Response {
    app.oneshot(
        Request::post("/api/comment")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_comment_fetch_replays_record() {
    let dir = fixture();
    let response = post_comment(app(&dir), r#"<thread res_from="-1000" version="20061206" thread="12345" />"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store, no-cache");
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/xml; charset=utf-8");
    assert_eq!(
        body_string(response).await,
        r#"<packet><thread resultcode="0" thread="12345" server_time="1190000000" last_res="3" ticket="0x00000000" revision="1" /><chat no="1">hi</chat></packet>"#
    );
}

#[tokio::test]
async fn test_comment_refresh_echoes_cursor() {
    let dir = fixture();
    let response = post_comment(app(&dir), r#"<thread res_from="5" version="20061206" thread="12345" />"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        r#"<packet><thread resultcode="0" thread="12345" server_time="1190000000" last_res="5" ticket="0x00000000" revision="1" /></packet>"#
    );
}

#[tokio::test]
async fn test_comment_malformed_request_is_bad_request() {
    let dir = fixture();
    let response = post_comment(app(&dir), r#"<thread res_from="-1" version="99999999" thread="12345" />"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comment_unknown_thread_is_not_found() {
    let dir = fixture();
    let response = post_comment(app(&dir), r#"<thread res_from="-1" version="20061206" thread="404" />"#).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_escaping_modes() {
    let dir = fixture();
    let request = r#"<thread res_from="-1" version="20061206" thread="2" />"#;

    let standard = body_string(post_comment(app(&dir), request).await).await;
    assert_eq!(
        standard,
        r#"<packet><chat mail="a&amp;b&amp;c">&lt;b&gt;&amp;&amp;&lt;/b&gt;</chat></packet>"#
    );

    let legacy = body_string(post_comment(app_with(&dir, true), request).await).await;
    assert_eq!(legacy, r#"<packet><chat mail="a&amp;b&c">&lt;b&gt;&amp;&&lt;/b&gt;</chat></packet>"#);
}

#[tokio::test]
async fn test_health() {
    let dir = fixture();
    let response = get(app(&dir), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("ok"));
}

#[tokio::test]
async fn test_index_lists_videos() {
    let dir = fixture();
    let response = get(app(&dir), "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response)
        .await
        .contains(r#"<li><a href="/watch?v=sm9">sm9</a></li>"#));
}

#[tokio::test]
async fn test_watch_page() {
    let dir = fixture();

    let ok = get(app(&dir), "/watch?v=sm9").await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert!(body_string(ok).await.contains(r#"flashvars="v=sm9&amp;videoId=sm9""#));

    let invalid = get(app(&dir), "/watch?v=../x").await;
    assert_eq!(invalid.status(), StatusCode::NOT_FOUND);
    assert!(body_string(invalid).await.contains("invalid video id..."));

    let missing = get(app(&dir), "/watch?v=nope").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert!(body_string(missing).await.contains("video not found..."));
}

#[tokio::test]
async fn test_getflv() {
    let dir = fixture();

    let response = get(app(&dir), "/getflv?v=sm9").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store, no-cache");
    assert_eq!(
        body_string(response).await,
        "url=smile%3Fv%3Dsm9&l=9&ms=api%2Fcomment&thread_id=12345"
    );

    let invalid = get(app(&dir), "/getflv?v=NOPE").await;
    assert_eq!(body_string(invalid).await, "error=invalid%20id");
}

#[tokio::test]
async fn test_smile_streams_media() {
    let dir = fixture();

    let response = get(app(&dir), "/smile?v=sm9").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await.len(), 9);

    let ranged = app(&dir)
        .oneshot(
            Request::get("/smile?v=sm9")
                .header(header::RANGE, "bytes=0-2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(ranged.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(body_string(ranged).await, "FLV");

    assert_eq!(get(app(&dir), "/smile?v=%2E%2E").await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(get(app(&dir), "/smile?v=nope").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_player_binary() {
    let dir = fixture();
    let response = get(app(&dir), "/flvplayer.swf").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "FWS");
}

#[tokio::test]
async fn test_api_error_response() {
    let response = ApiError::BadRequest("Test error".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ApiError::ThreadNotFound(1).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
