use std::sync::LazyLock;

use nicogamma_types::{ResFrom, ThreadRequest, SUPPORTED_VERSION};
use regex::Regex;

use crate::error::{ProtocolError, Result};

static THREAD_REQUEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#"<thread res_from="(-?[0-9]{{1,10}})" version="{}" thread="([0-9]{{1,12}})" />"#,
        regex::escape(SUPPORTED_VERSION)
    );
    Regex::new(&pattern).expect("thread request pattern is valid")
});

/// Extract the first `<thread>` request from a raw body.
///
/// The body is decoded one byte per character, so non-ASCII bytes can never
/// form part of a match. Fails without touching any store.
pub fn parse_request(raw: &[u8]) -> Result<ThreadRequest> {
    let body: String = raw.iter().map(|&b| b as char).collect();

    let Some(caps) = THREAD_REQUEST_RE.captures(&body) else {
        tracing::warn!(body = %body, "Unknown thread request");
        return Err(ProtocolError::Parse);
    };

    let res_from = ResFrom::new(&caps[1]).map_err(|_| ProtocolError::Parse)?;
    // at most 12 digits, always fits
    let thread_id: u64 = caps[2].parse().map_err(|_| ProtocolError::Parse)?;

    Ok(ThreadRequest::new(res_from, thread_id))
}
