use serde::{Deserialize, Serialize};

/// On-disk `videos/<id>/data.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoData {
    pub thread: u64,
    /// File name relative to the video directory
    pub file: String,
}
