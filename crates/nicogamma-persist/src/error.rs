use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(u64),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Invalid thread record {thread_id}: {reason}")]
    InvalidRecord { thread_id: u64, reason: String },

    #[error("Invalid video data for {video_id}: {reason}")]
    InvalidVideoData { video_id: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PersistError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ThreadNotFound(_) | Self::VideoNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, PersistError>;
