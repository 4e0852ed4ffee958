use async_trait::async_trait;
use nicogamma_types::{ThreadEvent, VideoId, VideoInfo};

use crate::error::Result;

/// Read-only access to recorded thread logs.
///
/// Implementations must treat lookup as a single load-or-fail operation:
/// a missing thread surfaces as `PersistError::ThreadNotFound` from `load_thread`
/// rather than through a separate existence check.
#[async_trait]
pub trait ThreadRecordStore: Send + Sync {
    /// Load every event of a thread, in record order
    async fn load_thread(&self, thread_id: u64) -> Result<Vec<ThreadEvent>>;
}

/// Read-only access to video metadata
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// All known videos, sorted by id
    async fn list_videos(&self) -> Result<Vec<VideoId>>;

    /// Metadata for one video
    async fn get_video(&self, id: &VideoId) -> Result<VideoInfo>;
}
