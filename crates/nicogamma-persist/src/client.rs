use std::path::{Path, PathBuf};

use crate::builder::PersistClientBuilder;
use crate::repositories::{ThreadRepository, VideoRepository};

/// Entry point to the on-disk data directory
#[derive(Debug, Clone)]
pub struct PersistClient {
    data_dir: PathBuf,
    thread_repo: ThreadRepository,
    video_repo: VideoRepository,
}

impl PersistClient {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let thread_repo = ThreadRepository::new(&data_dir);
        let video_repo = VideoRepository::new(&data_dir);

        Self {
            data_dir,
            thread_repo,
            video_repo,
        }
    }

    pub fn builder() -> PersistClientBuilder {
        PersistClientBuilder::new()
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn threads(&self) -> &ThreadRepository {
        &self.thread_repo
    }

    pub fn videos(&self) -> &VideoRepository {
        &self.video_repo
    }
}
