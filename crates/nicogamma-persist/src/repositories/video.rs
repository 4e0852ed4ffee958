use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use nicogamma_types::{VideoId, VideoInfo};

use crate::error::{PersistError, Result};
use crate::models::VideoData;
use crate::trait_client::VideoStore;

/// Videos stored as `<root>/<id>/data.json` next to their media file
#[derive(Debug, Clone)]
pub struct VideoRepository {
    root: PathBuf,
}

impl VideoRepository {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root: data_dir.as_ref().join("videos"),
        }
    }

    pub fn video_dir(&self, id: &VideoId) -> PathBuf {
        self.root.join(id.as_str())
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    async fn list_videos(&self) -> Result<Vec<VideoId>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut videos = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Ok(id) = VideoId::new(name) {
                videos.push(id);
            }
        }

        videos.sort();
        Ok(videos)
    }

    async fn get_video(&self, id: &VideoId) -> Result<VideoInfo> {
        let dir = self.video_dir(id);
        let raw = match tokio::fs::read_to_string(dir.join("data.json")).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PersistError::VideoNotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let data: VideoData = serde_json::from_str(&raw).map_err(|e| PersistError::InvalidVideoData {
            video_id: id.to_string(),
            reason: e.to_string(),
        })?;

        // media must live inside the video directory
        let file = Path::new(&data.file);
        if data.file.is_empty() || !file.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(PersistError::InvalidVideoData {
                video_id: id.to_string(),
                reason: format!("file escapes video directory: {}", data.file),
            });
        }

        Ok(VideoInfo {
            id: id.clone(),
            thread: data.thread,
            file: dir.join(file),
        })
    }
}
