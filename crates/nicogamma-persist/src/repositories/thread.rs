use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use nicogamma_types::ThreadEvent;

use crate::error::{PersistError, Result};
use crate::models::parse_thread_record;
use crate::trait_client::ThreadRecordStore;

/// Thread logs stored as `<root>/<thread_id>.json`
#[derive(Debug, Clone)]
pub struct ThreadRepository {
    root: PathBuf,
}

impl ThreadRepository {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root: data_dir.as_ref().join("threads"),
        }
    }

    pub fn record_path(&self, thread_id: u64) -> PathBuf {
        self.root.join(format!("{}.json", thread_id))
    }
}

#[async_trait]
impl ThreadRecordStore for ThreadRepository {
    async fn load_thread(&self, thread_id: u64) -> Result<Vec<ThreadEvent>> {
        let path = self.record_path(thread_id);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PersistError::ThreadNotFound(thread_id));
            }
            Err(e) => return Err(e.into()),
        };

        let events = parse_thread_record(thread_id, &raw)?;
        tracing::debug!(thread_id, events = events.len(), "Loaded thread record");
        Ok(events)
    }
}
