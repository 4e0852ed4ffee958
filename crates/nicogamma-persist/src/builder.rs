use std::path::PathBuf;

use crate::client::PersistClient;
use crate::error::{PersistError, Result};

pub struct PersistClientBuilder {
    data_dir: Option<PathBuf>,
    require_existing: bool,
}

impl PersistClientBuilder {
    pub fn new() -> Self {
        Self {
            data_dir: None,
            require_existing: true,
        }
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Skip the startup check that the data directory exists
    pub fn allow_missing(mut self) -> Self {
        self.require_existing = false;
        self
    }

    pub fn build(self) -> Result<PersistClient> {
        let data_dir = self
            .data_dir
            .ok_or_else(|| PersistError::Internal("data_dir is required".to_string()))?;

        if self.require_existing && !data_dir.is_dir() {
            return Err(PersistError::Internal(format!(
                "data directory does not exist: {}",
                data_dir.display()
            )));
        }

        Ok(PersistClient::new(data_dir))
    }
}

impl Default for PersistClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
