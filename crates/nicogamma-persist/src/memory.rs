use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use nicogamma_types::ThreadEvent;

use crate::error::{PersistError, Result};
use crate::trait_client::ThreadRecordStore;

/// In-memory thread store, mainly for tests and fixtures.
///
/// Counts lookups so callers can assert that rejected requests never reach
/// the store.
#[derive(Debug, Default)]
pub struct InMemoryThreadStore {
    threads: HashMap<u64, Vec<ThreadEvent>>,
    loads: AtomicUsize,
}

impl InMemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thread(mut self, thread_id: u64, events: Vec<ThreadEvent>) -> Self {
        self.threads.insert(thread_id, events);
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ThreadRecordStore for InMemoryThreadStore {
    async fn load_thread(&self, thread_id: u64) -> Result<Vec<ThreadEvent>> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        self.threads
            .get(&thread_id)
            .cloned()
            .ok_or(PersistError::ThreadNotFound(thread_id))
    }
}
