pub mod builder;
pub mod client;
pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod trait_client;

pub use builder::PersistClientBuilder;
pub use client::PersistClient;
pub use error::{PersistError, Result};
pub use memory::InMemoryThreadStore;
pub use repositories::{ThreadRepository, VideoRepository};
pub use trait_client::{ThreadRecordStore, VideoStore};
