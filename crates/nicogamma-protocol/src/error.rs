use nicogamma_persist::PersistError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Body did not contain a supported `<thread>` request
    #[error("Malformed thread request")]
    Parse,

    #[error("Thread record not found: {0}")]
    RecordNotFound(u64),

    #[error("Thread store error: {0}")]
    Store(PersistError),
}

impl From<PersistError> for ProtocolError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::ThreadNotFound(id) => Self::RecordNotFound(id),
            other => Self::Store(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
