use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nicogamma_persist::PersistError;
use nicogamma_protocol::ProtocolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Thread not found: {0}")]
    ThreadNotFound(u64),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Storage error: {0}")]
    Storage(PersistError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ThreadNotFound(_) | Self::VideoNotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PersistError> for ApiError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::ThreadNotFound(id) => Self::ThreadNotFound(id),
            PersistError::VideoNotFound(id) => Self::VideoNotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<ProtocolError> for ApiError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Parse => Self::BadRequest("Malformed thread request".to_string()),
            ProtocolError::RecordNotFound(id) => Self::ThreadNotFound(id),
            ProtocolError::Store(e) => e.into(),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
