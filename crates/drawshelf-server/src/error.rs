//! Mapping of failures to HTTP responses.

use crate::storage::StorageError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use drawshelf_core::codec::CodecError;
use drawshelf_core::wire::ErrorBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    InvalidKey(#[from] CodecError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Storage(StorageError::NotFound(_))
            | ServerError::Storage(StorageError::UnknownRepository(_)) => StatusCode::NOT_FOUND,
            ServerError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            ServerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}: {}", status, self);
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
