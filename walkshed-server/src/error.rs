use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::page;

#[derive(Debug)]
pub enum AppError {
    /// Unknown garage or out-of-range minutes
    BadRequest(String),
    /// Geocoding, data loading or isochrone failure
    Pipeline(walkshed_core::Error),
    /// The blocking worker panicked or was cancelled
    Worker(String),
}

impl From<walkshed_core::Error> for AppError {
    fn from(e: walkshed_core::Error) -> Self {
        AppError::Pipeline(e)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Worker(e.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Pipeline(_) | AppError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Pipeline(e) => format!("The amenity map could not be built: {e}"),
            AppError::Worker(msg) => format!("The amenity map could not be built: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {self:?}");
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            page::failure_page(&self.message()),
        )
            .into_response()
    }
}
