//! Error types for mvcm-catalog
//!
//! Every catalog failure maps to a well-defined HTTP response. Only a
//! concurrency conflict on a record that still exists, and storage
//! failures, surface as 500s.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::forms::{FieldErrors, MovieForm};
use crate::views;

/// A form that failed validation, returned unchanged for re-display
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub form: MovieForm,
    pub errors: FieldErrors,
}

/// Catalog error type
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing, unparseable, unknown or mismatched movie id (404)
    #[error("Movie not found")]
    NotFound,

    /// Form fields failed validation (422)
    #[error("Validation failed")]
    Validation(Box<Rejected>),

    /// Update affected no row although the movie still exists (500)
    #[error("Concurrency conflict updating movie {id}")]
    ConcurrencyConflict { id: i64 },

    /// Movie storage is not initialized (500)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// mvcm-common error
    #[error(transparent)]
    Common(#[from] mvcm_common::Error),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound => StatusCode::NOT_FOUND,
            CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogError::ConcurrencyConflict { .. }
            | CatalogError::Configuration(_)
            | CatalogError::Database(_)
            | CatalogError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let page = views::error_page(status, &self.to_string());
        (status, Html(page)).into_response()
    }
}

/// Result type for catalog operations and handlers
pub type CatalogResult<T> = Result<T, CatalogError>;
