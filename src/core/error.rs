//! Typed errors for the order service
//!
//! Three layers, each wrapping the one below:
//!
//! - [`OrderError`]: state-machine and input rule violations, raised by
//!   [`Order`](crate::core::order::Order) without touching storage
//! - [`RepositoryError`]: everything an [`OrderRepository`](crate::core::repository::OrderRepository)
//!   can report, with `NotFound` and `Conflict` kept distinct from storage failures
//! - [`ApiError`]: the HTTP view, carrying a status code and a fixed public message
//!
//! Error bodies always have the shape `{ "error": <message> }`. Internal causes
//! are logged, never serialized.

use crate::core::order::OrderStatus;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

/// Domain rule violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("invalid order status: {0:?}")]
    InvalidStatus(String),

    #[error("invalid order transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("order is in terminal state {0}")]
    TerminalState(OrderStatus),

    #[error("invalid fail reason: {0}")]
    InvalidFailReason(String),

    #[error("fail reason is only accepted when moving to FAILED, not {0}")]
    UnexpectedFailReason(OrderStatus),
}

/// Failures reported by an order repository
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("order {0} not found")]
    NotFound(Uuid),

    #[error("order {id} version conflict: expected {expected}, found {actual}")]
    Conflict { id: Uuid, expected: i64, actual: i64 },

    #[error(transparent)]
    Transition(#[from] OrderError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_))
    }
}

/// Errors returned by HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The path identifier is not a UUID
    #[error("invalid id")]
    InvalidId,

    /// The request body could not be decoded
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("order not found")]
    NotFound,

    #[error("version conflict")]
    Conflict,

    #[error(transparent)]
    Domain(OrderError),

    /// Anything else; `message` is what the caller sees
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl ApiError {
    /// Map a repository failure, using `message` if it turns into a 500
    pub fn from_repository(err: RepositoryError, message: &'static str) -> Self {
        match err {
            RepositoryError::NotFound(_) => ApiError::NotFound,
            RepositoryError::Conflict { .. } => ApiError::Conflict,
            RepositoryError::Transition(e) => ApiError::Domain(e),
            source @ RepositoryError::Storage(_) => ApiError::Internal { message, source },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Domain(e) => match e {
                OrderError::InvalidStatus(_)
                | OrderError::InvalidFailReason(_)
                | OrderError::UnexpectedFailReason(_) => StatusCode::BAD_REQUEST,
                OrderError::InvalidTransition { .. } | OrderError::TerminalState(_) => {
                    StatusCode::CONFLICT
                }
            },
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The text placed in the response body
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::InvalidId => "invalid id",
            ApiError::InvalidBody(_) => "invalid request body",
            ApiError::NotFound => "order not found",
            ApiError::Conflict => "version conflict",
            ApiError::Domain(e) => match e {
                OrderError::InvalidStatus(_) => "invalid status",
                OrderError::InvalidTransition { .. } => "invalid transition",
                OrderError::TerminalState(_) => "order is in terminal state",
                OrderError::InvalidFailReason(_) | OrderError::UnexpectedFailReason(_) => {
                    "invalid fail reason"
                }
            },
            ApiError::Internal { message, .. } => message,
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Internal { message, source } => {
                tracing::error!(error = %source, "{}", message);
            }
            other => {
                tracing::debug!(status = status.as_u16(), error = %other, "request rejected");
            }
        }

        (
            status,
            Json(serde_json::json!({ "error": self.public_message() })),
        )
            .into_response()
    }
}
