//! Core module containing the order model, its errors and the storage contract

pub mod error;
pub mod order;
pub mod repository;

pub use error::{ApiError, OrderError, RepositoryError};
pub use order::{FailReason, INITIAL_VERSION, Order, OrderStatus};
pub use repository::{OrderRepository, StatusChange};
