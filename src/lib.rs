//! # Order API
//!
//! An HTTP service tracking purchase orders through a small status lifecycle,
//! persisted in PostgreSQL.
//!
//! ## Features
//!
//! - **State machine**: `NEW → RESERVED → CONFIRMED`, with `FAILED` reachable
//!   from any non-terminal status; the transition table is plain data
//! - **Optimistic concurrency**: every accepted transition bumps `version`,
//!   and writes are rejected when the caller's version is stale
//! - **Storage-agnostic handlers**: the HTTP layer only sees the
//!   [`OrderRepository`](core::OrderRepository) trait
//! - **Safe errors**: responses carry `{ "error": <message> }` with fixed
//!   messages; storage details stay in the logs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_api::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_repository(InMemoryOrderRepository::new())
//!     .build()?;
//!
//! let mut order = Order::new();
//! order.transition_to(OrderStatus::Reserved, Utc::now())?;
//! assert_eq!(order.version, 1);
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        ApiError, FailReason, Order, OrderError, OrderRepository, OrderStatus, RepositoryError,
        StatusChange,
    };

    // === Storage ===
    pub use crate::storage::InMemoryOrderRepository;
    #[cfg(feature = "postgres")]
    pub use crate::storage::{MIGRATOR, PostgresOrderRepository};

    // === Config & Server ===
    pub use crate::config::ServerConfig;
    pub use crate::server::{AppState, ServerBuilder, build_order_routes};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
