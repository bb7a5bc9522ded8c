//! Storage boundary for orders

use crate::core::error::{OrderError, RepositoryError};
use crate::core::order::{FailReason, Order, OrderStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A requested status change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub fail_reason: Option<FailReason>,
}

impl StatusChange {
    pub fn to(status: OrderStatus) -> Self {
        Self {
            status,
            fail_reason: None,
        }
    }

    /// A change to `FAILED` carrying a reason
    pub fn failed(reason: FailReason) -> Self {
        Self {
            status: OrderStatus::Failed,
            fail_reason: Some(reason),
        }
    }

    /// Apply the change to an in-memory order
    pub fn apply(self, order: &mut Order, now: DateTime<Utc>) -> Result<(), OrderError> {
        match (self.status, self.fail_reason) {
            (OrderStatus::Failed, reason) => order.fail(reason, now),
            (status, None) => order.transition_to(status, now),
            (status, Some(_)) => Err(OrderError::UnexpectedFailReason(status)),
        }
    }
}

/// Repository trait for order persistence
///
/// Handlers only ever see this trait, so any backend (PostgreSQL, in-memory,
/// a failing test double) can sit behind the HTTP layer.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// List every stored order.
    ///
    /// Ordering is backend-defined; see the implementation's docs.
    async fn list(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Persist a freshly constructed order.
    ///
    /// The returned order carries the storage-assigned id and timestamps.
    async fn create(&self, order: Order) -> Result<Order, RepositoryError>;

    /// Fetch one order, or `RepositoryError::NotFound`
    async fn get_by_id(&self, id: &Uuid) -> Result<Order, RepositoryError>;

    /// Store a transitioned order if the stored version still equals
    /// `expected_version` (compare-and-swap).
    ///
    /// Writes status, version, fail reason and `updated_at`. Returns
    /// `NotFound` for an unknown id and `Conflict` when the version moved.
    async fn save_transition(
        &self,
        order: &Order,
        expected_version: i64,
    ) -> Result<Order, RepositoryError>;

    /// Load an order, apply `change` through the state machine and persist it
    /// with optimistic concurrency on `expected_version`.
    ///
    /// A no-op change returns the stored order without writing.
    async fn update_status(
        &self,
        id: &Uuid,
        expected_version: i64,
        change: StatusChange,
        now: DateTime<Utc>,
    ) -> Result<Order, RepositoryError> {
        let mut order = self.get_by_id(id).await?;

        if order.version != expected_version {
            return Err(RepositoryError::Conflict {
                id: *id,
                expected: expected_version,
                actual: order.version,
            });
        }

        change.apply(&mut order, now)?;

        if order.version == expected_version {
            return Ok(order);
        }

        self.save_transition(&order, expected_version).await
    }
}
