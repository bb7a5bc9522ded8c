//! In-memory implementation of OrderRepository for testing and development

use crate::core::error::RepositoryError;
use crate::core::order::Order;
use crate::core::repository::OrderRepository;
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory order repository
///
/// Uses RwLock for thread-safe access. Clones share the same map. `list`
/// returns orders oldest first.
#[derive(Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(all)
    }

    async fn create(&self, mut order: Order) -> Result<Order, RepositoryError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let now = Utc::now();
        order.id = Uuid::new_v4();
        order.created_at = now;
        order.updated_at = now;

        orders.insert(order.id, order.clone());
        tracing::debug!(order_id = %order.id, "order created");

        Ok(order)
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Order, RepositoryError> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        orders
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound(*id))
    }

    async fn save_transition(
        &self,
        order: &Order,
        expected_version: i64,
    ) -> Result<Order, RepositoryError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let stored = orders
            .get_mut(&order.id)
            .ok_or(RepositoryError::NotFound(order.id))?;

        if stored.version != expected_version {
            tracing::warn!(
                order_id = %order.id,
                expected = expected_version,
                actual = stored.version,
                "order version conflict"
            );
            return Err(RepositoryError::Conflict {
                id: order.id,
                expected: expected_version,
                actual: stored.version,
            });
        }

        stored.status = order.status;
        stored.version = order.version;
        stored.fail_reason_code = order.fail_reason_code.clone();
        stored.fail_reason_detail = order.fail_reason_detail.clone();
        stored.updated_at = order.updated_at;

        tracing::debug!(
            order_id = %order.id,
            status = %stored.status,
            version = stored.version,
            "order status updated"
        );

        Ok(stored.clone())
    }
}
