//! Order entity and its status state machine
//!
//! An order moves through a closed set of statuses:
//!
//! ```text
//! NEW ──► RESERVED ──► CONFIRMED
//!  │          │
//!  └──────────┴──────► FAILED
//! ```
//!
//! `CONFIRMED` and `FAILED` are terminal. Every accepted, non-idempotent
//! transition bumps `version` by exactly one and stamps `updated_at` with the
//! caller-supplied clock reading. Nothing in this module performs I/O.

use crate::core::error::OrderError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Version assigned to a freshly constructed order
pub const INITIAL_VERSION: i64 = 0;

/// Maximum length of a failure reason code, in characters
pub const MAX_FAIL_REASON_CODE_LEN: usize = 64;

/// Maximum length of a failure reason detail, in characters
pub const MAX_FAIL_REASON_DETAIL_LEN: usize = 1024;

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    New,
    Reserved,
    Confirmed,
    Failed,
}

/// Adjacency table of accepted transitions, keyed by the source status.
const TRANSITIONS: &[(OrderStatus, &[OrderStatus])] = &[
    (
        OrderStatus::New,
        &[OrderStatus::Reserved, OrderStatus::Failed],
    ),
    (
        OrderStatus::Reserved,
        &[OrderStatus::Confirmed, OrderStatus::Failed],
    ),
    (OrderStatus::Confirmed, &[]),
    (OrderStatus::Failed, &[]),
];

impl OrderStatus {
    /// Every status, in lifecycle order
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::New,
        OrderStatus::Reserved,
        OrderStatus::Confirmed,
        OrderStatus::Failed,
    ];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Reserved => "RESERVED",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Failed => "FAILED",
        }
    }

    /// Check whether a raw string names one of the defined statuses
    pub fn is_valid(raw: &str) -> bool {
        raw.parse::<OrderStatus>().is_ok()
    }

    /// Statuses reachable from this one in a single step
    pub fn allowed_targets(&self) -> &'static [OrderStatus] {
        TRANSITIONS
            .iter()
            .find(|(from, _)| from == self)
            .map(|(_, targets)| *targets)
            .unwrap_or(&[])
    }

    /// Check the transition table for `self -> next`
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_targets().contains(&next)
    }

    /// Terminal statuses accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Confirmed | OrderStatus::Failed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(OrderStatus::New),
            "RESERVED" => Ok(OrderStatus::Reserved),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "FAILED" => Ok(OrderStatus::Failed),
            other => Err(OrderError::InvalidStatus(other.to_string())),
        }
    }
}

/// Why an order ended up `FAILED`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailReason {
    code: String,
    detail: Option<String>,
}

impl FailReason {
    /// Build a reason, enforcing the code and detail length limits
    pub fn new(code: impl Into<String>, detail: Option<String>) -> Result<Self, OrderError> {
        let code = code.into();
        let code_len = code.trim().chars().count();
        if code_len == 0 || code.chars().count() > MAX_FAIL_REASON_CODE_LEN {
            return Err(OrderError::InvalidFailReason(format!(
                "code must be 1 to {} characters",
                MAX_FAIL_REASON_CODE_LEN
            )));
        }
        if detail
            .as_ref()
            .is_some_and(|d| d.chars().count() > MAX_FAIL_REASON_DETAIL_LEN)
        {
            return Err(OrderError::InvalidFailReason(format!(
                "detail must be at most {} characters",
                MAX_FAIL_REASON_DETAIL_LEN
            )));
        }
        Ok(Self { code, detail })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

/// A purchase order tracked through its status lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub status: OrderStatus,
    pub version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_reason_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_reason_detail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Construct a `NEW` order.
    ///
    /// The identifier is freshly generated and both timestamps sit at the Unix
    /// epoch; the repository overwrites all three when the order is stored.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            status: OrderStatus::New,
            version: INITIAL_VERSION,
            fail_reason_code: None,
            fail_reason_detail: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Move the order to `next`.
    ///
    /// Checks run in a fixed order: terminal source, idempotent no-op,
    /// transition table. On success the version grows by one and
    /// `updated_at` becomes `now`; on failure the order is left untouched.
    pub fn transition_to(&mut self, next: OrderStatus, now: DateTime<Utc>) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            return Err(OrderError::TerminalState(self.status));
        }

        if self.status == next {
            return Ok(());
        }

        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        self.version += 1;
        self.updated_at = now;

        Ok(())
    }

    /// Move the order to `FAILED`, recording why
    pub fn fail(&mut self, reason: Option<FailReason>, now: DateTime<Utc>) -> Result<(), OrderError> {
        self.transition_to(OrderStatus::Failed, now)?;

        if let Some(reason) = reason {
            self.fail_reason_code = Some(reason.code);
            self.fail_reason_detail = reason.detail;
        }

        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}
