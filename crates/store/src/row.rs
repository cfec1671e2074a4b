//! Persisted row shapes.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::{EventId, ProductId, StoreError};

/// The three nullable discount columns, present together or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountColumns {
    pub percentage: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price_num: i64,
    pub price_denom: i64,
    pub discount: Option<DiscountColumns>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

/// Processing state of an outbox row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutboxStatus {
    /// Written by a command, awaiting relay.
    #[default]
    Pending,
    /// Delivered by the relay.
    Processed,
    /// The relay gave up on it.
    Failed,
}

impl OutboxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutboxStatus::Pending => "pending",
            OutboxStatus::Processed => "processed",
            OutboxStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for OutboxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutboxStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OutboxStatus::Pending),
            "processed" => Ok(OutboxStatus::Processed),
            "failed" => Ok(OutboxStatus::Failed),
            other => Err(StoreError::InvalidColumn {
                column: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// A row of the `outbox_events` table.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboxRow {
    pub event_id: EventId,
    pub event_type: String,
    pub aggregate_id: String,
    pub payload: serde_json::Value,
    pub status: OutboxStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl OutboxRow {
    /// Creates a pending row.
    pub fn pending(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        payload: serde_json::Value,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            event_type: event_type.into(),
            aggregate_id: aggregate_id.into(),
            payload,
            status: OutboxStatus::Pending,
            created_at,
            processed_at: None,
        }
    }
}
