//! Outbox serialization of product events.

use chrono::{DateTime, Utc};
use common::{ProductId, SharedClock};
use domain::{DomainEvent, Money, ProductEvent};
use serde::Serialize;
use store::{Mutation, OutboxRow};

use crate::error::{CatalogError, Result};

/// Turns product events into outbox inserts.
#[derive(Clone)]
pub struct OutboxRepository {
    clock: SharedClock,
}

impl OutboxRepository {
    pub fn new(clock: SharedClock) -> Self {
        Self { clock }
    }

    /// Builds the pending outbox row for `event`, stamped with the clock's
    /// current time.
    pub fn insert_mutation(&self, event: &ProductEvent) -> Result<Mutation> {
        let payload = serialize_event(event)?;
        Ok(Mutation::InsertOutboxEvent(OutboxRow::pending(
            event.event_type(),
            event.aggregate_id(),
            payload,
            self.clock.now(),
        )))
    }
}

#[derive(Serialize)]
struct EventPayload<'a> {
    event_type: &'static str,
    aggregate_id: &'a str,
    occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    body: EventBody<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum EventBody<'a> {
    Details {
        name: &'a str,
        description: &'a str,
        category: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        base_price: Option<PricePayload>,
    },
    Discount {
        percentage: u32,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    },
    Empty {},
}

#[derive(Serialize)]
struct PricePayload {
    numerator: i64,
    denominator: i64,
}

impl PricePayload {
    fn from_money(product_id: &ProductId, money: &Money) -> Result<Self> {
        let (numerator, denominator) = money
            .to_i64_parts()
            .ok_or_else(|| CatalogError::PriceOutOfRange(product_id.clone()))?;
        Ok(Self {
            numerator,
            denominator,
        })
    }
}

/// Serializes an event into its outbox JSON payload.
///
/// Every payload carries `event_type`, `aggregate_id` and `occurred_at`
/// alongside the event's own fields.
pub fn serialize_event(event: &ProductEvent) -> Result<serde_json::Value> {
    let body = match event {
        ProductEvent::ProductCreated(data) => EventBody::Details {
            name: &data.name,
            description: &data.description,
            category: &data.category,
            base_price: Some(PricePayload::from_money(&data.product_id, &data.base_price)?),
        },
        ProductEvent::ProductUpdated(data) => EventBody::Details {
            name: &data.name,
            description: &data.description,
            category: &data.category,
            base_price: None,
        },
        ProductEvent::DiscountApplied(data) => EventBody::Discount {
            percentage: data.percentage,
            start_date: data.start,
            end_date: data.end,
        },
        ProductEvent::ProductActivated(_)
        | ProductEvent::ProductDeactivated(_)
        | ProductEvent::ProductArchived(_)
        | ProductEvent::DiscountRemoved(_) => EventBody::Empty {},
    };

    let payload = EventPayload {
        event_type: event.event_type(),
        aggregate_id: event.aggregate_id(),
        occurred_at: event.occurred_at(),
        body,
    };
    Ok(serde_json::to_value(payload)?)
}
