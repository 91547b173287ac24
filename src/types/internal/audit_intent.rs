use serde_json::{Map, Value};

use super::audit::{EntityType, EventType};
use super::timestamp;

/// An audit record produced by a store, not yet persisted
#[derive(Debug, Clone)]
pub struct AuditIntent {
    pub event_type: EventType,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub data: Map<String, Value>,
    pub occurred_at: i64,
}

impl AuditIntent {
    pub fn new(event_type: EventType, entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            event_type,
            entity_type,
            entity_id: entity_id.into(),
            data: Map::new(),
            occurred_at: timestamp::now_micros(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Pin the event time to the timestamp written on the row itself
    pub fn at(mut self, occurred_at: i64) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}
