use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::internal::AuditError;
use crate::errors::InternalError;
use crate::types::db::audit_event;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{AuditIntent, EntityType};

/// Repository for audit event storage operations
#[derive(Debug, Default)]
pub struct AuditStore;

impl AuditStore {
    pub fn new() -> Self {
        Self
    }

    /// Write an audit event on the caller's connection
    ///
    /// Serializes the intent's data map to JSON and inserts it into
    /// `audit_events`, stamped with the request's actor and request id.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if serialization or database insert fails
    pub async fn write_event(
        &self,
        conn: &impl ConnectionTrait,
        ctx: &RequestContext,
        intent: AuditIntent,
    ) -> Result<(), InternalError> {
        let data_json = serde_json::to_string(&intent.data)
            .map_err(|e| AuditError::LogWriteFailed(format!("Failed to serialize audit data: {}", e)))?;

        let audit_event = audit_event::ActiveModel {
            id: sea_orm::ActiveValue::NotSet, // Let auto-increment handle this
            occurred_at: Set(intent.occurred_at),
            event_type: Set(intent.event_type.to_string()),
            actor_id: Set(ctx.actor_id()),
            request_id: Set(ctx.request_id.to_string()),
            entity_type: Set(intent.entity_type.to_string()),
            entity_id: Set(intent.entity_id),
            data: Set(data_json),
        };

        audit_event
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("write_audit_event", e))?;

        Ok(())
    }

    /// Events recorded against one entity, in write order
    pub async fn list_for_entity(
        &self,
        conn: &impl ConnectionTrait,
        entity_type: EntityType,
        entity_id: &str,
    ) -> Result<Vec<audit_event::Model>, InternalError> {
        audit_event::Entity::find()
            .filter(audit_event::Column::EntityType.eq(entity_type.as_str()))
            .filter(audit_event::Column::EntityId.eq(entity_id))
            .order_by_asc(audit_event::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_audit_events", e))
    }
}
