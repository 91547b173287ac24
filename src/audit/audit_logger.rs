use std::sync::Arc;

use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::stores::AuditStore;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{ActionOutcome, AuditIntent};

/// Persists the audit intents produced by store mutations
///
/// Always writes on the connection the mutation used, so the audit rows
/// commit or roll back together with the change they describe.
pub struct AuditLogger {
    pub audit_store: Arc<AuditStore>,
}

impl AuditLogger {
    pub fn new(audit_store: Arc<AuditStore>) -> Self {
        Self { audit_store }
    }

    pub async fn record(
        &self,
        conn: &impl ConnectionTrait,
        ctx: &RequestContext,
        intents: Vec<AuditIntent>,
    ) -> Result<(), InternalError> {
        for intent in intents {
            tracing::debug!(
                request_id = %ctx.request_id,
                event_type = %intent.event_type,
                entity_id = %intent.entity_id,
                "Writing audit event"
            );
            self.audit_store.write_event(conn, ctx, intent).await?;
        }
        Ok(())
    }

    /// Record an outcome's audit trail and hand back its value
    pub async fn persist<T>(
        &self,
        conn: &impl ConnectionTrait,
        ctx: &RequestContext,
        outcome: ActionOutcome<T>,
    ) -> Result<T, InternalError> {
        self.record(conn, ctx, outcome.audit).await?;
        Ok(outcome.value)
    }
}
