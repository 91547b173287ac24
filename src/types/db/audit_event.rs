use sea_orm::entity::prelude::*;
use serde::Serialize;

/// SeaORM entity for audit_events table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "audit_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub occurred_at: i64,
    pub event_type: String,
    pub actor_id: String,
    pub request_id: String,
    pub entity_type: String,
    pub entity_id: String,
    /// JSON object with event-specific fields
    pub data: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
