use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::types::internal::money::Amount;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub job_id: String,
    /// Fixed-point total in cents
    pub total_cents: i64,
    pub is_paid: bool,
    pub created_at: i64,
}

impl Model {
    /// Total as a two-decimal amount
    ///
    /// The column carries a CHECK (>= 0), so a stored row always converts.
    pub fn total(&self) -> Amount {
        Amount::from_cents(self.total_cents).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id",
        on_delete = "Cascade"
    )]
    Job,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
