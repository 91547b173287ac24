use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::internal::ValidationError;

/// Lifecycle status of a job, stored as a lowercase string
///
/// Edges between statuses live in `providers::job_lifecycle`; nothing else
/// writes this column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[sea_orm(string_value = "created")]
    Created,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "waiting_for_parts")]
    WaitingForParts,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Created => "created",
            JobStatus::InProgress => "in_progress",
            JobStatus::WaitingForParts => "waiting_for_parts",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }

    /// No transition leaves a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "created" => Ok(JobStatus::Created),
            "in_progress" => Ok(JobStatus::InProgress),
            "waiting_for_parts" => Ok(JobStatus::WaitingForParts),
            "completed" => Ok(JobStatus::Completed),
            "cancelled" => Ok(JobStatus::Cancelled),
            other => Err(ValidationError::invalid_enum("status", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(indexed)]
    pub vehicle_id: String,
    #[sea_orm(indexed)]
    pub assigned_worker: Option<String>,
    pub description: String,
    pub status: JobStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Model {
    pub fn is_assigned_to(&self, account_id: &str) -> bool {
        self.assigned_worker.as_deref() == Some(account_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id",
        on_delete = "Cascade"
    )]
    Vehicle,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AssignedWorker",
        to = "super::account::Column::Id",
        on_delete = "SetNull"
    )]
    AssignedWorker,
    #[sea_orm(has_many = "super::job_note::Entity")]
    JobNote,
    #[sea_orm(has_one = "super::invoice::Entity")]
    Invoice,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedWorker.def()
    }
}

impl Related<super::job_note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobNote.def()
    }
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
