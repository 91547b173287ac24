use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::job_note::{self, Entity as JobNote};
use crate::types::internal::{timestamp, ActionOutcome, AuditIntent, EntityType, EventType};
use crate::types::StoreResult;

/// Append-only log of notes per job
#[derive(Debug, Default)]
pub struct NoteStore;

impl NoteStore {
    pub fn new() -> Self {
        Self
    }

    /// Append a note after every existing note on the job
    ///
    /// `created_at` is kept strictly increasing per job so creation order and
    /// listing order agree even within one clock tick.
    pub async fn append(
        &self,
        conn: &impl ConnectionTrait,
        job_id: &str,
        author_id: &str,
        note: String,
    ) -> StoreResult<job_note::Model> {
        let last: Option<i64> = JobNote::find()
            .select_only()
            .column(job_note::Column::CreatedAt)
            .filter(job_note::Column::JobId.eq(job_id))
            .order_by_desc(job_note::Column::CreatedAt)
            .into_tuple()
            .one(conn)
            .await
            .map_err(|e| InternalError::database("latest_job_note", e))?;

        let created_at = match last {
            Some(previous) => timestamp::advance(previous),
            None => timestamp::now_micros(),
        };

        let model = job_note::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            job_id: Set(job_id.to_string()),
            worker_id: Set(Some(author_id.to_string())),
            note: Set(note),
            created_at: Set(created_at),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("append_job_note", e))?;

        let intent = AuditIntent::new(EventType::NoteAppended, EntityType::Job, job_id)
            .with("note_id", model.id.as_str())
            .at(created_at);

        Ok(ActionOutcome::new(model).with_audit(intent))
    }

    pub async fn list_for_job(
        &self,
        conn: &impl ConnectionTrait,
        job_id: &str,
    ) -> Result<Vec<job_note::Model>, InternalError> {
        JobNote::find()
            .filter(job_note::Column::JobId.eq(job_id))
            .order_by_asc(job_note::Column::CreatedAt)
            .order_by_asc(job_note::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_job_notes", e))
    }
}
