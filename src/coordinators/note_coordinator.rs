use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::audit::AuditLogger;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::providers::{AccessPolicy, Action, Target};
use crate::stores::{JobStore, NoteStore};
use crate::types::db::job_note;
use crate::types::dto::common::require_text;
use crate::types::internal::context::RequestContext;

/// Free-text work notes on jobs
///
/// Notes stay writable after a job is completed or cancelled.
pub struct NoteCoordinator {
    db: DatabaseConnection,
    access_policy: Arc<AccessPolicy>,
    audit_logger: Arc<AuditLogger>,
    job_store: Arc<JobStore>,
    note_store: Arc<NoteStore>,
}

impl NoteCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            access_policy: app_data.access_policy.clone(),
            audit_logger: app_data.audit_logger.clone(),
            job_store: app_data.job_store.clone(),
            note_store: app_data.note_store.clone(),
        }
    }

    /// Append a note to a job's log
    ///
    /// Notes are accepted in every status, terminal ones included. The
    /// author is recorded as the acting account.
    ///
    /// # Authorization
    /// add-note: administrators, or the worker assigned to the job
    ///
    /// # Arguments
    /// * `ctx` - RequestContext carrying the acting account
    /// * `job_id` - Job to annotate
    /// * `text` - Note body, trimmed; must not be blank
    ///
    /// # Errors
    /// * `ValidationError::MissingField` - blank text
    /// * `JobError::NotFound` - unknown job
    /// * `AccessError::Forbidden` - inactive actor, or a worker not assigned to the job
    pub async fn append_note(
        &self,
        ctx: &RequestContext,
        job_id: &str,
        text: &str,
    ) -> Result<job_note::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require_active(actor, Action::AddNote)?;
        let text = require_text("note", text)?;

        let txn = begin_transaction(&self.db).await?;
        let job = self.job_store.get(&txn, job_id).await?;
        self.access_policy.require(
            actor,
            Action::AddNote,
            Target::Job {
                assigned_worker: job.assigned_worker.as_deref(),
            },
        )?;

        let outcome = self.note_store.append(&txn, &job.id, &actor.account_id, text).await?;
        let note = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(job_id = %job.id, note_id = %note.id, author_id = %actor.account_id, "Note appended");
        Ok(note)
    }

    /// Every note on the job in creation order
    pub async fn list_notes(&self, ctx: &RequestContext, job_id: &str) -> Result<Vec<job_note::Model>, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ViewJob, Target::Capability)?;
        let job = self.job_store.get(&self.db, job_id).await?;
        self.note_store.list_for_job(&self.db, &job.id).await
    }
}
