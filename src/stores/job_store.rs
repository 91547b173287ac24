use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::internal::JobError;
use crate::errors::InternalError;
use crate::types::db::job::{self, Entity as Job};
use crate::types::db::JobStatus;
use crate::types::dto::NewJob;
use crate::types::internal::{timestamp, ActionOutcome, AuditIntent, EntityType, EventType};
use crate::types::StoreResult;

/// Jobs and their status column
///
/// Status writes go through `update_status` only. Every update is a
/// compare-and-set on the status and `updated_at` that were read, so two
/// writers can never both change the same job.
#[derive(Debug, Default)]
pub struct JobStore;

impl JobStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(&self, conn: &impl ConnectionTrait, new_job: NewJob) -> StoreResult<job::Model> {
        let now = timestamp::now_micros();

        let model = job::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            vehicle_id: Set(new_job.vehicle_id),
            assigned_worker: Set(new_job.assigned_worker),
            description: Set(new_job.description),
            status: Set(JobStatus::Created),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("create_job", e))?;

        let mut intent = AuditIntent::new(EventType::JobCreated, EntityType::Job, &model.id)
            .with("vehicle_id", model.vehicle_id.as_str())
            .with("status", model.status.as_str())
            .at(now);
        if let Some(worker) = &model.assigned_worker {
            intent = intent.with("assigned_worker", worker.as_str());
        }

        Ok(ActionOutcome::new(model).with_audit(intent))
    }

    pub async fn get(&self, conn: &impl ConnectionTrait, job_id: &str) -> Result<job::Model, InternalError> {
        Job::find_by_id(job_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_job", e))?
            .ok_or_else(|| JobError::NotFound(job_id.to_string()).into())
    }

    /// Jobs assigned to `worker_id`, most recently touched first
    pub async fn list_for_worker(
        &self,
        conn: &impl ConnectionTrait,
        worker_id: &str,
    ) -> Result<Vec<job::Model>, InternalError> {
        Job::find()
            .filter(job::Column::AssignedWorker.eq(worker_id))
            .order_by_desc(job::Column::UpdatedAt)
            .order_by_asc(job::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_jobs_for_worker", e))
    }

    pub async fn list_all(
        &self,
        conn: &impl ConnectionTrait,
        status: Option<JobStatus>,
    ) -> Result<Vec<job::Model>, InternalError> {
        let mut query = Job::find();
        if let Some(status) = status {
            query = query.filter(job::Column::Status.eq(status));
        }
        query
            .order_by_desc(job::Column::UpdatedAt)
            .order_by_asc(job::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_jobs", e))
    }

    /// Move `existing` from its current status to `to`
    ///
    /// Single conditional write on `(id, status, updated_at)`. Zero rows
    /// affected means another writer changed the job after `existing` was
    /// read, which also keeps `updated_at` from moving backwards.
    ///
    /// # Errors
    /// * `JobError::ConcurrentModification` - status no longer matches `existing`
    pub async fn update_status(
        &self,
        conn: &impl ConnectionTrait,
        existing: job::Model,
        to: JobStatus,
    ) -> StoreResult<job::Model> {
        let from = existing.status;
        let updated_at = timestamp::advance(existing.updated_at);

        let result = Job::update_many()
            .col_expr(job::Column::Status, Expr::value(to.as_str()))
            .col_expr(job::Column::UpdatedAt, Expr::value(updated_at))
            .filter(unchanged_since(&existing))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("update_job_status", e))?;

        if result.rows_affected == 0 {
            return Err(JobError::ConcurrentModification { job_id: existing.id }.into());
        }

        let model = job::Model {
            status: to,
            updated_at,
            ..existing
        };
        let intent = AuditIntent::new(EventType::JobStatusChanged, EntityType::Job, &model.id)
            .with("from", from.as_str())
            .with("to", to.as_str())
            .at(updated_at);

        Ok(ActionOutcome::new(model).with_audit(intent))
    }

    /// Set or clear the assigned worker; status is left untouched
    ///
    /// Conditional on the `status` and `updated_at` that were read, so a
    /// job completed or cancelled in the meantime is never reassigned.
    ///
    /// # Errors
    /// * `JobError::ConcurrentModification` - the row changed after `existing` was read
    pub async fn set_assignment(
        &self,
        conn: &impl ConnectionTrait,
        existing: job::Model,
        worker_id: Option<String>,
    ) -> StoreResult<job::Model> {
        let updated_at = timestamp::advance(existing.updated_at);

        let result = Job::update_many()
            .col_expr(job::Column::AssignedWorker, Expr::value(worker_id.clone()))
            .col_expr(job::Column::UpdatedAt, Expr::value(updated_at))
            .filter(unchanged_since(&existing))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("assign_job", e))?;

        if result.rows_affected == 0 {
            return Err(JobError::ConcurrentModification { job_id: existing.id }.into());
        }

        let previous = existing.assigned_worker.clone();
        let model = job::Model {
            assigned_worker: worker_id,
            updated_at,
            ..existing
        };
        let intent = AuditIntent::new(EventType::JobAssigned, EntityType::Job, &model.id)
            .with("previous_worker", previous)
            .with("assigned_worker", model.assigned_worker.clone())
            .at(updated_at);

        Ok(ActionOutcome::new(model).with_audit(intent))
    }

    /// Replace the description, conditional like [`Self::set_assignment`]
    ///
    /// # Errors
    /// * `JobError::ConcurrentModification` - the row changed after `existing` was read
    pub async fn update_description(
        &self,
        conn: &impl ConnectionTrait,
        existing: job::Model,
        description: String,
    ) -> StoreResult<job::Model> {
        let updated_at = timestamp::advance(existing.updated_at);

        let result = Job::update_many()
            .col_expr(job::Column::Description, Expr::value(description.clone()))
            .col_expr(job::Column::UpdatedAt, Expr::value(updated_at))
            .filter(unchanged_since(&existing))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("revise_job_description", e))?;

        if result.rows_affected == 0 {
            return Err(JobError::ConcurrentModification { job_id: existing.id }.into());
        }

        let model = job::Model {
            description,
            updated_at,
            ..existing
        };
        let intent = AuditIntent::new(EventType::JobDescriptionRevised, EntityType::Job, &model.id)
            .at(updated_at);

        Ok(ActionOutcome::new(model).with_audit(intent))
    }
}

/// Matches the row only while it still has the status and `updated_at` of `existing`
fn unchanged_since(existing: &job::Model) -> Condition {
    Condition::all()
        .add(job::Column::Id.eq(existing.id.as_str()))
        .add(job::Column::Status.eq(existing.status))
        .add(job::Column::UpdatedAt.eq(existing.updated_at))
}
