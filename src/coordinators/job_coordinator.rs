use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::app_data::AppData;
use crate::audit::AuditLogger;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::errors::internal::{CustomerError, JobError};
use crate::errors::InternalError;
use crate::providers::job_lifecycle;
use crate::providers::{AccessPolicy, Action, Target};
use crate::stores::{AccountStore, AuditStore, CustomerStore, JobStore, VehicleStore};
use crate::types::db::{audit_event, job, JobStatus};
use crate::types::dto::common::require_text;
use crate::types::dto::NewJob;
use crate::types::internal::context::RequestContext;
use crate::types::internal::EntityType;

/// Job lifecycle: creation, assignment and status transitions
pub struct JobCoordinator {
    db: DatabaseConnection,
    access_policy: Arc<AccessPolicy>,
    audit_logger: Arc<AuditLogger>,
    audit_store: Arc<AuditStore>,
    account_store: Arc<AccountStore>,
    customer_store: Arc<CustomerStore>,
    vehicle_store: Arc<VehicleStore>,
    job_store: Arc<JobStore>,
}

impl JobCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            access_policy: app_data.access_policy.clone(),
            audit_logger: app_data.audit_logger.clone(),
            audit_store: app_data.audit_store.clone(),
            account_store: app_data.account_store.clone(),
            customer_store: app_data.customer_store.clone(),
            vehicle_store: app_data.vehicle_store.clone(),
            job_store: app_data.job_store.clone(),
        }
    }

    /// Open a job on a vehicle whose owner is active
    ///
    /// New jobs start in `created`. The vehicle, its customer and the
    /// optional assignee are all read inside the same transaction as the
    /// insert.
    ///
    /// # Authorization
    /// create-job; supplying an assignee also requires assign-worker
    ///
    /// # Arguments
    /// * `ctx` - RequestContext carrying the acting account
    /// * `new_job` - vehicle id, description and optional worker id
    ///
    /// # Errors
    /// * `ValidationError::MissingField` - blank description
    /// * `VehicleError::NotFound` - unknown vehicle
    /// * `CustomerError::Inactive` - the vehicle's owner has been deactivated
    /// * `AccountError::NotFound` / `JobError::WorkerInactive` - assignee missing or deactivated
    pub async fn create_job(&self, ctx: &RequestContext, new_job: NewJob) -> Result<job::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::CreateJob, Target::Capability)?;
        if new_job.assigned_worker.is_some() {
            self.access_policy.require(actor, Action::AssignWorker, Target::Capability)?;
        }
        let new_job = new_job.validated()?;

        let txn = begin_transaction(&self.db).await?;
        let vehicle = self.vehicle_store.get(&txn, &new_job.vehicle_id).await?;
        let customer = self.customer_store.get(&txn, &vehicle.customer_id).await?;
        if !customer.is_active {
            return Err(CustomerError::Inactive(customer.id).into());
        }
        if let Some(worker_id) = &new_job.assigned_worker {
            self.ensure_assignable(&txn, worker_id).await?;
        }

        let outcome = self.job_store.create(&txn, new_job).await?;
        let job = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(job_id = %job.id, vehicle_id = %job.vehicle_id, created_by = %actor.account_id, "Job created");
        Ok(job)
    }

    pub async fn get_job(&self, ctx: &RequestContext, job_id: &str) -> Result<job::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ViewJob, Target::Capability)?;
        self.job_store.get(&self.db, job_id).await
    }

    /// Jobs assigned to `worker_id`, or to the actor when `None`
    ///
    /// Looking at another account's jobs requires view-all.
    pub async fn list_jobs_for_worker(
        &self,
        ctx: &RequestContext,
        worker_id: Option<&str>,
    ) -> Result<Vec<job::Model>, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ViewAssignedJobs, Target::Capability)?;

        let worker_id = match worker_id {
            Some(other) if other != actor.account_id => {
                self.access_policy.require(actor, Action::ViewAll, Target::Capability)?;
                other
            }
            _ => actor.account_id.as_str(),
        };
        self.job_store.list_for_worker(&self.db, worker_id).await
    }

    pub async fn list_all_jobs(
        &self,
        ctx: &RequestContext,
        status: Option<&str>,
    ) -> Result<Vec<job::Model>, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ViewAll, Target::Capability)?;
        let status = status.map(str::parse::<JobStatus>).transpose()?;
        self.job_store.list_all(&self.db, status).await
    }

    /// Move a job to `requested_status`
    ///
    /// Checks run in a fixed order:
    /// 1. Deactivated actor
    /// 2. Unknown job, then unknown status string
    /// 3. Terminal source (same conflict for every role)
    /// 4. Assignment (workers act only on their own jobs)
    /// 5. Transition table
    ///
    /// The write itself is conditional on the row read here; losing that
    /// race is a transient error and nothing is written.
    ///
    /// # Arguments
    /// * `ctx` - RequestContext carrying the acting account
    /// * `job_id` - Job to move
    /// * `requested_status` - Target status as its stored name, e.g. `in_progress`
    ///
    /// # Errors
    /// * `AccessError::Forbidden` - inactive actor, or a worker not assigned to the job
    /// * `JobError::NotFound` - unknown job
    /// * `ValidationError::InvalidEnumValue` - unknown status name
    /// * `JobError::TerminalState` - job is completed or cancelled
    /// * `JobError::InvalidTransition` - no edge from the current status
    /// * `JobError::ConcurrentModification` - another writer changed the job first
    pub async fn transition(
        &self,
        ctx: &RequestContext,
        job_id: &str,
        requested_status: &str,
    ) -> Result<job::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require_active(actor, Action::UpdateJobStatus)?;

        let txn = begin_transaction(&self.db).await?;
        let existing = self.job_store.get(&txn, job_id).await?;
        let to: JobStatus = requested_status.parse()?;

        job_lifecycle::ensure_open(&existing.id, existing.status)?;
        self.access_policy.require(
            actor,
            Action::UpdateJobStatus,
            Target::Job {
                assigned_worker: existing.assigned_worker.as_deref(),
            },
        )?;
        job_lifecycle::check_transition(&existing.id, existing.status, to)?;

        let from = existing.status;
        let outcome = self.job_store.update_status(&txn, existing, to).await?;
        let job = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(
            job_id = %job.id,
            from = %from,
            to = %job.status,
            actor_id = %actor.account_id,
            "Job status changed"
        );
        Ok(job)
    }

    /// Assign `worker_id` to the job, or clear the assignment with `None`
    ///
    /// Status is unchanged; `updated_at` is refreshed in the same write.
    ///
    /// # Authorization
    /// assign-worker (administrators only)
    ///
    /// # Errors
    /// * `JobError::NotFound` - unknown job
    /// * `JobError::TerminalState` - job is completed or cancelled
    /// * `AccountError::NotFound` - unknown worker
    /// * `JobError::WorkerInactive` - worker has been deactivated
    /// * `JobError::ConcurrentModification` - the job changed after it was read
    pub async fn assign(
        &self,
        ctx: &RequestContext,
        job_id: &str,
        worker_id: Option<&str>,
    ) -> Result<job::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::AssignWorker, Target::Capability)?;

        let txn = begin_transaction(&self.db).await?;
        let existing = self.job_store.get(&txn, job_id).await?;
        job_lifecycle::ensure_open(&existing.id, existing.status)?;
        if let Some(worker_id) = worker_id {
            self.ensure_assignable(&txn, worker_id).await?;
        }

        let outcome = self
            .job_store
            .set_assignment(&txn, existing, worker_id.map(str::to_string))
            .await?;
        let job = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(
            job_id = %job.id,
            assigned_worker = ?job.assigned_worker,
            assigned_by = %actor.account_id,
            "Job assignment changed"
        );
        Ok(job)
    }

    /// Replace the job description; same permission as a status change
    ///
    /// # Errors
    /// * `ValidationError::MissingField` - blank description
    /// * `JobError::TerminalState` - job is completed or cancelled
    /// * `AccessError::Forbidden` - a worker not assigned to the job
    /// * `JobError::ConcurrentModification` - the job changed after it was read
    pub async fn revise_description(
        &self,
        ctx: &RequestContext,
        job_id: &str,
        description: &str,
    ) -> Result<job::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require_active(actor, Action::UpdateJobStatus)?;
        let description = require_text("description", description)?;

        let txn = begin_transaction(&self.db).await?;
        let existing = self.job_store.get(&txn, job_id).await?;
        job_lifecycle::ensure_open(&existing.id, existing.status)?;
        self.access_policy.require(
            actor,
            Action::UpdateJobStatus,
            Target::Job {
                assigned_worker: existing.assigned_worker.as_deref(),
            },
        )?;

        let outcome = self.job_store.update_description(&txn, existing, description).await?;
        let job = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(job_id = %job.id, actor_id = %actor.account_id, "Job description revised");
        Ok(job)
    }

    /// Audit events recorded against the job, in the order they were written
    ///
    /// Includes status changes, assignments, description revisions and
    /// appended notes.
    ///
    /// # Authorization
    /// view-all
    pub async fn job_history(
        &self,
        ctx: &RequestContext,
        job_id: &str,
    ) -> Result<Vec<audit_event::Model>, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ViewAll, Target::Capability)?;
        let job = self.job_store.get(&self.db, job_id).await?;
        self.audit_store.list_for_entity(&self.db, EntityType::Job, &job.id).await
    }

    async fn ensure_assignable(&self, conn: &impl ConnectionTrait, worker_id: &str) -> Result<(), InternalError> {
        let worker = self.account_store.get_by_id(conn, worker_id).await?;
        if !worker.is_active {
            return Err(JobError::WorkerInactive(worker.id).into());
        }
        Ok(())
    }
}
