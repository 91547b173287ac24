use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::audit::AuditLogger;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::errors::internal::InvoiceError;
use crate::errors::InternalError;
use crate::providers::{AccessPolicy, Action, Target};
use crate::stores::{InvoiceStore, JobStore};
use crate::types::db::{invoice, JobStatus};
use crate::types::internal::context::RequestContext;
use crate::types::internal::Amount;

/// Invoices for completed jobs
///
/// Invoices are invisible to workers: reads and payments report not-found
/// rather than forbidden.
pub struct InvoiceCoordinator {
    db: DatabaseConnection,
    access_policy: Arc<AccessPolicy>,
    audit_logger: Arc<AuditLogger>,
    job_store: Arc<JobStore>,
    invoice_store: Arc<InvoiceStore>,
}

impl InvoiceCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            access_policy: app_data.access_policy.clone(),
            audit_logger: app_data.audit_logger.clone(),
            job_store: app_data.job_store.clone(),
            invoice_store: app_data.invoice_store.clone(),
        }
    }

    /// Issue the single invoice for a completed job
    ///
    /// The status check and the insert share one transaction; the unique
    /// index on `invoices.job_id` settles concurrent issuers.
    ///
    /// # Authorization
    /// issue-invoice (administrators only)
    ///
    /// # Arguments
    /// * `ctx` - RequestContext carrying the acting account
    /// * `job_id` - Completed job to bill
    /// * `total` - Decimal string, non-negative, at most two fractional digits
    ///
    /// # Errors
    /// * `ValidationError` - negative, non-finite or over-precise amount
    /// * `JobError::NotFound` - unknown job
    /// * `InvoiceError::JobNotCompleted` - job is not in `completed`
    /// * `InvoiceError::AlreadyIssued` - the job already has an invoice
    pub async fn issue_invoice(
        &self,
        ctx: &RequestContext,
        job_id: &str,
        total: &str,
    ) -> Result<invoice::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::IssueInvoice, Target::Capability)?;
        let total: Amount = total.parse()?;

        let txn = begin_transaction(&self.db).await?;
        let job = self.job_store.get(&txn, job_id).await?;
        if job.status != JobStatus::Completed {
            return Err(InvoiceError::JobNotCompleted {
                job_id: job.id,
                status: job.status,
            }
            .into());
        }

        let outcome = self.invoice_store.create(&txn, &job.id, total).await?;
        let invoice = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(
            invoice_id = %invoice.id,
            job_id = %invoice.job_id,
            total = %total,
            issued_by = %actor.account_id,
            "Invoice issued"
        );
        Ok(invoice)
    }

    /// Mark an invoice paid; paying a paid invoice returns it unchanged
    ///
    /// Only the first payment writes an audit event.
    ///
    /// # Authorization
    /// record-payment; actors without it get not-found, since invoices are
    /// invisible to workers
    ///
    /// # Errors
    /// * `AccessError::Hidden` - actor cannot see invoices
    /// * `InvoiceError::NotFound` - unknown invoice
    pub async fn record_payment(&self, ctx: &RequestContext, invoice_id: &str) -> Result<invoice::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy
            .require_visible(actor, Action::RecordPayment, "Invoice", invoice_id)?;

        let txn = begin_transaction(&self.db).await?;
        let outcome = self.invoice_store.mark_paid(&txn, invoice_id).await?;
        let newly_paid = !outcome.audit.is_empty();
        let invoice = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        if newly_paid {
            tracing::info!(invoice_id = %invoice.id, recorded_by = %actor.account_id, "Payment recorded");
        } else {
            tracing::debug!(invoice_id = %invoice.id, "Invoice already paid");
        }
        Ok(invoice)
    }

    pub async fn get_invoice(&self, ctx: &RequestContext, invoice_id: &str) -> Result<invoice::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy
            .require_visible(actor, Action::ViewInvoice, "Invoice", invoice_id)?;
        self.invoice_store.get(&self.db, invoice_id).await
    }

    /// The invoice issued for `job_id`
    ///
    /// # Errors
    /// * `AccessError::Hidden` - actor cannot see invoices
    /// * `JobError::NotFound` - unknown job
    /// * `InvoiceError::NoInvoiceForJob` - job has not been invoiced
    pub async fn get_invoice_for_job(&self, ctx: &RequestContext, job_id: &str) -> Result<invoice::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy
            .require_visible(actor, Action::ViewInvoice, "Invoice for job", job_id)?;

        let job = self.job_store.get(&self.db, job_id).await?;
        self.invoice_store
            .find_for_job(&self.db, &job.id)
            .await?
            .ok_or_else(|| InvoiceError::NoInvoiceForJob(job.id).into())
    }

    pub async fn list_invoices(
        &self,
        ctx: &RequestContext,
        unpaid_only: bool,
    ) -> Result<Vec<invoice::Model>, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ViewAll, Target::Capability)?;
        self.invoice_store.list(&self.db, unpaid_only).await
    }
}
