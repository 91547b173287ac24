use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::internal::InvoiceError;
use crate::errors::InternalError;
use crate::stores::is_unique_violation;
use crate::types::db::invoice::{self, Entity as Invoice};
use crate::types::internal::{timestamp, ActionOutcome, Amount, AuditIntent, EntityType, EventType};
use crate::types::StoreResult;

#[derive(Debug, Default)]
pub struct InvoiceStore;

impl InvoiceStore {
    pub fn new() -> Self {
        Self
    }

    /// Insert the invoice for `job_id`
    ///
    /// # Errors
    /// * `InvoiceError::AlreadyIssued` - the unique index on `job_id` rejected the row
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        job_id: &str,
        total: Amount,
    ) -> StoreResult<invoice::Model> {
        let now = timestamp::now_micros();

        let model = invoice::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            job_id: Set(job_id.to_string()),
            total_cents: Set(total.cents()),
            is_paid: Set(false),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::from(InvoiceError::AlreadyIssued {
                    job_id: job_id.to_string(),
                })
            } else {
                InternalError::database("issue_invoice", e)
            }
        })?;

        let intent = AuditIntent::new(EventType::InvoiceIssued, EntityType::Invoice, &model.id)
            .with("job_id", model.job_id.as_str())
            .with("total", total.to_string())
            .at(now);

        Ok(ActionOutcome::new(model).with_audit(intent))
    }

    pub async fn get(
        &self,
        conn: &impl ConnectionTrait,
        invoice_id: &str,
    ) -> Result<invoice::Model, InternalError> {
        Invoice::find_by_id(invoice_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_invoice", e))?
            .ok_or_else(|| InvoiceError::NotFound(invoice_id.to_string()).into())
    }

    pub async fn find_for_job(
        &self,
        conn: &impl ConnectionTrait,
        job_id: &str,
    ) -> Result<Option<invoice::Model>, InternalError> {
        Invoice::find()
            .filter(invoice::Column::JobId.eq(job_id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_invoice_for_job", e))
    }

    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        unpaid_only: bool,
    ) -> Result<Vec<invoice::Model>, InternalError> {
        let mut query = Invoice::find();
        if unpaid_only {
            query = query.filter(invoice::Column::IsPaid.eq(false));
        }
        query
            .order_by_asc(invoice::Column::CreatedAt)
            .order_by_asc(invoice::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_invoices", e))
    }

    /// Set the paid flag if it is not set yet
    ///
    /// Conditional on `is_paid = false`; when nothing changes the current row
    /// is returned with no audit record.
    pub async fn mark_paid(
        &self,
        conn: &impl ConnectionTrait,
        invoice_id: &str,
    ) -> StoreResult<invoice::Model> {
        let result = Invoice::update_many()
            .col_expr(invoice::Column::IsPaid, Expr::value(true))
            .filter(invoice::Column::Id.eq(invoice_id))
            .filter(invoice::Column::IsPaid.eq(false))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("record_payment", e))?;

        let model = self.get(conn, invoice_id).await?;
        if result.rows_affected == 0 {
            return Ok(ActionOutcome::new(model));
        }

        let intent = AuditIntent::new(EventType::InvoicePaid, EntityType::Invoice, &model.id)
            .with("job_id", model.job_id.as_str());

        Ok(ActionOutcome::new(model).with_audit(intent))
    }
}
