use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::audit::AuditLogger;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::providers::{AccessPolicy, Action, Target};
use crate::stores::CustomerStore;
use crate::types::db::customer;
use crate::types::dto::{CustomerUpdate, NewCustomer};
use crate::types::internal::context::RequestContext;

/// Customer records; customers are deactivated, never deleted
pub struct CustomerCoordinator {
    db: DatabaseConnection,
    access_policy: Arc<AccessPolicy>,
    audit_logger: Arc<AuditLogger>,
    customer_store: Arc<CustomerStore>,
}

impl CustomerCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            access_policy: app_data.access_policy.clone(),
            audit_logger: app_data.audit_logger.clone(),
            customer_store: app_data.customer_store.clone(),
        }
    }

    pub async fn create_customer(
        &self,
        ctx: &RequestContext,
        new_customer: NewCustomer,
    ) -> Result<customer::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::CreateCustomer, Target::Capability)?;
        let new_customer = new_customer.validated()?;

        let txn = begin_transaction(&self.db).await?;
        let outcome = self.customer_store.create(&txn, new_customer).await?;
        let customer = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(customer_id = %customer.id, created_by = %actor.account_id, "Customer created");
        Ok(customer)
    }

    /// Apply a partial update to a customer profile
    ///
    /// Absent fields keep their value; a blank email or address clears it.
    ///
    /// # Arguments
    /// * `ctx` - RequestContext carrying the acting account
    /// * `customer_id` - Customer to change
    /// * `changes` - Fields to set; at least one must be present
    ///
    /// # Errors
    /// * `ValidationError::EmptyUpdate` - no field supplied
    /// * `ValidationError::MissingField` - blank name or phone
    /// * `CustomerError::NotFound` - unknown customer
    pub async fn update_customer(
        &self,
        ctx: &RequestContext,
        customer_id: &str,
        changes: CustomerUpdate,
    ) -> Result<customer::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::UpdateCustomer, Target::Capability)?;
        let changes = changes.validated()?;

        let txn = begin_transaction(&self.db).await?;
        let existing = self.customer_store.get(&txn, customer_id).await?;
        let outcome = self.customer_store.update(&txn, existing, changes).await?;
        let customer = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(customer_id = %customer.id, updated_by = %actor.account_id, "Customer updated");
        Ok(customer)
    }

    pub async fn deactivate_customer(
        &self,
        ctx: &RequestContext,
        customer_id: &str,
    ) -> Result<customer::Model, InternalError> {
        self.set_customer_active(ctx, customer_id, false).await
    }

    pub async fn reactivate_customer(
        &self,
        ctx: &RequestContext,
        customer_id: &str,
    ) -> Result<customer::Model, InternalError> {
        self.set_customer_active(ctx, customer_id, true).await
    }

    async fn set_customer_active(
        &self,
        ctx: &RequestContext,
        customer_id: &str,
        active: bool,
    ) -> Result<customer::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::DeactivateCustomer, Target::Capability)?;

        let txn = begin_transaction(&self.db).await?;
        let existing = self.customer_store.get(&txn, customer_id).await?;
        let outcome = self.customer_store.set_active(&txn, existing, active).await?;
        let customer = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(customer_id = %customer.id, active, changed_by = %actor.account_id, "Customer active flag set");
        Ok(customer)
    }

    pub async fn get_customer(&self, ctx: &RequestContext, customer_id: &str) -> Result<customer::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ViewDirectory, Target::Capability)?;
        self.customer_store.get(&self.db, customer_id).await
    }

    pub async fn list_customers(
        &self,
        ctx: &RequestContext,
        active_only: bool,
    ) -> Result<Vec<customer::Model>, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ViewAll, Target::Capability)?;
        self.customer_store.list(&self.db, active_only).await
    }
}
