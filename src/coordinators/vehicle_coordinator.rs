use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::audit::AuditLogger;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::errors::internal::CustomerError;
use crate::errors::InternalError;
use crate::providers::{AccessPolicy, Action, Target};
use crate::stores::{CustomerStore, VehicleStore};
use crate::types::db::vehicle;
use crate::types::dto::NewVehicle;
use crate::types::internal::context::RequestContext;

pub struct VehicleCoordinator {
    db: DatabaseConnection,
    access_policy: Arc<AccessPolicy>,
    audit_logger: Arc<AuditLogger>,
    customer_store: Arc<CustomerStore>,
    vehicle_store: Arc<VehicleStore>,
}

impl VehicleCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            access_policy: app_data.access_policy.clone(),
            audit_logger: app_data.audit_logger.clone(),
            customer_store: app_data.customer_store.clone(),
            vehicle_store: app_data.vehicle_store.clone(),
        }
    }

    /// Register a vehicle to an active customer
    ///
    /// # Errors
    /// * `CustomerError::NotFound` - unknown customer
    /// * `CustomerError::Inactive` - customer has been deactivated
    pub async fn register_vehicle(
        &self,
        ctx: &RequestContext,
        new_vehicle: NewVehicle,
    ) -> Result<vehicle::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::RegisterVehicle, Target::Capability)?;
        let new_vehicle = new_vehicle.validated()?;

        let txn = begin_transaction(&self.db).await?;
        let customer = self.customer_store.get(&txn, &new_vehicle.customer_id).await?;
        if !customer.is_active {
            return Err(CustomerError::Inactive(customer.id).into());
        }

        let outcome = self.vehicle_store.create(&txn, new_vehicle).await?;
        let vehicle = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(
            vehicle_id = %vehicle.id,
            customer_id = %vehicle.customer_id,
            registered_by = %actor.account_id,
            "Vehicle registered"
        );
        Ok(vehicle)
    }

    pub async fn get_vehicle(&self, ctx: &RequestContext, vehicle_id: &str) -> Result<vehicle::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ViewDirectory, Target::Capability)?;
        self.vehicle_store.get(&self.db, vehicle_id).await
    }

    pub async fn list_vehicles_for_customer(
        &self,
        ctx: &RequestContext,
        customer_id: &str,
    ) -> Result<Vec<vehicle::Model>, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ViewDirectory, Target::Capability)?;
        let customer = self.customer_store.get(&self.db, customer_id).await?;
        self.vehicle_store.list_for_customer(&self.db, &customer.id).await
    }

    pub async fn list_all_vehicles(&self, ctx: &RequestContext) -> Result<Vec<vehicle::Model>, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ViewAll, Target::Capability)?;
        self.vehicle_store.list_all(&self.db).await
    }

    /// Remove a vehicle that never had a job
    ///
    /// The only hard delete the core offers; customers and accounts are
    /// deactivated instead.
    ///
    /// # Authorization
    /// remove-vehicle (administrators only)
    ///
    /// # Errors
    /// * `VehicleError::NotFound` - unknown vehicle
    /// * `VehicleError::HasJobs` - the vehicle has job history
    pub async fn remove_vehicle(&self, ctx: &RequestContext, vehicle_id: &str) -> Result<vehicle::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::RemoveVehicle, Target::Capability)?;

        let txn = begin_transaction(&self.db).await?;
        let existing = self.vehicle_store.get(&txn, vehicle_id).await?;
        let outcome = self.vehicle_store.delete(&txn, existing).await?;
        let vehicle = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(vehicle_id = %vehicle.id, removed_by = %actor.account_id, "Vehicle removed");
        Ok(vehicle)
    }
}
