use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::internal::VehicleError;
use crate::errors::InternalError;
use crate::types::db::job;
use crate::types::db::vehicle::{self, Entity as Vehicle};
use crate::types::dto::NewVehicle;
use crate::types::internal::{timestamp, ActionOutcome, AuditIntent, EntityType, EventType};
use crate::types::StoreResult;

#[derive(Debug, Default)]
pub struct VehicleStore;

impl VehicleStore {
    pub fn new() -> Self {
        Self
    }

    /// Insert a vehicle; the caller has already checked the owning customer
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        new_vehicle: NewVehicle,
    ) -> StoreResult<vehicle::Model> {
        let now = timestamp::now_micros();

        let model = vehicle::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            customer_id: Set(new_vehicle.customer_id),
            make: Set(new_vehicle.make),
            model: Set(new_vehicle.model),
            year: Set(new_vehicle.year),
            plate_number: Set(new_vehicle.plate_number),
            created_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("register_vehicle", e))?;

        let intent = AuditIntent::new(EventType::VehicleRegistered, EntityType::Vehicle, &model.id)
            .with("customer_id", model.customer_id.as_str())
            .with("plate_number", model.plate_number.as_str())
            .at(now);

        Ok(ActionOutcome::new(model).with_audit(intent))
    }

    pub async fn get(
        &self,
        conn: &impl ConnectionTrait,
        vehicle_id: &str,
    ) -> Result<vehicle::Model, InternalError> {
        Vehicle::find_by_id(vehicle_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_vehicle", e))?
            .ok_or_else(|| VehicleError::NotFound(vehicle_id.to_string()).into())
    }

    pub async fn list_for_customer(
        &self,
        conn: &impl ConnectionTrait,
        customer_id: &str,
    ) -> Result<Vec<vehicle::Model>, InternalError> {
        Vehicle::find()
            .filter(vehicle::Column::CustomerId.eq(customer_id))
            .order_by_asc(vehicle::Column::CreatedAt)
            .order_by_asc(vehicle::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_vehicles_for_customer", e))
    }

    pub async fn list_all(&self, conn: &impl ConnectionTrait) -> Result<Vec<vehicle::Model>, InternalError> {
        Vehicle::find()
            .order_by_asc(vehicle::Column::CreatedAt)
            .order_by_asc(vehicle::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_vehicles", e))
    }

    pub async fn count_jobs(&self, conn: &impl ConnectionTrait, vehicle_id: &str) -> Result<u64, InternalError> {
        job::Entity::find()
            .filter(job::Column::VehicleId.eq(vehicle_id))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_vehicle_jobs", e))
    }

    /// Hard-delete a vehicle that has no jobs
    ///
    /// The vehicle row is re-read under `FOR UPDATE` before the jobs are
    /// counted. A concurrent `create_job` then either commits first (and is
    /// counted) or blocks on its foreign-key check until this delete commits
    /// and fails. SQLite has no row locks; its single writer gives the same
    /// ordering.
    ///
    /// # Errors
    /// * `VehicleError::NotFound` - the vehicle was removed after `existing` was read
    /// * `VehicleError::HasJobs` - job history would be cascaded away
    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        existing: vehicle::Model,
    ) -> StoreResult<vehicle::Model> {
        let mut query = Vehicle::find_by_id(existing.id.clone());
        if conn.get_database_backend() != DbBackend::Sqlite {
            query = query.lock_exclusive();
        }
        let existing = query
            .one(conn)
            .await
            .map_err(|e| InternalError::database("lock_vehicle", e))?
            .ok_or_else(|| VehicleError::NotFound(existing.id.clone()))?;

        let job_count = self.count_jobs(conn, &existing.id).await?;
        if job_count > 0 {
            return Err(VehicleError::HasJobs {
                vehicle_id: existing.id,
                job_count,
            }
            .into());
        }

        existing
            .clone()
            .delete(conn)
            .await
            .map_err(|e| InternalError::database("remove_vehicle", e))?;

        let intent = AuditIntent::new(EventType::VehicleRemoved, EntityType::Vehicle, &existing.id)
            .with("customer_id", existing.customer_id.as_str())
            .with("plate_number", existing.plate_number.as_str());

        Ok(ActionOutcome::new(existing).with_audit(intent))
    }
}
