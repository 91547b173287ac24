use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::internal::CustomerError;
use crate::errors::InternalError;
use crate::types::db::customer::{self, Entity as Customer};
use crate::types::dto::{CustomerUpdate, NewCustomer};
use crate::types::internal::{timestamp, ActionOutcome, AuditIntent, EntityType, EventType};
use crate::types::StoreResult;

#[derive(Debug, Default)]
pub struct CustomerStore;

impl CustomerStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        new_customer: NewCustomer,
    ) -> StoreResult<customer::Model> {
        let now = timestamp::now_micros();

        let model = customer::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            full_name: Set(new_customer.full_name),
            phone: Set(new_customer.phone),
            email: Set(new_customer.email),
            address: Set(new_customer.address),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("create_customer", e))?;

        let intent = AuditIntent::new(EventType::CustomerCreated, EntityType::Customer, &model.id)
            .with("full_name", model.full_name.as_str())
            .at(now);

        Ok(ActionOutcome::new(model).with_audit(intent))
    }

    pub async fn get(
        &self,
        conn: &impl ConnectionTrait,
        customer_id: &str,
    ) -> Result<customer::Model, InternalError> {
        Customer::find_by_id(customer_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_customer", e))?
            .ok_or_else(|| CustomerError::NotFound(customer_id.to_string()).into())
    }

    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        active_only: bool,
    ) -> Result<Vec<customer::Model>, InternalError> {
        let mut query = Customer::find();
        if active_only {
            query = query.filter(customer::Column::IsActive.eq(true));
        }
        query
            .order_by_asc(customer::Column::FullName)
            .order_by_asc(customer::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_customers", e))
    }

    /// Apply the fields present in `changes`; absent fields keep their value
    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        existing: customer::Model,
        changes: CustomerUpdate,
    ) -> StoreResult<customer::Model> {
        let updated_at = timestamp::advance(existing.updated_at);
        let mut changed: Vec<&str> = Vec::new();
        let mut model: customer::ActiveModel = existing.into();

        if let Some(full_name) = changes.full_name {
            model.full_name = Set(full_name);
            changed.push("full_name");
        }
        if let Some(phone) = changes.phone {
            model.phone = Set(phone);
            changed.push("phone");
        }
        if let Some(email) = changes.email {
            model.email = Set(Some(email).filter(|v| !v.is_empty()));
            changed.push("email");
        }
        if let Some(address) = changes.address {
            model.address = Set(Some(address).filter(|v| !v.is_empty()));
            changed.push("address");
        }
        model.updated_at = Set(updated_at);

        let model = model
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_customer", e))?;

        let intent = AuditIntent::new(EventType::CustomerUpdated, EntityType::Customer, &model.id)
            .with("fields", changed)
            .at(updated_at);

        Ok(ActionOutcome::new(model).with_audit(intent))
    }

    pub async fn set_active(
        &self,
        conn: &impl ConnectionTrait,
        existing: customer::Model,
        active: bool,
    ) -> StoreResult<customer::Model> {
        if existing.is_active == active {
            return Ok(ActionOutcome::new(existing));
        }

        let updated_at = timestamp::advance(existing.updated_at);
        let mut model: customer::ActiveModel = existing.into();
        model.is_active = Set(active);
        model.updated_at = Set(updated_at);

        let model = model
            .update(conn)
            .await
            .map_err(|e| InternalError::database("set_customer_active", e))?;

        let event = if active {
            EventType::CustomerActivated
        } else {
            EventType::CustomerDeactivated
        };
        let intent = AuditIntent::new(event, EntityType::Customer, &model.id).at(updated_at);

        Ok(ActionOutcome::new(model).with_audit(intent))
    }
}
