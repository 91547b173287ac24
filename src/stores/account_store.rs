use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::errors::internal::AccountError;
use crate::errors::InternalError;
use crate::stores::is_unique_violation;
use crate::types::db::account::{self, Entity as Account};
use crate::types::dto::NewAccount;
use crate::types::internal::{timestamp, ActionOutcome, AuditIntent, EntityType, EventType};
use crate::types::StoreResult;

/// Staff accounts: identity, role and active flag
#[derive(Debug, Default)]
pub struct AccountStore;

impl AccountStore {
    pub fn new() -> Self {
        Self
    }

    /// Insert a new active account
    ///
    /// # Errors
    /// * `AccountError::DuplicateUsername` - username already taken (unique index)
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        new_account: NewAccount,
    ) -> StoreResult<account::Model> {
        let now = timestamp::now_micros();
        let username = new_account.username.clone();

        let model = account::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            username: Set(new_account.username),
            credential_hash: Set(new_account.credential_hash),
            role: Set(new_account.role),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::from(AccountError::DuplicateUsername { username })
            } else {
                InternalError::database("create_account", e)
            }
        })?;

        let intent = AuditIntent::new(EventType::AccountCreated, EntityType::Account, &model.id)
            .with("username", model.username.as_str())
            .with("role", model.role.as_str())
            .at(now);

        Ok(ActionOutcome::new(model).with_audit(intent))
    }

    pub async fn get_by_id(
        &self,
        conn: &impl ConnectionTrait,
        account_id: &str,
    ) -> Result<account::Model, InternalError> {
        Account::find_by_id(account_id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_account", e))?
            .ok_or_else(|| AccountError::NotFound(account_id.to_string()).into())
    }

    pub async fn find_by_username(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
    ) -> Result<Option<account::Model>, InternalError> {
        Account::find()
            .filter(account::Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_account_by_username", e))
    }

    pub async fn list(&self, conn: &impl ConnectionTrait) -> Result<Vec<account::Model>, InternalError> {
        Account::find()
            .order_by_asc(account::Column::Username)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_accounts", e))
    }

    pub async fn count(&self, conn: &impl ConnectionTrait) -> Result<u64, InternalError> {
        Account::find()
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_accounts", e))
    }

    /// Flip the active flag; a no-op (and no audit) when it already has that value
    pub async fn set_active(
        &self,
        conn: &impl ConnectionTrait,
        existing: account::Model,
        active: bool,
    ) -> StoreResult<account::Model> {
        if existing.is_active == active {
            return Ok(ActionOutcome::new(existing));
        }

        let updated_at = timestamp::advance(existing.updated_at);
        let mut model: account::ActiveModel = existing.into();
        model.is_active = Set(active);
        model.updated_at = Set(updated_at);

        let model = model
            .update(conn)
            .await
            .map_err(|e| InternalError::database("set_account_active", e))?;

        let event = if active {
            EventType::AccountActivated
        } else {
            EventType::AccountDeactivated
        };
        let intent = AuditIntent::new(event, EntityType::Account, &model.id).at(updated_at);

        Ok(ActionOutcome::new(model).with_audit(intent))
    }
}
