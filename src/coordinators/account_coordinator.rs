use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::audit::AuditLogger;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::errors::internal::{AccountError, ValidationError};
use crate::errors::InternalError;
use crate::providers::{AccessPolicy, Action, Target};
use crate::stores::AccountStore;
use crate::types::db::{account, Role};
use crate::types::dto::NewAccount;
use crate::types::internal::context::RequestContext;
use crate::types::internal::Actor;

/// Staff account administration and actor resolution
pub struct AccountCoordinator {
    db: DatabaseConnection,
    access_policy: Arc<AccessPolicy>,
    audit_logger: Arc<AuditLogger>,
    account_store: Arc<AccountStore>,
}

impl AccountCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            access_policy: app_data.access_policy.clone(),
            audit_logger: app_data.audit_logger.clone(),
            account_store: app_data.account_store.clone(),
        }
    }

    /// Create the first administrator on an empty system
    ///
    /// Runs without an actor; refused once any account exists.
    pub async fn bootstrap_administrator(
        &self,
        ctx: &RequestContext,
        username: &str,
        credential_hash: &str,
    ) -> Result<account::Model, InternalError> {
        let new_account = NewAccount {
            username: username.to_string(),
            credential_hash: credential_hash.to_string(),
            role: Role::Administrator,
        }
        .validated()?;

        let txn = begin_transaction(&self.db).await?;
        if self.account_store.count(&txn).await? > 0 {
            return Err(AccountError::AlreadyBootstrapped.into());
        }

        let outcome = self.account_store.create(&txn, new_account).await?;
        let account = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(account_id = %account.id, username = %account.username, "Bootstrapped administrator account");
        Ok(account)
    }

    pub async fn create_account(
        &self,
        ctx: &RequestContext,
        new_account: NewAccount,
    ) -> Result<account::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ManageAccounts, Target::Capability)?;
        let new_account = new_account.validated()?;

        let txn = begin_transaction(&self.db).await?;
        let outcome = self.account_store.create(&txn, new_account).await?;
        let account = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(
            account_id = %account.id,
            role = %account.role,
            created_by = %actor.account_id,
            "Account created"
        );
        Ok(account)
    }

    /// Activate or deactivate an account
    ///
    /// Administrators cannot deactivate themselves, so at least one active
    /// administrator always remains reachable.
    ///
    /// # Authorization
    /// manage-accounts
    ///
    /// # Errors
    /// * `ValidationError::SelfDeactivation` - actor tried to deactivate itself
    /// * `AccountError::NotFound` - unknown account
    pub async fn set_account_active(
        &self,
        ctx: &RequestContext,
        account_id: &str,
        active: bool,
    ) -> Result<account::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ManageAccounts, Target::Capability)?;
        if !active && actor.account_id == account_id {
            return Err(ValidationError::SelfDeactivation.into());
        }

        let txn = begin_transaction(&self.db).await?;
        let existing = self.account_store.get_by_id(&txn, account_id).await?;
        let outcome = self.account_store.set_active(&txn, existing, active).await?;
        let account = self.audit_logger.persist(&txn, ctx, outcome).await?;
        commit_transaction(txn).await?;

        tracing::info!(account_id = %account.id, active, changed_by = %actor.account_id, "Account active flag set");
        Ok(account)
    }

    pub async fn get_account(&self, ctx: &RequestContext, account_id: &str) -> Result<account::Model, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ManageAccounts, Target::Capability)?;
        self.account_store.get_by_id(&self.db, account_id).await
    }

    pub async fn list_accounts(&self, ctx: &RequestContext) -> Result<Vec<account::Model>, InternalError> {
        let actor = ctx.actor()?;
        self.access_policy.require(actor, Action::ManageAccounts, Target::Capability)?;
        self.account_store.list(&self.db).await
    }

    /// Resolve a username into the actor for a request
    ///
    /// Credential verification happens before this call, outside the core.
    ///
    /// # Errors
    /// * `AccountError::NotFound` - no such username
    /// * `AccountError::Inactive` - the account is deactivated
    pub async fn authenticate(&self, username: &str) -> Result<Actor, InternalError> {
        let account = self
            .account_store
            .find_by_username(&self.db, username.trim())
            .await?
            .ok_or_else(|| AccountError::NotFound(username.to_string()))?;

        if !account.is_active {
            tracing::warn!(account_id = %account.id, "Deactivated account attempted to authenticate");
            return Err(AccountError::Inactive(account.username).into());
        }

        Ok(Actor::from(account))
    }
}
