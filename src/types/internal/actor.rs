use serde::Serialize;

use crate::types::db::{account, Role};

/// The authenticated account performing an operation
///
/// Resolved once per operation by the authentication layer and passed in
/// through `RequestContext`; the core never looks roles up on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub account_id: String,
    pub username: String,
    pub role: Role,
    pub active: bool,
}

impl Actor {
    pub fn is_administrator(&self) -> bool {
        self.role == Role::Administrator
    }
}

impl From<account::Model> for Actor {
    fn from(account: account::Model) -> Self {
        Self {
            account_id: account.id,
            username: account.username,
            role: account.role,
            active: account.is_active,
        }
    }
}

impl From<&account::Model> for Actor {
    fn from(account: &account::Model) -> Self {
        Self {
            account_id: account.id.clone(),
            username: account.username.clone(),
            role: account.role,
            active: account.is_active,
        }
    }
}
