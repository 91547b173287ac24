// Common test utilities for integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::Database;
use uuid::Uuid;

use workshop_backend::config::database::migrate;
use workshop_backend::coordinators::AccountCoordinator;
use workshop_backend::types::db::Role;
use workshop_backend::types::dto::NewAccount;
use workshop_backend::types::internal::context::RequestContext;
use workshop_backend::types::internal::Actor;
use workshop_backend::AppData;

/// Creates an in-memory database with migrations applied
pub async fn setup_test_app() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    migrate(&db).await.expect("Failed to run migrations");

    Arc::new(AppData::init(db))
}

pub async fn bootstrap_admin(app_data: &Arc<AppData>) -> RequestContext {
    let admin = AccountCoordinator::new(app_data.clone())
        .bootstrap_administrator(&RequestContext::for_system(), "admin", "hash:admin")
        .await
        .expect("Failed to bootstrap administrator");
    RequestContext::for_actor(Actor::from(admin))
}

pub async fn create_worker(app_data: &Arc<AppData>, admin: &RequestContext, username: &str) -> RequestContext {
    let worker = AccountCoordinator::new(app_data.clone())
        .create_account(
            admin,
            NewAccount {
                username: username.to_string(),
                credential_hash: format!("hash:{username}"),
                role: Role::Worker,
            },
        )
        .await
        .expect("Failed to create worker");
    RequestContext::for_actor(Actor::from(worker))
}

/// Database file in the temp directory, removed on drop
pub struct TempDatabase {
    pub path: PathBuf,
}

impl TempDatabase {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("workshop-test-{}.db", Uuid::now_v7()));
        Self { path }
    }

    pub fn url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path.display())
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
