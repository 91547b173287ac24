// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use sea_orm::Database;

use crate::app_data::AppData;
use crate::config::database::migrate;
use crate::coordinators::{AccountCoordinator, CustomerCoordinator, JobCoordinator, VehicleCoordinator};
use crate::types::db::{job, JobStatus, Role};
use crate::types::dto::{NewAccount, NewCustomer, NewJob, NewVehicle};
use crate::types::internal::context::RequestContext;
use crate::types::internal::Actor;

/// Fresh in-memory database with all migrations applied
pub async fn setup_test_app() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    migrate(&db).await.expect("Failed to run migrations");

    Arc::new(AppData::init(db))
}

/// Bootstrap an administrator and return a request context acting as it
pub async fn admin_context(app_data: &Arc<AppData>) -> RequestContext {
    let accounts = AccountCoordinator::new(app_data.clone());
    let admin = accounts
        .bootstrap_administrator(&RequestContext::for_system(), "admin", "hash:admin")
        .await
        .expect("Failed to bootstrap administrator");
    RequestContext::for_actor(Actor::from(admin))
}

/// Create a worker account and return a request context acting as it
pub async fn worker_context(app_data: &Arc<AppData>, admin: &RequestContext, username: &str) -> RequestContext {
    let accounts = AccountCoordinator::new(app_data.clone());
    let worker = accounts
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

/// Customer, vehicle and a `created` job, optionally assigned
pub async fn create_test_job(app_data: &Arc<AppData>, admin: &RequestContext, assignee: Option<&str>) -> job::Model {
    let customer = CustomerCoordinator::new(app_data.clone())
        .create_customer(
            admin,
            NewCustomer {
                full_name: "Dana Whitfield".to_string(),
                phone: "555-0100".to_string(),
                email: Some("dana@example.com".to_string()),
                address: None,
            },
        )
        .await
        .expect("Failed to create customer");

    let vehicle = VehicleCoordinator::new(app_data.clone())
        .register_vehicle(
            admin,
            NewVehicle {
                customer_id: customer.id,
                make: "Honda".to_string(),
                model: "Civic".to_string(),
                year: 2017,
                plate_number: "wsh-101".to_string(),
            },
        )
        .await
        .expect("Failed to register vehicle");

    JobCoordinator::new(app_data.clone())
        .create_job(
            admin,
            NewJob {
                vehicle_id: vehicle.id,
                description: "Replace front brake pads".to_string(),
                assigned_worker: assignee.map(str::to_string),
            },
        )
        .await
        .expect("Failed to create job")
}

/// Walk a job along the shortest legal path to `target` as `ctx`
pub async fn drive_job_to(app_data: &Arc<AppData>, ctx: &RequestContext, job_id: &str, target: JobStatus) -> job::Model {
    let path: &[JobStatus] = match target {
        JobStatus::Created => &[],
        JobStatus::InProgress => &[JobStatus::InProgress],
        JobStatus::WaitingForParts => &[JobStatus::InProgress, JobStatus::WaitingForParts],
        JobStatus::Completed => &[JobStatus::InProgress, JobStatus::Completed],
        JobStatus::Cancelled => &[JobStatus::Cancelled],
    };

    let jobs = JobCoordinator::new(app_data.clone());
    for status in path {
        jobs.transition(ctx, job_id, status.as_str())
            .await
            .expect("Failed to transition job");
    }
    jobs.get_job(ctx, job_id).await.expect("Failed to load job")
}
