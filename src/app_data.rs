use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::audit::AuditLogger;
use crate::providers::AccessPolicy;
use crate::stores::{
    AccountStore, AuditStore, CustomerStore, InvoiceStore, JobStore, NoteStore, VehicleStore,
};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(db)
///   ↓ creates once
///   ├─ db (DatabaseConnection)
///   ├─ access_policy (Arc<AccessPolicy>)
///   ├─ audit_store / audit_logger
///   └─ account, customer, vehicle, job, note, invoice stores
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   ├─ JobCoordinator::new(app_data)
///   └─ InvoiceCoordinator::new(app_data) ...
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub access_policy: Arc<AccessPolicy>,
    pub audit_store: Arc<AuditStore>,
    pub audit_logger: Arc<AuditLogger>,
    pub account_store: Arc<AccountStore>,
    pub customer_store: Arc<CustomerStore>,
    pub vehicle_store: Arc<VehicleStore>,
    pub job_store: Arc<JobStore>,
    pub note_store: Arc<NoteStore>,
    pub invoice_store: Arc<InvoiceStore>,
}

impl AppData {
    /// Build all stores on top of a connected, migrated database
    pub fn init(db: DatabaseConnection) -> Self {
        tracing::debug!("Creating stores...");
        let audit_store = Arc::new(AuditStore::new());
        let audit_logger = Arc::new(AuditLogger::new(audit_store.clone()));

        Self {
            db,
            access_policy: Arc::new(AccessPolicy::new()),
            audit_store,
            audit_logger,
            account_store: Arc::new(AccountStore::new()),
            customer_store: Arc::new(CustomerStore::new()),
            vehicle_store: Arc::new(VehicleStore::new()),
            job_store: Arc::new(JobStore::new()),
            note_store: Arc::new(NoteStore::new()),
            invoice_store: Arc::new(InvoiceStore::new()),
        }
    }
}
