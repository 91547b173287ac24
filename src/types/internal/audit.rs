use std::fmt;

/// Event types for audit logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    AccountCreated,
    AccountActivated,
    AccountDeactivated,
    CustomerCreated,
    CustomerUpdated,
    CustomerActivated,
    CustomerDeactivated,
    VehicleRegistered,
    VehicleRemoved,
    JobCreated,
    JobStatusChanged,
    JobAssigned,
    JobDescriptionRevised,
    NoteAppended,
    InvoiceIssued,
    InvoicePaid,
}

impl EventType {
    /// String representation for database storage
    pub fn as_str(&self) -> &str {
        match self {
            Self::AccountCreated => "account_created",
            Self::AccountActivated => "account_activated",
            Self::AccountDeactivated => "account_deactivated",
            Self::CustomerCreated => "customer_created",
            Self::CustomerUpdated => "customer_updated",
            Self::CustomerActivated => "customer_activated",
            Self::CustomerDeactivated => "customer_deactivated",
            Self::VehicleRegistered => "vehicle_registered",
            Self::VehicleRemoved => "vehicle_removed",
            Self::JobCreated => "job_created",
            Self::JobStatusChanged => "job_status_changed",
            Self::JobAssigned => "job_assigned",
            Self::JobDescriptionRevised => "job_description_revised",
            Self::NoteAppended => "note_appended",
            Self::InvoiceIssued => "invoice_issued",
            Self::InvoicePaid => "invoice_paid",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of row an audit event is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Account,
    Customer,
    Vehicle,
    Job,
    Invoice,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Customer => "customer",
            Self::Vehicle => "vehicle",
            Self::Job => "job",
            Self::Invoice => "invoice",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
