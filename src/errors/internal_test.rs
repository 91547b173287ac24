#[cfg(test)]
mod tests {
    use crate::errors::internal::{
        AccessError, AccountError, CustomerError, DatabaseError, InternalError, InvoiceError,
        JobError, ValidationError, VehicleError,
    };
    use crate::errors::ErrorKind;
    use crate::providers::access_policy::{Action, DenyReason};
    use crate::types::db::JobStatus;
    use sea_orm::{DbErr, RuntimeErr};

    #[test]
    fn test_database_error_includes_operation() {
        let db_err = DbErr::RecordNotFound("test record".to_string());
        let error = InternalError::database("create_job", db_err);

        let error_string = error.to_string();
        assert!(error_string.contains("create_job"));
        assert!(error_string.contains("Database error"));
        assert_eq!(error.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_parse_error_includes_value_type() {
        let error = InternalError::parse("JobStatus", "unknown variant");

        let error_string = error.to_string();
        assert!(error_string.contains("JobStatus"));
        assert!(error_string.contains("unknown variant"));
        assert_eq!(error.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_locked_database_is_transient() {
        let db_err = DbErr::Exec(RuntimeErr::Internal("database is locked".to_string()));
        let error = InternalError::database("update_job_status", db_err);
        assert_eq!(error.kind(), ErrorKind::Transient);
        assert!(error.is_transient());
    }

    #[test]
    fn test_connection_loss_is_transient() {
        let error = InternalError::from(DatabaseError::TransactionBegin {
            source: DbErr::Conn(RuntimeErr::Internal("connection reset".to_string())),
        });
        assert_eq!(error.kind(), ErrorKind::Transient);
    }

    #[test]
    fn test_validation_messages() {
        let error = ValidationError::MissingField { field: "phone" };
        assert_eq!(error.to_string(), "Missing required field: phone");

        let error = ValidationError::invalid_enum("status", "paused");
        assert_eq!(error.to_string(), "Invalid value for status: paused");
        assert_eq!(InternalError::from(error).kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_hidden_maps_to_not_found() {
        let error = InternalError::from(AccessError::Hidden {
            entity: "Invoice",
            id: "inv-1".to_string(),
        });
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.to_string(), "Invoice not found: inv-1");
    }

    #[test]
    fn test_forbidden_maps_to_authorization() {
        let error = InternalError::from(AccessError::Forbidden {
            action: Action::UpdateJobStatus,
            reason: DenyReason::NotAssigned,
        });
        assert_eq!(error.kind(), ErrorKind::Authorization);
        assert_eq!(
            InternalError::from(AccessError::Unauthenticated).kind(),
            ErrorKind::Authorization
        );
    }

    #[test]
    fn test_job_error_kinds() {
        let terminal = InternalError::from(JobError::TerminalState {
            job_id: "job-1".to_string(),
            status: JobStatus::Completed,
        });
        assert_eq!(terminal.kind(), ErrorKind::Conflict);
        assert_eq!(
            terminal.to_string(),
            "Job job-1 is completed; no further changes are allowed"
        );

        let invalid = InternalError::from(JobError::InvalidTransition {
            from: JobStatus::Created,
            to: JobStatus::Completed,
        });
        assert_eq!(invalid.kind(), ErrorKind::Validation);

        let raced = InternalError::from(JobError::ConcurrentModification {
            job_id: "job-1".to_string(),
        });
        assert_eq!(raced.kind(), ErrorKind::Transient);
    }

    #[test]
    fn test_invoice_error_kinds() {
        let duplicate = InternalError::from(InvoiceError::AlreadyIssued {
            job_id: "job-1".to_string(),
        });
        assert_eq!(duplicate.kind(), ErrorKind::Conflict);

        let not_ready = InternalError::from(InvoiceError::JobNotCompleted {
            job_id: "job-1".to_string(),
            status: JobStatus::InProgress,
        });
        assert_eq!(not_ready.kind(), ErrorKind::Precondition);
    }

    #[test]
    fn test_entity_error_kinds() {
        assert_eq!(
            InternalError::from(AccountError::DuplicateUsername {
                username: "sam".to_string()
            })
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            InternalError::from(CustomerError::Inactive("c-1".to_string())).kind(),
            ErrorKind::Precondition
        );
        assert_eq!(
            InternalError::from(VehicleError::HasJobs {
                vehicle_id: "v-1".to_string(),
                job_count: 2,
            })
            .kind(),
            ErrorKind::Conflict
        );
    }
}
