use thiserror::Error;

use crate::types::db::JobStatus;

#[derive(Error, Debug)]
pub enum JobError {
    #[error("Job not found: {0}")]
    NotFound(String),

    #[error("Job {job_id} is {status}; no further changes are allowed")]
    TerminalState { job_id: String, status: JobStatus },

    #[error("Job cannot move from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },

    #[error("Job {job_id} was modified concurrently")]
    ConcurrentModification { job_id: String },

    #[error("Account {0} is deactivated and cannot be assigned jobs")]
    WorkerInactive(String),
}
