use thiserror::Error;

use crate::types::db::JobStatus;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Invoice not found: {0}")]
    NotFound(String),

    #[error("No invoice for job {0}")]
    NoInvoiceForJob(String),

    #[error("Job {job_id} already has an invoice")]
    AlreadyIssued { job_id: String },

    #[error("Job {job_id} is {status}; only completed jobs can be invoiced")]
    JobNotCompleted { job_id: String, status: JobStatus },
}
