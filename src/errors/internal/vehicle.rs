use thiserror::Error;

#[derive(Error, Debug)]
pub enum VehicleError {
    #[error("Vehicle not found: {0}")]
    NotFound(String),

    #[error("Vehicle {vehicle_id} has {job_count} job(s) and cannot be removed")]
    HasJobs { vehicle_id: String, job_count: u64 },
}
