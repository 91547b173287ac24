use crate::errors::internal::JobError;
use crate::types::db::JobStatus;

/// Statuses reachable in one step from `from`
pub fn allowed_targets(from: JobStatus) -> &'static [JobStatus] {
    match from {
        JobStatus::Created => &[JobStatus::InProgress, JobStatus::Cancelled],
        JobStatus::InProgress => &[
            JobStatus::WaitingForParts,
            JobStatus::Completed,
            JobStatus::Cancelled,
        ],
        JobStatus::WaitingForParts => &[
            JobStatus::InProgress,
            JobStatus::Completed,
            JobStatus::Cancelled,
        ],
        JobStatus::Completed | JobStatus::Cancelled => &[],
    }
}

/// Reject any change to a job that has reached a terminal status
pub fn ensure_open(job_id: &str, status: JobStatus) -> Result<(), JobError> {
    if status.is_terminal() {
        return Err(JobError::TerminalState {
            job_id: job_id.to_string(),
            status,
        });
    }
    Ok(())
}

/// Validate a single status change against the transition table
///
/// A terminal source is always `TerminalState`, whatever the target; any
/// other edge missing from the table is `InvalidTransition`.
pub fn check_transition(job_id: &str, from: JobStatus, to: JobStatus) -> Result<(), JobError> {
    ensure_open(job_id, from)?;

    if allowed_targets(from).contains(&to) {
        Ok(())
    } else {
        Err(JobError::InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn test_transition_table() {
        use JobStatus::*;
        let expected = [
            (Created, InProgress, true),
            (Created, WaitingForParts, false),
            (Created, Completed, false),
            (Created, Cancelled, true),
            (InProgress, WaitingForParts, true),
            (InProgress, Completed, true),
            (InProgress, Cancelled, true),
            (InProgress, Created, false),
            (WaitingForParts, InProgress, true),
            (WaitingForParts, Completed, true),
            (WaitingForParts, Cancelled, true),
            (WaitingForParts, Created, false),
        ];
        for (from, to, ok) in expected {
            assert_eq!(check_transition("job", from, to).is_ok(), ok, "{from} -> {to}");
        }
    }

    #[test]
    fn test_no_self_transitions() {
        for status in JobStatus::iter() {
            assert!(check_transition("job", status, status).is_err());
        }
    }

    #[test]
    fn test_terminal_states_reject_every_target() {
        for from in [JobStatus::Completed, JobStatus::Cancelled] {
            assert!(allowed_targets(from).is_empty());
            for to in JobStatus::iter() {
                assert!(matches!(
                    check_transition("job-1", from, to),
                    Err(JobError::TerminalState { status, .. }) if status == from
                ));
            }
        }
    }

    #[test]
    fn test_cancelled_reachable_from_every_open_state() {
        for from in JobStatus::iter().filter(|s| !s.is_terminal()) {
            assert!(allowed_targets(from).contains(&JobStatus::Cancelled));
        }
    }
}
