use crate::coordinators::{AccountCoordinator, JobCoordinator};
use crate::errors::internal::{AccessError, JobError};
use crate::errors::{ErrorKind, InternalError};
use crate::providers::DenyReason;
use crate::test::utils::{admin_context, create_test_job, drive_job_to, setup_test_app, worker_context};
use crate::types::db::JobStatus;

#[tokio::test]
async fn test_assigned_worker_walks_job_to_completion() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let w1 = worker_context(&app_data, &admin, "w1").await;
    let w1_id = w1.actor().unwrap().account_id.clone();
    let jobs = JobCoordinator::new(app_data.clone());

    let job = create_test_job(&app_data, &admin, Some(&w1_id)).await;
    assert_eq!(job.status, JobStatus::Created);

    let mut last_updated = job.updated_at;
    for status in ["in_progress", "waiting_for_parts", "in_progress", "completed"] {
        let updated = jobs.transition(&w1, &job.id, status).await.unwrap();
        assert_eq!(updated.status.as_str(), status);
        assert!(updated.updated_at > last_updated);
        last_updated = updated.updated_at;
    }

    let stored = jobs.get_job(&w1, &job.id).await.unwrap();
    assert_eq!(stored.status, JobStatus::Completed);
    assert_eq!(stored.updated_at, last_updated);
}

#[tokio::test]
async fn test_unassigned_worker_cannot_transition() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let w1 = worker_context(&app_data, &admin, "w1").await;
    let w2 = worker_context(&app_data, &admin, "w2").await;
    let jobs = JobCoordinator::new(app_data.clone());

    let job = create_test_job(&app_data, &admin, Some(&w1.actor().unwrap().account_id)).await;
    drive_job_to(&app_data, &w1, &job.id, JobStatus::InProgress).await;

    let err = jobs.transition(&w2, &job.id, "completed").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert!(matches!(
        err,
        InternalError::Access(AccessError::Forbidden { reason: DenyReason::NotAssigned, .. })
    ));

    let stored = jobs.get_job(&admin, &job.id).await.unwrap();
    assert_eq!(stored.status, JobStatus::InProgress);
}

#[tokio::test]
async fn test_cancelled_job_rejects_every_transition_for_every_role() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let w1 = worker_context(&app_data, &admin, "w1").await;
    let w2 = worker_context(&app_data, &admin, "w2").await;
    let jobs = JobCoordinator::new(app_data.clone());

    let job = create_test_job(&app_data, &admin, Some(&w1.actor().unwrap().account_id)).await;
    drive_job_to(&app_data, &admin, &job.id, JobStatus::Cancelled).await;

    for ctx in [&admin, &w1, &w2] {
        for status in ["created", "in_progress", "waiting_for_parts", "completed", "cancelled"] {
            let err = jobs.transition(ctx, &job.id, status).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Conflict, "{status}");
            assert!(matches!(
                err,
                InternalError::Job(JobError::TerminalState { status: JobStatus::Cancelled, .. })
            ));
        }
    }
}

#[tokio::test]
async fn test_completed_job_is_terminal() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let jobs = JobCoordinator::new(app_data.clone());

    let job = create_test_job(&app_data, &admin, None).await;
    drive_job_to(&app_data, &admin, &job.id, JobStatus::Completed).await;

    let err = jobs.transition(&admin, &job.id, "in_progress").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_edge_outside_table_is_validation_error() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let jobs = JobCoordinator::new(app_data.clone());
    let job = create_test_job(&app_data, &admin, None).await;

    let err = jobs.transition(&admin, &job.id, "completed").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(
        err,
        InternalError::Job(JobError::InvalidTransition {
            from: JobStatus::Created,
            to: JobStatus::Completed
        })
    ));

    let err = jobs.transition(&admin, &job.id, "paused").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let stored = jobs.get_job(&admin, &job.id).await.unwrap();
    assert_eq!(stored.status, JobStatus::Created);
    assert_eq!(stored.updated_at, job.updated_at);
}

#[tokio::test]
async fn test_unknown_job_is_not_found() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let jobs = JobCoordinator::new(app_data.clone());

    let err = jobs.transition(&admin, "missing", "in_progress").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_deactivated_actor_is_denied_before_lookup() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let w1 = worker_context(&app_data, &admin, "w1").await;
    let w1_id = w1.actor().unwrap().account_id.clone();
    let job = create_test_job(&app_data, &admin, Some(&w1_id)).await;

    AccountCoordinator::new(app_data.clone())
        .set_account_active(&admin, &w1_id, false)
        .await
        .unwrap();

    // The stored account no longer resolves into an actor
    let stale = AccountCoordinator::new(app_data.clone()).authenticate("w1").await.unwrap_err();
    assert_eq!(stale.kind(), ErrorKind::Authorization);

    // A context resolved before the deactivation, refreshed with the new flag
    let mut inactive = w1.clone();
    inactive.actor.as_mut().unwrap().active = false;
    let jobs = JobCoordinator::new(app_data.clone());
    let err = jobs.transition(&inactive, "missing", "in_progress").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    let err = jobs.transition(&inactive, &job.id, "in_progress").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
}

#[tokio::test]
async fn test_assign_and_clear_worker() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let w1 = worker_context(&app_data, &admin, "w1").await;
    let w1_id = w1.actor().unwrap().account_id.clone();
    let jobs = JobCoordinator::new(app_data.clone());
    let job = create_test_job(&app_data, &admin, None).await;

    let assigned = jobs.assign(&admin, &job.id, Some(&w1_id)).await.unwrap();
    assert_eq!(assigned.assigned_worker.as_deref(), Some(w1_id.as_str()));
    assert_eq!(assigned.status, JobStatus::Created);
    assert!(assigned.updated_at > job.updated_at);

    let mine = jobs.list_jobs_for_worker(&w1, None).await.unwrap();
    assert_eq!(mine.len(), 1);

    let cleared = jobs.assign(&admin, &job.id, None).await.unwrap();
    assert_eq!(cleared.assigned_worker, None);
    assert!(cleared.updated_at > assigned.updated_at);
    assert!(jobs.list_jobs_for_worker(&w1, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_assign_rules() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let w1 = worker_context(&app_data, &admin, "w1").await;
    let w2 = worker_context(&app_data, &admin, "w2").await;
    let w2_id = w2.actor().unwrap().account_id.clone();
    let jobs = JobCoordinator::new(app_data.clone());
    let job = create_test_job(&app_data, &admin, None).await;

    // Workers cannot assign
    let err = jobs.assign(&w1, &job.id, Some(&w2_id)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    // Unknown worker
    let err = jobs.assign(&admin, &job.id, Some("nobody")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // Deactivated worker
    AccountCoordinator::new(app_data.clone())
        .set_account_active(&admin, &w2_id, false)
        .await
        .unwrap();
    let err = jobs.assign(&admin, &job.id, Some(&w2_id)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(matches!(err, InternalError::Job(JobError::WorkerInactive(_))));

    // Terminal job
    drive_job_to(&app_data, &admin, &job.id, JobStatus::Cancelled).await;
    let w1_id = w1.actor().unwrap().account_id.clone();
    let err = jobs.assign(&admin, &job.id, Some(&w1_id)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_worker_supplying_assignee_is_forbidden() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let w1 = worker_context(&app_data, &admin, "w1").await;
    let w1_id = w1.actor().unwrap().account_id.clone();
    let job = create_test_job(&app_data, &admin, None).await;
    let jobs = JobCoordinator::new(app_data.clone());

    let err = jobs
        .create_job(
            &w1,
            crate::types::dto::NewJob {
                vehicle_id: job.vehicle_id.clone(),
                description: "Oil change".to_string(),
                assigned_worker: Some(w1_id),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let created = jobs
        .create_job(
            &w1,
            crate::types::dto::NewJob {
                vehicle_id: job.vehicle_id.clone(),
                description: "Oil change".to_string(),
                assigned_worker: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.status, JobStatus::Created);
}

#[tokio::test]
async fn test_worker_scoping() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let w1 = worker_context(&app_data, &admin, "w1").await;
    let w2 = worker_context(&app_data, &admin, "w2").await;
    let w1_id = w1.actor().unwrap().account_id.clone();
    let w2_id = w2.actor().unwrap().account_id.clone();
    let jobs = JobCoordinator::new(app_data.clone());

    create_test_job(&app_data, &admin, Some(&w1_id)).await;
    create_test_job(&app_data, &admin, Some(&w1_id)).await;
    create_test_job(&app_data, &admin, Some(&w2_id)).await;
    create_test_job(&app_data, &admin, None).await;

    let mine = jobs.list_jobs_for_worker(&w1, None).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|j| j.assigned_worker.as_deref() == Some(w1_id.as_str())));

    // Another worker's list and the full list need view-all
    let err = jobs.list_jobs_for_worker(&w1, Some(&w2_id)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    let err = jobs.list_all_jobs(&w1, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    assert_eq!(jobs.list_jobs_for_worker(&admin, Some(&w2_id)).await.unwrap().len(), 1);
    assert_eq!(jobs.list_all_jobs(&admin, None).await.unwrap().len(), 4);
    assert_eq!(jobs.list_all_jobs(&admin, Some("created")).await.unwrap().len(), 4);
    assert!(jobs.list_all_jobs(&admin, Some("completed")).await.unwrap().is_empty());
    assert_eq!(
        jobs.list_all_jobs(&admin, Some("done")).await.unwrap_err().kind(),
        ErrorKind::Validation
    );
}

#[tokio::test]
async fn test_revise_description() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let w1 = worker_context(&app_data, &admin, "w1").await;
    let w2 = worker_context(&app_data, &admin, "w2").await;
    let jobs = JobCoordinator::new(app_data.clone());
    let job = create_test_job(&app_data, &admin, Some(&w1.actor().unwrap().account_id)).await;

    let revised = jobs
        .revise_description(&w1, &job.id, "  Replace pads and rotors ")
        .await
        .unwrap();
    assert_eq!(revised.description, "Replace pads and rotors");
    assert!(revised.updated_at > job.updated_at);

    let err = jobs.revise_description(&w2, &job.id, "Nope").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let err = jobs.revise_description(&w1, &job.id, "   ").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    drive_job_to(&app_data, &w1, &job.id, JobStatus::Completed).await;
    let err = jobs.revise_description(&w1, &job.id, "Too late").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_job_history_records_each_mutation() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let w1 = worker_context(&app_data, &admin, "w1").await;
    let jobs = JobCoordinator::new(app_data.clone());
    let job = create_test_job(&app_data, &admin, None).await;

    jobs.assign(&admin, &job.id, Some(&w1.actor().unwrap().account_id)).await.unwrap();
    drive_job_to(&app_data, &w1, &job.id, JobStatus::Completed).await;

    let history = jobs.job_history(&admin, &job.id).await.unwrap();
    let events: Vec<&str> = history.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(
        events,
        vec!["job_created", "job_assigned", "job_status_changed", "job_status_changed"]
    );
    assert!(history.windows(2).all(|w| w[0].occurred_at <= w[1].occurred_at));
    assert_eq!(history[2].actor_id, w1.actor().unwrap().account_id);
    assert!(history[3].data.contains("\"to\":\"completed\""));

    let err = jobs.job_history(&w1, &job.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
}

#[tokio::test]
async fn test_create_job_requires_active_customer() {
    let app_data = setup_test_app().await;
    let admin = admin_context(&app_data).await;
    let job = create_test_job(&app_data, &admin, None).await;
    let vehicle = crate::coordinators::VehicleCoordinator::new(app_data.clone())
        .get_vehicle(&admin, &job.vehicle_id)
        .await
        .unwrap();

    crate::coordinators::CustomerCoordinator::new(app_data.clone())
        .deactivate_customer(&admin, &vehicle.customer_id)
        .await
        .unwrap();

    let err = JobCoordinator::new(app_data.clone())
        .create_job(
            &admin,
            crate::types::dto::NewJob {
                vehicle_id: vehicle.id,
                description: "Alignment".to_string(),
                assigned_worker: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);
}
