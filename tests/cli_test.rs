mod common;

use clap::Parser;
use serde_json::Value;

use common::TempDatabase;

use workshop_backend::cli::{execute_command, exit_code, Cli};
use workshop_backend::config::WorkshopSettings;
use workshop_backend::errors::{ErrorKind, InternalError};

fn settings_for(db: &TempDatabase) -> WorkshopSettings {
    WorkshopSettings {
        database_url: db.url(),
        ..WorkshopSettings::default()
    }
}

async fn run(settings: &WorkshopSettings, args: &[&str]) -> Result<Value, InternalError> {
    let mut argv = vec!["workshop"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    execute_command(cli, settings).await
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("result should carry an id").to_string()
}

#[tokio::test]
async fn test_cli_end_to_end() {
    let db = TempDatabase::new();
    let settings = settings_for(&db);

    let migrated = run(&settings, &["migrate"]).await.unwrap();
    assert_eq!(migrated["migrated"], true);

    let admin = run(&settings, &["bootstrap", "--username", "boss", "--credential-hash", "h0"])
        .await
        .unwrap();
    assert_eq!(admin["role"], "administrator");
    assert!(admin.get("credential_hash").is_none());

    let err = run(&settings, &["bootstrap", "--username", "again", "--credential-hash", "h1"])
        .await
        .unwrap_err();
    assert_eq!(exit_code(err.kind()), 5);

    let worker = run(
        &settings,
        &["--actor", "boss", "account", "create", "--username", "kim", "--credential-hash", "h2"],
    )
    .await
    .unwrap();
    assert_eq!(worker["role"], "worker");

    let customer = run(
        &settings,
        &["--actor", "boss", "customer", "create", "--full-name", "Lee Chen", "--phone", "555-0110"],
    )
    .await
    .unwrap();
    let vehicle = run(
        &settings,
        &[
            "--actor",
            "boss",
            "vehicle",
            "register",
            "--customer-id",
            &id_of(&customer),
            "--make",
            "Mazda",
            "--model",
            "3",
            "--year",
            "2015",
            "--plate-number",
            "lee-001",
        ],
    )
    .await
    .unwrap();
    let job = run(
        &settings,
        &[
            "--actor",
            "boss",
            "job",
            "create",
            "--vehicle-id",
            &id_of(&vehicle),
            "--description",
            "Clutch slipping",
            "--assign-to",
            &id_of(&worker),
        ],
    )
    .await
    .unwrap();
    let job_id = id_of(&job);

    let moved = run(&settings, &["--actor", "kim", "job", "transition", &job_id, "in_progress"])
        .await
        .unwrap();
    assert_eq!(moved["status"], "in_progress");

    let err = run(&settings, &["--actor", "kim", "job", "transition", &job_id, "created"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(exit_code(err.kind()), 2);

    let err = run(&settings, &["--actor", "kim", "job", "transition", &job_id, "teleported"])
        .await
        .unwrap_err();
    assert_eq!(exit_code(err.kind()), 2);

    run(&settings, &["--actor", "kim", "job", "transition", &job_id, "completed"])
        .await
        .unwrap();

    let err = run(&settings, &["--actor", "kim", "invoice", "issue", &job_id, "300.00"])
        .await
        .unwrap_err();
    assert_eq!(exit_code(err.kind()), 3);

    let invoice = run(&settings, &["--actor", "boss", "invoice", "issue", &job_id, "300.00"])
        .await
        .unwrap();
    assert_eq!(invoice["total_cents"], 30_000);

    let err = run(&settings, &["--actor", "kim", "invoice", "show", &job_id, "--job"])
        .await
        .unwrap_err();
    assert_eq!(exit_code(err.kind()), 4);

    let unpaid = run(&settings, &["--actor", "boss", "invoice", "list", "--unpaid-only"])
        .await
        .unwrap();
    assert_eq!(unpaid.as_array().map(Vec::len), Some(1));

    let paid = run(&settings, &["--actor", "boss", "invoice", "pay", &id_of(&invoice)])
        .await
        .unwrap();
    assert_eq!(paid["is_paid"], true);

    let history = run(&settings, &["--actor", "boss", "job", "history", &job_id]).await.unwrap();
    assert_eq!(history.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_cli_requires_known_active_actor() {
    let db = TempDatabase::new();
    let settings = settings_for(&db);

    let err = run(&settings, &["customer", "list"]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    run(&settings, &["bootstrap", "--username", "boss", "--credential-hash", "h0"])
        .await
        .unwrap();
    let worker = run(
        &settings,
        &["--actor", "boss", "account", "create", "--username", "kim", "--credential-hash", "h2"],
    )
    .await
    .unwrap();

    let err = run(&settings, &["--actor", "nobody", "customer", "list"]).await.unwrap_err();
    assert_eq!(exit_code(err.kind()), 4);

    let deactivated = run(&settings, &["--actor", "boss", "account", "deactivate", &id_of(&worker)])
        .await
        .unwrap();
    assert_eq!(deactivated["is_active"], false);

    let err = run(&settings, &["--actor", "kim", "job", "mine"]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
}
