use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use super::output::to_json;
use super::{
    migrate, AccountCommands, Cli, Commands, CustomerCommands, InvoiceCommands, JobCommands, StaffCommands,
    VehicleCommands,
};
use crate::app_data::AppData;
use crate::config::database::{connect, migrate as apply_migrations};
use crate::config::WorkshopSettings;
use crate::coordinators::{
    with_transient_retry, AccountCoordinator, CustomerCoordinator, InvoiceCoordinator, JobCoordinator,
    NoteCoordinator, VehicleCoordinator,
};
use crate::errors::internal::AccessError;
use crate::errors::InternalError;
use crate::types::db::Role;
use crate::types::dto::{CustomerUpdate, NewAccount, NewCustomer, NewJob, NewVehicle};
use crate::types::internal::context::RequestContext;

/// Execute CLI command
///
/// Routes the parsed command to its coordinator and returns the result as
/// JSON. Each coordinator call is retried on transient failures using the
/// configured limit and backoff.
///
/// # Errors
/// Any `InternalError` from the operation, after retries are exhausted
pub async fn execute_command(cli: Cli, settings: &WorkshopSettings) -> Result<Value, InternalError> {
    let Cli { actor, command } = cli;
    let runner = Runner { settings };

    match command {
        Commands::Migrate => {
            migrate::run_migrations(settings).await?;
            Ok(json!({ "migrated": true }))
        }
        Commands::Bootstrap(args) => {
            let app_data = open_app_data(settings).await?;
            let accounts = AccountCoordinator::new(app_data);
            let accounts = &accounts;
            let ctx = RequestContext::for_system();
            let (ctx, username, hash) = (&ctx, args.username.as_str(), args.credential_hash.as_str());
            runner
                .run(move || accounts.bootstrap_administrator(ctx, username, hash))
                .await
        }
        Commands::Staff(cmd) => {
            let app_data = open_app_data(settings).await?;
            let username = actor.ok_or(AccessError::Unauthenticated)?;
            let ctx = resolve_context(settings, app_data.clone(), &username).await?;

            match cmd {
                StaffCommands::Account(cmd) => account_command(&runner, app_data, &ctx, cmd).await,
                StaffCommands::Customer(cmd) => customer_command(&runner, app_data, &ctx, cmd).await,
                StaffCommands::Vehicle(cmd) => vehicle_command(&runner, app_data, &ctx, cmd).await,
                StaffCommands::Job(cmd) => job_command(&runner, app_data, &ctx, cmd).await,
                StaffCommands::Invoice(cmd) => invoice_command(&runner, app_data, &ctx, cmd).await,
            }
        }
    }
}

/// Connect, bring the schema up to date and build the shared stores
async fn open_app_data(settings: &WorkshopSettings) -> Result<Arc<AppData>, InternalError> {
    let db = connect(&settings.database_url).await?;
    apply_migrations(&db).await?;
    Ok(Arc::new(AppData::init(db)))
}

async fn resolve_context(
    settings: &WorkshopSettings,
    app_data: Arc<AppData>,
    username: &str,
) -> Result<RequestContext, InternalError> {
    let accounts = AccountCoordinator::new(app_data);
    let accounts = &accounts;
    let actor = with_transient_retry(settings.transient_retry_limit, settings.transient_retry_backoff, move || {
        accounts.authenticate(username)
    })
    .await?;

    tracing::debug!(account_id = %actor.account_id, role = %actor.role, "Resolved CLI actor");
    Ok(RequestContext::for_cli(actor))
}

struct Runner<'a> {
    settings: &'a WorkshopSettings,
}

impl Runner<'_> {
    async fn run<T, F, Fut>(&self, op: F) -> Result<Value, InternalError>
    where
        T: Serialize,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, InternalError>>,
    {
        let result = with_transient_retry(
            self.settings.transient_retry_limit,
            self.settings.transient_retry_backoff,
            op,
        )
        .await?;
        to_json(&result)
    }
}

async fn account_command(
    runner: &Runner<'_>,
    app_data: Arc<AppData>,
    ctx: &RequestContext,
    cmd: AccountCommands,
) -> Result<Value, InternalError> {
    let accounts = AccountCoordinator::new(app_data);
    let accounts = &accounts;
    match cmd {
        AccountCommands::Create {
            username,
            credential_hash,
            role,
        } => {
            let new_account = NewAccount {
                username,
                credential_hash,
                role: role.parse::<Role>()?,
            };
            runner.run(move || accounts.create_account(ctx, new_account.clone())).await
        }
        AccountCommands::Activate { account_id } => {
            let id = account_id.as_str();
            runner.run(move || accounts.set_account_active(ctx, id, true)).await
        }
        AccountCommands::Deactivate { account_id } => {
            let id = account_id.as_str();
            runner.run(move || accounts.set_account_active(ctx, id, false)).await
        }
        AccountCommands::Show { account_id } => {
            let id = account_id.as_str();
            runner.run(move || accounts.get_account(ctx, id)).await
        }
        AccountCommands::List => runner.run(move || accounts.list_accounts(ctx)).await,
    }
}

async fn customer_command(
    runner: &Runner<'_>,
    app_data: Arc<AppData>,
    ctx: &RequestContext,
    cmd: CustomerCommands,
) -> Result<Value, InternalError> {
    let customers = CustomerCoordinator::new(app_data);
    let customers = &customers;
    match cmd {
        CustomerCommands::Create {
            full_name,
            phone,
            email,
            address,
        } => {
            let new_customer = NewCustomer {
                full_name,
                phone,
                email,
                address,
            };
            runner.run(move || customers.create_customer(ctx, new_customer.clone())).await
        }
        CustomerCommands::Update {
            customer_id,
            full_name,
            phone,
            email,
            address,
        } => {
            let changes = CustomerUpdate {
                full_name,
                phone,
                email,
                address,
            };
            let id = customer_id.as_str();
            runner.run(move || customers.update_customer(ctx, id, changes.clone())).await
        }
        CustomerCommands::Activate { customer_id } => {
            let id = customer_id.as_str();
            runner.run(move || customers.reactivate_customer(ctx, id)).await
        }
        CustomerCommands::Deactivate { customer_id } => {
            let id = customer_id.as_str();
            runner.run(move || customers.deactivate_customer(ctx, id)).await
        }
        CustomerCommands::Show { customer_id } => {
            let id = customer_id.as_str();
            runner.run(move || customers.get_customer(ctx, id)).await
        }
        CustomerCommands::List { active_only } => {
            runner.run(move || customers.list_customers(ctx, active_only)).await
        }
    }
}

async fn vehicle_command(
    runner: &Runner<'_>,
    app_data: Arc<AppData>,
    ctx: &RequestContext,
    cmd: VehicleCommands,
) -> Result<Value, InternalError> {
    let vehicles = VehicleCoordinator::new(app_data);
    let vehicles = &vehicles;
    match cmd {
        VehicleCommands::Register {
            customer_id,
            make,
            model,
            year,
            plate_number,
        } => {
            let new_vehicle = NewVehicle {
                customer_id,
                make,
                model,
                year,
                plate_number,
            };
            runner.run(move || vehicles.register_vehicle(ctx, new_vehicle.clone())).await
        }
        VehicleCommands::Show { vehicle_id } => {
            let id = vehicle_id.as_str();
            runner.run(move || vehicles.get_vehicle(ctx, id)).await
        }
        VehicleCommands::Remove { vehicle_id } => {
            let id = vehicle_id.as_str();
            runner.run(move || vehicles.remove_vehicle(ctx, id)).await
        }
        VehicleCommands::List { customer_id: Some(customer_id) } => {
            let id = customer_id.as_str();
            runner.run(move || vehicles.list_vehicles_for_customer(ctx, id)).await
        }
        VehicleCommands::List { customer_id: None } => runner.run(move || vehicles.list_all_vehicles(ctx)).await,
    }
}

async fn job_command(
    runner: &Runner<'_>,
    app_data: Arc<AppData>,
    ctx: &RequestContext,
    cmd: JobCommands,
) -> Result<Value, InternalError> {
    let notes = NoteCoordinator::new(app_data.clone());
    let notes = &notes;
    let jobs = JobCoordinator::new(app_data);
    let jobs = &jobs;
    match cmd {
        JobCommands::Create {
            vehicle_id,
            description,
            assign_to,
        } => {
            let new_job = NewJob {
                vehicle_id,
                description,
                assigned_worker: assign_to,
            };
            runner.run(move || jobs.create_job(ctx, new_job.clone())).await
        }
        JobCommands::Show { job_id } => {
            let id = job_id.as_str();
            runner.run(move || jobs.get_job(ctx, id)).await
        }
        JobCommands::Assign { job_id, worker_id, .. } => {
            let (id, worker) = (job_id.as_str(), worker_id.as_deref());
            runner.run(move || jobs.assign(ctx, id, worker)).await
        }
        JobCommands::Transition { job_id, status } => {
            let (id, status) = (job_id.as_str(), status.as_str());
            runner.run(move || jobs.transition(ctx, id, status)).await
        }
        JobCommands::Describe { job_id, description } => {
            let (id, description) = (job_id.as_str(), description.as_str());
            runner.run(move || jobs.revise_description(ctx, id, description)).await
        }
        JobCommands::Mine { worker_id } => {
            let worker = worker_id.as_deref();
            runner.run(move || jobs.list_jobs_for_worker(ctx, worker)).await
        }
        JobCommands::List { status } => {
            let status = status.as_deref();
            runner.run(move || jobs.list_all_jobs(ctx, status)).await
        }
        JobCommands::Note { job_id, text } => {
            let (id, text) = (job_id.as_str(), text.as_str());
            runner.run(move || notes.append_note(ctx, id, text)).await
        }
        JobCommands::Notes { job_id } => {
            let id = job_id.as_str();
            runner.run(move || notes.list_notes(ctx, id)).await
        }
        JobCommands::History { job_id } => {
            let id = job_id.as_str();
            runner.run(move || jobs.job_history(ctx, id)).await
        }
    }
}

async fn invoice_command(
    runner: &Runner<'_>,
    app_data: Arc<AppData>,
    ctx: &RequestContext,
    cmd: InvoiceCommands,
) -> Result<Value, InternalError> {
    let invoices = InvoiceCoordinator::new(app_data);
    let invoices = &invoices;
    match cmd {
        InvoiceCommands::Issue { job_id, total } => {
            let (id, total) = (job_id.as_str(), total.as_str());
            runner.run(move || invoices.issue_invoice(ctx, id, total)).await
        }
        InvoiceCommands::Pay { invoice_id } => {
            let id = invoice_id.as_str();
            runner.run(move || invoices.record_payment(ctx, id)).await
        }
        InvoiceCommands::Show { id, job: true } => {
            let id = id.as_str();
            runner.run(move || invoices.get_invoice_for_job(ctx, id)).await
        }
        InvoiceCommands::Show { id, job: false } => {
            let id = id.as_str();
            runner.run(move || invoices.get_invoice(ctx, id)).await
        }
        InvoiceCommands::List { unpaid_only } => runner.run(move || invoices.list_invoices(ctx, unpaid_only)).await,
    }
}
