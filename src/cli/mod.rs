// CLI module: the `workshop` command-line front end

pub mod commands;
pub mod migrate;
pub mod output;

use clap::{Args, Parser, Subcommand};

pub use commands::execute_command;
pub use output::{exit_code, render_error};

/// Workshop job ledger CLI
///
/// Every command except `migrate` and `bootstrap` acts as the account named
/// by `--actor`. Results are printed to stdout as JSON.
#[derive(Parser, Debug)]
#[command(name = "workshop")]
#[command(about = "Workshop job lifecycle and billing ledger", long_about = None)]
pub struct Cli {
    /// Username of the staff member performing the command
    #[arg(long, global = true, env = "WORKSHOP_ACTOR")]
    pub actor: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Create the first administrator on an empty database
    Bootstrap(BootstrapArgs),

    #[command(flatten)]
    Staff(StaffCommands),
}

/// Commands that act as the account named by `--actor`
#[derive(Subcommand, Debug)]
pub enum StaffCommands {
    /// Staff account management
    #[command(subcommand)]
    Account(AccountCommands),

    /// Customer records
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Vehicles owned by customers
    #[command(subcommand)]
    Vehicle(VehicleCommands),

    /// Jobs, assignments, status changes and notes
    #[command(subcommand)]
    Job(JobCommands),

    /// Invoices for completed jobs
    #[command(subcommand)]
    Invoice(InvoiceCommands),
}

#[derive(Args, Debug)]
pub struct BootstrapArgs {
    #[arg(long)]
    pub username: String,
    /// Credential hash produced by the authentication layer
    #[arg(long)]
    pub credential_hash: String,
}

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        credential_hash: String,
        /// administrator or worker
        #[arg(long, default_value = "worker")]
        role: String,
    },
    Activate {
        account_id: String,
    },
    Deactivate {
        account_id: String,
    },
    Show {
        account_id: String,
    },
    List,
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommands {
    Create {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    Update {
        customer_id: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Empty string clears the email
        #[arg(long)]
        email: Option<String>,
        /// Empty string clears the address
        #[arg(long)]
        address: Option<String>,
    },
    Activate {
        customer_id: String,
    },
    Deactivate {
        customer_id: String,
    },
    Show {
        customer_id: String,
    },
    List {
        #[arg(long)]
        active_only: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum VehicleCommands {
    Register {
        #[arg(long)]
        customer_id: String,
        #[arg(long)]
        make: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        plate_number: String,
    },
    Show {
        vehicle_id: String,
    },
    Remove {
        vehicle_id: String,
    },
    /// Vehicles of one customer, or every vehicle without `--customer-id`
    List {
        #[arg(long)]
        customer_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum JobCommands {
    Create {
        #[arg(long)]
        vehicle_id: String,
        #[arg(long)]
        description: String,
        /// Account id of the worker to assign
        #[arg(long)]
        assign_to: Option<String>,
    },
    Show {
        job_id: String,
    },
    /// Assign a worker, or clear the assignment with `--clear`
    Assign {
        job_id: String,
        #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
        worker_id: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    Transition {
        job_id: String,
        /// created, in_progress, waiting_for_parts, completed or cancelled
        status: String,
    },
    Describe {
        job_id: String,
        description: String,
    },
    /// Jobs assigned to the acting account (or `--worker-id`)
    Mine {
        #[arg(long)]
        worker_id: Option<String>,
    },
    List {
        #[arg(long)]
        status: Option<String>,
    },
    Note {
        job_id: String,
        text: String,
    },
    Notes {
        job_id: String,
    },
    History {
        job_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum InvoiceCommands {
    Issue {
        job_id: String,
        /// Decimal total with at most two fractional digits
        total: String,
    },
    Pay {
        invoice_id: String,
    },
    /// Invoice by id, or by job with `--job`
    Show {
        id: String,
        #[arg(long)]
        job: bool,
    },
    List {
        #[arg(long)]
        unpaid_only: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_transition() {
        let cli = Cli::try_parse_from(["workshop", "--actor", "w1", "job", "transition", "J1", "in_progress"]).unwrap();
        assert_eq!(cli.actor.as_deref(), Some("w1"));
        match cli.command {
            Commands::Staff(StaffCommands::Job(JobCommands::Transition { job_id, status })) => {
                assert_eq!(job_id, "J1");
                assert_eq!(status, "in_progress");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_assign_requires_worker_or_clear() {
        assert!(Cli::try_parse_from(["workshop", "job", "assign", "J1"]).is_err());
        assert!(Cli::try_parse_from(["workshop", "job", "assign", "J1", "--clear"]).is_ok());
        assert!(Cli::try_parse_from(["workshop", "job", "assign", "J1", "--worker-id", "W", "--clear"]).is_err());
    }
}
