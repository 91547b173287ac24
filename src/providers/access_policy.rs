use std::fmt;

use serde::Serialize;

use crate::errors::internal::AccessError;
use crate::types::db::Role;
use crate::types::internal::Actor;

/// Everything an actor can ask the core to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ManageAccounts,
    ViewAll,
    AssignWorker,
    CreateCustomer,
    UpdateCustomer,
    DeactivateCustomer,
    RegisterVehicle,
    RemoveVehicle,
    CreateJob,
    ViewJob,
    UpdateJobStatus,
    AddNote,
    ViewAssignedJobs,
    IssueInvoice,
    RecordPayment,
    ViewInvoice,
    /// Look up individual customers and vehicles
    ViewDirectory,
}

impl Action {
    pub const ALL: [Action; 17] = [
        Action::ManageAccounts,
        Action::ViewAll,
        Action::AssignWorker,
        Action::CreateCustomer,
        Action::UpdateCustomer,
        Action::DeactivateCustomer,
        Action::RegisterVehicle,
        Action::RemoveVehicle,
        Action::CreateJob,
        Action::ViewJob,
        Action::UpdateJobStatus,
        Action::AddNote,
        Action::ViewAssignedJobs,
        Action::IssueInvoice,
        Action::RecordPayment,
        Action::ViewInvoice,
        Action::ViewDirectory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ManageAccounts => "manage-accounts",
            Action::ViewAll => "view-all",
            Action::AssignWorker => "assign-worker",
            Action::CreateCustomer => "create-customer",
            Action::UpdateCustomer => "update-customer",
            Action::DeactivateCustomer => "deactivate-customer",
            Action::RegisterVehicle => "register-vehicle",
            Action::RemoveVehicle => "remove-vehicle",
            Action::CreateJob => "create-job",
            Action::ViewJob => "view-job",
            Action::UpdateJobStatus => "update-job-status",
            Action::AddNote => "add-note",
            Action::ViewAssignedJobs => "view-assigned-jobs",
            Action::IssueInvoice => "issue-invoice",
            Action::RecordPayment => "record-payment",
            Action::ViewInvoice => "view-invoice",
            Action::ViewDirectory => "view-directory",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the action is aimed at, as far as the policy needs to know
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    /// Actions decided by role alone
    Capability,
    /// A specific job and its current assignment
    Job { assigned_worker: Option<&'a str> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    ActorInactive,
    RoleNotPermitted,
    NotAssigned,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::ActorInactive => f.write_str("account is deactivated"),
            DenyReason::RoleNotPermitted => f.write_str("role does not permit this action"),
            DenyReason::NotAssigned => f.write_str("job is not assigned to this account"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Role-based access rules for workshop staff
///
/// Pure: no store access. The actor (role and active flag) is resolved by the
/// caller and handed in explicitly.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessPolicy;

impl AccessPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn authorize(&self, actor: &Actor, action: Action, target: Target<'_>) -> Decision {
        if !actor.active {
            return Decision::Deny(DenyReason::ActorInactive);
        }

        match actor.role {
            Role::Administrator => Decision::Allow,
            Role::Worker => Self::worker_decision(&actor.account_id, action, target),
        }
    }

    fn worker_decision(account_id: &str, action: Action, target: Target<'_>) -> Decision {
        match action {
            Action::CreateCustomer
            | Action::UpdateCustomer
            | Action::RegisterVehicle
            | Action::CreateJob
            | Action::ViewJob
            | Action::ViewAssignedJobs
            | Action::ViewDirectory => Decision::Allow,

            Action::UpdateJobStatus | Action::AddNote => match target {
                Target::Job {
                    assigned_worker: Some(worker),
                } if worker == account_id => Decision::Allow,
                _ => Decision::Deny(DenyReason::NotAssigned),
            },

            Action::ManageAccounts
            | Action::ViewAll
            | Action::AssignWorker
            | Action::DeactivateCustomer
            | Action::RemoveVehicle
            | Action::IssueInvoice
            | Action::RecordPayment
            | Action::ViewInvoice => Decision::Deny(DenyReason::RoleNotPermitted),
        }
    }

    /// Reject a deactivated actor before anything is looked up
    pub fn require_active(&self, actor: &Actor, action: Action) -> Result<(), AccessError> {
        if actor.active {
            return Ok(());
        }
        tracing::warn!(actor_id = %actor.account_id, action = %action, "Deactivated account attempted an action");
        Err(AccessError::Forbidden {
            action,
            reason: DenyReason::ActorInactive,
        })
    }

    /// Authorize, turning a denial into `Forbidden`
    pub fn require(&self, actor: &Actor, action: Action, target: Target<'_>) -> Result<(), AccessError> {
        match self.authorize(actor, action, target) {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => {
                tracing::warn!(
                    actor_id = %actor.account_id,
                    action = %action,
                    reason = %reason,
                    "Authorization denied"
                );
                Err(AccessError::Forbidden { action, reason })
            }
        }
    }

    /// Authorize an action on something the actor may not even know exists
    ///
    /// A role denial is reported as `Hidden` (not found). An inactive actor
    /// still gets `Forbidden`.
    pub fn require_visible(
        &self,
        actor: &Actor,
        action: Action,
        entity: &'static str,
        id: &str,
    ) -> Result<(), AccessError> {
        match self.require(actor, action, Target::Capability) {
            Err(AccessError::Forbidden {
                reason: DenyReason::RoleNotPermitted,
                ..
            }) => Err(AccessError::Hidden {
                entity,
                id: id.to_string(),
            }),
            other => other,
        }
    }
}
