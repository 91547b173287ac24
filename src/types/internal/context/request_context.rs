use crate::errors::internal::AccessError;
use crate::types::internal::Actor;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Carries the resolved actor (if any) plus the identifiers needed for
/// logging and auditing across coordinator and store layers.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API, CLI, or System)
    pub source: RequestSource,

    /// Account performing the operation, as resolved by the authentication layer
    pub actor: Option<Actor>,
}

impl RequestContext {
    /// Context for an operation performed by an authenticated staff member
    pub fn for_actor(actor: Actor) -> Self {
        Self {
            request_id: RequestId::generate(),
            source: RequestSource::Api,
            actor: Some(actor),
        }
    }

    /// Context for a CLI command acting as `actor`
    pub fn for_cli(actor: Actor) -> Self {
        Self {
            source: RequestSource::Cli,
            ..Self::for_actor(actor)
        }
    }

    /// Context for system operations that run without an actor
    pub fn for_system() -> Self {
        Self {
            request_id: RequestId::generate(),
            source: RequestSource::System,
            actor: None,
        }
    }

    /// The acting account, or an authorization error for anonymous contexts
    pub fn actor(&self) -> Result<&Actor, AccessError> {
        self.actor.as_ref().ok_or(AccessError::Unauthenticated)
    }

    /// Identifier recorded in audit rows
    pub fn actor_id(&self) -> String {
        match &self.actor {
            Some(actor) => actor.account_id.clone(),
            None => format!("{}:anonymous", self.source),
        }
    }
}
