pub mod action_outcome;
pub mod actor;
pub mod audit;
pub mod audit_intent;
pub mod context;
pub mod money;
pub mod timestamp;

pub use action_outcome::ActionOutcome;
pub use actor::Actor;
pub use audit::{EntityType, EventType};
pub use audit_intent::AuditIntent;
pub use money::Amount;
