use super::audit_intent::AuditIntent;

/// Result of a store mutation together with the audit records it implies
///
/// Stores describe what changed; the coordinator persists `audit` in the
/// same transaction as the change itself.
#[derive(Debug)]
pub struct ActionOutcome<T> {
    pub value: T,
    pub audit: Vec<AuditIntent>,
}

impl<T> ActionOutcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            audit: Vec::new(),
        }
    }

    pub fn with_audit(mut self, intent: AuditIntent) -> Self {
        self.audit.push(intent);
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionOutcome<U> {
        ActionOutcome {
            value: f(self.value),
            audit: self.audit,
        }
    }
}
