//! Duplicate-submission guard.
//!
//! Login and chat sends hold a slot for their operation while in flight, so
//! a rapid double submit fails fast instead of reaching the backend twice.

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct SubmissionGuard {
    in_flight: DashSet<&'static str>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `operation`; `None` while another call holds it.
    pub fn try_acquire(&self, operation: &'static str) -> Option<SubmissionSlot<'_>> {
        self.in_flight.insert(operation).then(|| SubmissionSlot {
            guard: self,
            operation,
        })
    }

    pub fn is_in_flight(&self, operation: &str) -> bool {
        self.in_flight.contains(operation)
    }
}

/// Released on drop, including when the owning future is cancelled.
#[derive(Debug)]
pub struct SubmissionSlot<'a> {
    guard: &'a SubmissionGuard,
    operation: &'static str,
}

impl Drop for SubmissionSlot<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.remove(self.operation);
    }
}
