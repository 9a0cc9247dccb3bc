//! Duplicate-submission guard for the bulk-delete control.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{BulkError, Result};

/// The "request in flight" flag behind a bulk-delete button.
///
/// Clones share the flag. While a [`TriggerGuard`] is alive the trigger is
/// disabled and [`BulkTrigger::acquire`] fails with [`BulkError::InFlight`].
#[derive(Debug, Clone, Default)]
pub struct BulkTrigger {
    in_flight: Arc<AtomicBool>,
}

impl BulkTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable the trigger for the lifetime of the returned guard.
    pub fn acquire(&self) -> Result<TriggerGuard> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("bulk trigger already held");
            return Err(BulkError::InFlight);
        }
        Ok(TriggerGuard {
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    /// Whether the control should be clickable.
    pub fn is_enabled(&self) -> bool {
        !self.in_flight.load(Ordering::Acquire)
    }
}

/// Re-enables the trigger when dropped.
#[derive(Debug)]
#[must_use = "the trigger is re-enabled as soon as the guard is dropped"]
pub struct TriggerGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for TriggerGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
