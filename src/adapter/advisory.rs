//! Non-fatal conversion notices.
//!
//! Some inputs are accepted but translated with reduced fidelity (an out-of-range `top_k`,
//! several tool calls in one stream delta). Each such case is logged with `tracing::warn!` and
//! also recorded in an [`Advisories`] collector so that callers can inspect it programmatically.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// A degraded-fidelity translation that did not abort the conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// `top_k` sampling was requested with a value that is neither -1 nor >= 1.
    /// The value is forwarded unchanged.
    TopKOutOfRange { top_k: i64 },
    /// A stream delta carried several tool calls; only the first one was emitted.
    MultipleToolCallsInDelta { count: usize, kept_call_id: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::TopKOutOfRange { top_k } => {
                write!(f, "top_k must be -1 or >= 1 (got {})", top_k)
            }
            Advisory::MultipleToolCallsInDelta {
                count,
                kept_call_id,
            } => write!(
                f,
                "multiple tool calls found in a single delta ({}), using the first ({}), ignoring the rest",
                count, kept_call_id
            ),
        }
    }
}

/// Shared, cloneable collector of [`Advisory`] notices.
///
/// Clones share the same buffer, so a handle can be moved into a stream and read back by the
/// caller once the stream has been consumed.
#[derive(Debug, Clone, Default)]
pub struct Advisories {
    inner: Arc<Mutex<Vec<Advisory>>>,
}

impl Advisories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and store a notice.
    pub fn record(&self, advisory: Advisory) {
        tracing::warn!("{}", advisory);
        self.lock().push(advisory);
    }

    pub fn snapshot(&self) -> Vec<Advisory> {
        self.lock().clone()
    }

    /// Take all recorded notices, leaving the collector empty.
    pub fn drain(&self) -> Vec<Advisory> {
        std::mem::take(&mut *self.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // A panic while holding the lock cannot leave the Vec half-written, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Vec<Advisory>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
