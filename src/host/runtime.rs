use std::fmt;

use parking_lot::RwLock;

use crate::traits::{ErrorHandler, HostRuntime, IntoRejectionReason, RejectionListener};
use crate::types::SharedError;

/// In-process host runtime.
///
/// Holds the global error callback slot and the list of rejection listeners.
/// Application code (or an event loop) surfaces failures through
/// [`raise`](Self::raise) and [`reject`](Self::reject).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use host_rail::prelude::*;
///
/// let runtime = Runtime::new();
/// let seen = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&seen);
/// runtime.on_rejection(Arc::new(move |_reason: &RejectionReason| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// assert_eq!(runtime.reject("boom"), 1);
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct Runtime {
    on_error: RwLock<Option<ErrorHandler>>,
    listeners: RwLock<Vec<RejectionListener>>,
}

impl Runtime {
    /// Creates a runtime with no error callback and no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Surfaces an unhandled error to the installed callback.
    ///
    /// Returns `false` when no callback is installed; the error is then only
    /// logged.
    pub fn raise(&self, error: SharedError) -> bool {
        // Clone out of the lock so the callback may touch the slot itself.
        let handler = self.on_error.read().clone();
        match handler {
            Some(handler) => {
                handler(&error);
                true
            },
            None => {
                tracing::error!(error = %error, "unhandled error with no error callback installed");
                false
            },
        }
    }

    /// Surfaces an unhandled rejection to every listener, in subscription
    /// order.
    ///
    /// Returns the number of listeners notified.
    pub fn reject<R>(&self, reason: R) -> usize
    where
        R: IntoRejectionReason,
    {
        let reason = reason.into_rejection_reason();
        let listeners = self.listeners.read().clone();
        for listener in &listeners {
            listener(&reason);
        }
        listeners.len()
    }

    /// Number of subscribed rejection listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}

impl HostRuntime for Runtime {
    fn error_handler(&self) -> Option<ErrorHandler> {
        self.on_error.read().clone()
    }

    fn set_error_handler(&self, handler: Option<ErrorHandler>) {
        *self.on_error.write() = handler;
    }

    fn on_rejection(&self, listener: RejectionListener) {
        self.listeners.write().push(listener);
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("has_error_handler", &self.on_error.read().is_some())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
