//! Contract of the host framework runtime the adapter attaches to.
//!
//! The host exposes two error-surfacing mechanisms:
//! - a single mutable slot holding the global synchronous error callback,
//! - a subscription surface for unhandled asynchronous rejections.
//!
//! Anything that implements [`HostRuntime`] can be intercepted. The crate's own
//! [`Runtime`](crate::host::Runtime) is one such implementation.
use std::sync::Arc;

use crate::types::{RejectionReason, SharedError};

/// Global synchronous error callback.
pub type ErrorHandler = Arc<dyn Fn(&SharedError) + Send + Sync>;

/// Listener for unhandled asynchronous rejections.
pub type RejectionListener = Arc<dyn Fn(&RejectionReason) + Send + Sync>;

/// Host framework runtime with an error-callback slot and a rejection stream.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use host_rail::prelude::*;
///
/// let runtime = Runtime::new();
/// assert!(runtime.error_handler().is_none());
///
/// runtime.set_error_handler(Some(Arc::new(|error: &SharedError| {
///     eprintln!("uncaught: {error}");
/// })));
/// assert!(runtime.error_handler().is_some());
/// ```
pub trait HostRuntime: Send + Sync {
    /// Returns the currently installed error callback, if any.
    fn error_handler(&self) -> Option<ErrorHandler>;

    /// Replaces the error callback slot.
    fn set_error_handler(&self, handler: Option<ErrorHandler>);

    /// Subscribes to unhandled rejection events.
    fn on_rejection(&self, listener: RejectionListener);
}

impl<H> HostRuntime for Arc<H>
where
    H: HostRuntime + ?Sized,
{
    #[inline]
    fn error_handler(&self) -> Option<ErrorHandler> {
        (**self).error_handler()
    }

    #[inline]
    fn set_error_handler(&self, handler: Option<ErrorHandler>) {
        (**self).set_error_handler(handler)
    }

    #[inline]
    fn on_rejection(&self, listener: RejectionListener) {
        (**self).on_rejection(listener)
    }
}
