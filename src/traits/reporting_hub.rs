//! Contract of the reporting hub the adapter forwards to.
//!
//! The hub owns a stack of [`Scope`]s and two report primitives. The adapter
//! relies on nothing else: transport, sampling and persistence are the hub's
//! business.
use std::sync::Arc;

use crate::error::CaptureError;
use crate::types::{EventHint, EventId, Scope, SharedError};

/// Scoped context management plus exception and message capture.
///
/// Methods take `&mut dyn FnMut` callbacks so the trait stays object safe;
/// the adapter holds hubs as `Arc<dyn ReportingHub>`.
pub trait ReportingHub: Send + Sync {
    /// Pushes a copy of the current scope.
    fn push_scope(&self);

    /// Pops the current scope.
    fn pop_scope(&self);

    /// Runs `f` with the current scope for mutation.
    fn configure_scope(&self, f: &mut dyn FnMut(&mut Scope));

    /// Runs `f` inside an ambient current-scope boundary.
    fn with_scope(&self, f: &mut dyn FnMut());

    /// Captures an error.
    fn capture_exception(
        &self,
        error: &SharedError,
        hint: EventHint,
    ) -> Result<EventId, CaptureError>;

    /// Captures a plain message.
    fn capture_message(&self, message: &str) -> Result<EventId, CaptureError>;
}

impl<H> ReportingHub for Arc<H>
where
    H: ReportingHub + ?Sized,
{
    #[inline]
    fn push_scope(&self) {
        (**self).push_scope()
    }

    #[inline]
    fn pop_scope(&self) {
        (**self).pop_scope()
    }

    #[inline]
    fn configure_scope(&self, f: &mut dyn FnMut(&mut Scope)) {
        (**self).configure_scope(f)
    }

    #[inline]
    fn with_scope(&self, f: &mut dyn FnMut()) {
        (**self).with_scope(f)
    }

    #[inline]
    fn capture_exception(
        &self,
        error: &SharedError,
        hint: EventHint,
    ) -> Result<EventId, CaptureError> {
        (**self).capture_exception(error, hint)
    }

    #[inline]
    fn capture_message(&self, message: &str) -> Result<EventId, CaptureError> {
        (**self).capture_message(message)
    }
}
