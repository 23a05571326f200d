//! Error types surfaced by the reporting path and the global host registry.
use thiserror::Error;

/// Failure reported by a [`ReportingHub`](crate::traits::ReportingHub) capture
/// primitive.
///
/// The adapter never raises these back into the host runtime. They are
/// returned from [`Reporter`](crate::interceptor::Reporter) methods and logged
/// by the callbacks installed on the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The hub refused the event.
    #[error("event rejected by hub: {reason}")]
    Rejected { reason: String },
    /// The hub has no client bound or has been shut down.
    #[error("reporting hub is unavailable")]
    Unavailable,
    #[error("{0}")]
    Other(String),
}

impl CaptureError {
    /// Builds a [`CaptureError::Rejected`].
    pub fn rejected<S: Into<String>>(reason: S) -> Self {
        Self::Rejected { reason: reason.into() }
    }
}

/// Error returned by [`register_global`](crate::host::register_global).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GlobalHostError {
    #[error("a global host runtime is already registered")]
    AlreadyRegistered,
}
