//! Collaborator contracts.
//!
//! - [`HostRuntime`]: the host framework's error-callback slot and rejection
//!   stream
//! - [`ReportingHub`]: scope management and the two report primitives
//! - [`EventProcessor`]: asynchronous transform run on every outgoing event
//! - [`IntoRejectionReason`]: classifies rejected values at the host boundary
//!
//! The adapter only talks to these traits, so tests can swap in fakes and
//! applications can bridge their own runtimes and hubs.

pub mod event_processor;
pub mod host_runtime;
pub mod into_rejection_reason;
pub mod reporting_hub;

pub use event_processor::EventProcessor;
pub use host_runtime::{ErrorHandler, HostRuntime, RejectionListener};
pub use into_rejection_reason::IntoRejectionReason;
pub use reporting_hub::ReportingHub;
