//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use host_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Adapter**: [`Interceptor`], [`InstallState`], [`InterceptOptions`]
//! - **Reference collaborators**: [`Runtime`], [`MemoryHub`], [`ScopeGuard`]
//! - **Traits**: [`HostRuntime`], [`ReportingHub`], [`EventProcessor`]
//! - **Types**: [`Event`], [`EventHint`], [`RejectionReason`], [`Scope`],
//!   [`SharedError`]

pub use crate::error::CaptureError;
pub use crate::host::Runtime;
pub use crate::hub::{MemoryHub, ScopeGuard};
pub use crate::interceptor::{InstallState, Interceptor};
pub use crate::options::InterceptOptions;
pub use crate::traits::{
    ErrorHandler, EventProcessor, HostRuntime, IntoRejectionReason, RejectionListener, ReportingHub,
};
pub use crate::types::{Event, EventHint, EventId, Level, RejectionReason, Scope, SdkInfo, SharedError};
