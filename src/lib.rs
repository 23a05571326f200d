//! Forward a host framework's unhandled errors and promise rejections to a
//! reporting hub.
//!
//! The crate attaches to the two error-surfacing mechanisms of a
//! [`HostRuntime`]: its global synchronous error callback and its
//! unhandled-rejection stream. Failures are reported to a [`ReportingHub`]
//! with contextual metadata and an SDK integration marker, and the host's
//! original error callback keeps receiving every error.
//!
//! # Examples
//!
//! ## Intercepting a Host Runtime
//!
//! ```
//! # tokio_test_block(async {
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use host_rail::prelude::*;
//!
//! let runtime = Arc::new(Runtime::new());
//! let handled = Arc::new(AtomicUsize::new(0));
//!
//! // The application's own handler keeps working after interception.
//! let counter = Arc::clone(&handled);
//! runtime.set_error_handler(Some(Arc::new(move |_error: &SharedError| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! })));
//!
//! let hub = Arc::new(MemoryHub::new());
//! let mut interceptor = Interceptor::new(hub.clone(), Some(runtime.clone()));
//! interceptor.install();
//!
//! let error: SharedError = Arc::new(std::io::Error::new(std::io::ErrorKind::Other, "render failed"));
//! runtime.raise(error);
//! hub.flush().await;
//!
//! assert_eq!(handled.load(Ordering::SeqCst), 1);
//! assert_eq!(hub.events()[0].exception.as_ref().unwrap().value, "render failed");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! ## Custom Options
//!
//! ```
//! use std::sync::Arc;
//! use host_rail::prelude::*;
//!
//! let interceptor = Interceptor::builder(Arc::new(MemoryHub::new()))
//!     .host(Some(Arc::new(Runtime::new())))
//!     .options(InterceptOptions::new().integration_name("Glimmer").sdk_integration("glimmer"))
//!     .build();
//!
//! assert_eq!(interceptor.name(), "Glimmer");
//! assert_eq!(interceptor.state(), InstallState::Uninstalled);
//! ```

/// Error types for capture failures and global registration
pub mod error;
/// Process-wide host handle and the reference host runtime
pub mod host;
/// Scope guard and the in-memory reference hub
pub mod hub;
/// The interception adapter
pub mod interceptor;
/// Interceptor configuration
pub mod options;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Event processor that tags events with the integration id
pub mod processors;
/// Collaborator contracts: host runtime, reporting hub, event processor
pub mod traits;
/// Event descriptors, scopes and rejection reasons
pub mod types;

pub use error::{CaptureError, GlobalHostError};
pub use interceptor::{InstallState, Interceptor, InterceptorBuilder, Reporter};
pub use options::InterceptOptions;
pub use traits::{
    ErrorHandler, EventProcessor, HostRuntime, IntoRejectionReason, RejectionListener, ReportingHub,
};
pub use types::{Event, EventHint, EventId, Level, RejectionReason, Scope, SdkInfo, SharedError};
