//! Host runtime handles.
//!
//! Applications usually pass their runtime to the interceptor explicitly. When
//! they don't, the interceptor falls back to the process-wide handle
//! registered here.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use host_rail::host::{self, Runtime};
//!
//! let runtime = Arc::new(Runtime::new());
//! host::register_global(runtime).expect("registered once");
//! assert!(host::global().is_some());
//! assert!(host::register_global(Arc::new(Runtime::new())).is_err());
//! ```
mod runtime;

pub use runtime::Runtime;

use std::sync::{Arc, OnceLock};

use crate::error::GlobalHostError;
use crate::traits::HostRuntime;

static GLOBAL_HOST: OnceLock<Arc<dyn HostRuntime>> = OnceLock::new();

/// Registers the process-wide host runtime.
///
/// Only the first registration wins.
pub fn register_global(host: Arc<dyn HostRuntime>) -> Result<(), GlobalHostError> {
    GLOBAL_HOST.set(host).map_err(|_| GlobalHostError::AlreadyRegistered)
}

/// Returns the process-wide host runtime, if one was registered.
pub fn global() -> Option<Arc<dyn HostRuntime>> {
    GLOBAL_HOST.get().cloned()
}
