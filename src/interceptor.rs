//! The interception adapter.
//!
//! [`Interceptor::install`] wires a [`HostRuntime`] to a [`ReportingHub`]:
//!
//! - the host's global error callback is replaced by a wrapper that reports
//!   the error and then hands it to the callback that was there before;
//! - a listener is subscribed to the host's unhandled-rejection stream that
//!   reports every rejection inside its own pushed scope.
//!
//! Every report carries the configured SDK integration id.
//!
//! # Examples
//!
//! ```
//! # tokio_test_block(async {
//! use std::sync::Arc;
//! use host_rail::prelude::*;
//!
//! let runtime = Arc::new(Runtime::new());
//! let hub = Arc::new(MemoryHub::new());
//!
//! let mut interceptor = Interceptor::new(hub.clone(), Some(runtime.clone()));
//! interceptor.install();
//! assert!(interceptor.is_installed());
//!
//! runtime.reject("boom");
//! hub.flush().await;
//!
//! let event = &hub.events()[0];
//! assert_eq!(event.message.as_deref(), Some("Unhandled Promise error detected"));
//! assert_eq!(event.extra["reason"], "boom");
//! assert!(event.integrations().unwrap().contains(&"ember".to_string()));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
use std::fmt;
use std::sync::Arc;

use crate::error::CaptureError;
use crate::host;
use crate::hub::ScopeGuard;
use crate::options::InterceptOptions;
use crate::processors::attach_sdk_integration;
use crate::traits::{ErrorHandler, HostRuntime, RejectionListener, ReportingHub};
use crate::types::{EventHint, EventId, RejectionReason, Scope, SharedError};

/// Extra key holding the context note on error-like rejections.
pub const CONTEXT_EXTRA: &str = "context";
/// Extra key holding the raw value of opaque rejections.
pub const REASON_EXTRA: &str = "reason";

/// Lifecycle of an [`Interceptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallState {
    /// Initial state, kept when no host could be resolved.
    Uninstalled,
    /// Terminal: there is no uninstall.
    Installed,
}

/// Performs the scoped reports on behalf of the installed callbacks.
///
/// Hub failures propagate out of these methods; the callbacks installed on
/// the host log them instead of raising them into the host.
#[derive(Clone)]
pub struct Reporter {
    hub: Arc<dyn ReportingHub>,
    options: InterceptOptions,
}

impl Reporter {
    /// Creates a reporter that sends to `hub` using `options`.
    pub fn new(hub: Arc<dyn ReportingHub>, options: InterceptOptions) -> Self {
        Self { hub, options }
    }

    /// Options in effect for every report.
    #[inline]
    pub fn options(&self) -> &InterceptOptions {
        &self.options
    }

    /// Reports a synchronous error, then passes it on to `previous`.
    ///
    /// Capture and delegation share one `with_scope` boundary of the hub.
    /// `previous` receives the error even when the capture fails.
    pub fn report_error(
        &self,
        error: &SharedError,
        previous: Option<&ErrorHandler>,
    ) -> Result<EventId, CaptureError> {
        let hub = &*self.hub;
        let integration = self.options.sdk_integration_id();
        let mut outcome = Err(CaptureError::Other("with_scope did not run its callback".into()));

        hub.with_scope(&mut || {
            hub.configure_scope(&mut |scope: &mut Scope| {
                attach_sdk_integration(scope, integration.to_owned());
            });
            outcome = hub.capture_exception(error, EventHint::original(error));

            if let Some(previous) = previous {
                previous(error);
            }
        });

        outcome
    }

    /// Reports an unhandled rejection inside its own pushed scope.
    ///
    /// Error-like reasons become exceptions with a context note; any other
    /// value becomes a message with the raw value attached. The scope is
    /// popped on every exit path, including a failed or panicking capture.
    pub fn report_rejection(&self, reason: &RejectionReason) -> Result<EventId, CaptureError> {
        let hub = &*self.hub;
        let integration = self.options.sdk_integration_id();
        let message = self.options.rejection_text();
        let _scope = ScopeGuard::push(hub);

        match reason {
            RejectionReason::Error(error) => {
                hub.configure_scope(&mut |scope: &mut Scope| {
                    scope.set_extra(CONTEXT_EXTRA, message);
                    attach_sdk_integration(scope, integration.to_owned());
                });
                hub.capture_exception(error, EventHint::original(error))
            },
            RejectionReason::Value(value) => {
                hub.configure_scope(&mut |scope: &mut Scope| {
                    scope.set_extra(REASON_EXTRA, value.clone());
                    attach_sdk_integration(scope, integration.to_owned());
                });
                hub.capture_message(message)
            },
        }
    }

    fn error_handler(self, previous: Option<ErrorHandler>) -> ErrorHandler {
        Arc::new(move |error: &SharedError| {
            match self.report_error(error, previous.as_ref()) {
                Ok(event_id) => tracing::trace!(%event_id, "reported unhandled error"),
                Err(err) => tracing::warn!(error = %err, "failed to report unhandled error"),
            }
        })
    }

    fn rejection_listener(self) -> RejectionListener {
        Arc::new(move |reason: &RejectionReason| match self.report_rejection(reason) {
            Ok(event_id) => tracing::trace!(%event_id, "reported unhandled rejection"),
            Err(err) => tracing::warn!(error = %err, "failed to report unhandled rejection"),
        })
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter").field("options", &self.options).finish_non_exhaustive()
    }
}

/// Forwards a host runtime's unhandled errors and rejections to a hub.
pub struct Interceptor {
    reporter: Reporter,
    host: Option<Arc<dyn HostRuntime>>,
    state: InstallState,
}

impl Interceptor {
    /// Creates an interceptor with default options.
    ///
    /// Without an explicit `host`, the handle registered with
    /// [`host::register_global`] is used. If there is none, the interceptor
    /// is still created and [`install`](Self::install) does nothing.
    pub fn new(hub: Arc<dyn ReportingHub>, host: Option<Arc<dyn HostRuntime>>) -> Self {
        Self::builder(hub).host(host).build()
    }

    /// Starts building an interceptor that reports to `hub`.
    pub fn builder(hub: Arc<dyn ReportingHub>) -> InterceptorBuilder {
        InterceptorBuilder { hub, host: None, options: InterceptOptions::default() }
    }

    /// The resolved host runtime, if any.
    #[inline]
    pub fn host(&self) -> Option<&Arc<dyn HostRuntime>> {
        self.host.as_ref()
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> InstallState {
        self.state
    }

    #[inline]
    pub fn is_installed(&self) -> bool {
        self.state == InstallState::Installed
    }

    /// Integration name from the options.
    #[inline]
    pub fn name(&self) -> &str {
        self.reporter.options.name()
    }

    /// Handle to the reporting logic used by the installed callbacks.
    #[inline]
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Wraps the host's error callback and subscribes to its rejections.
    ///
    /// Does nothing when no host was resolved or when already installed.
    pub fn install(&mut self) {
        let Some(host) = self.host.as_ref() else {
            tracing::debug!(integration = self.name(), "no host runtime resolved; skipping install");
            return;
        };
        if self.is_installed() {
            tracing::debug!(integration = self.name(), "already installed");
            return;
        }

        let options = &self.reporter.options;
        if options.captures_sync_errors() {
            let previous = host.error_handler();
            host.set_error_handler(Some(self.reporter.clone().error_handler(previous)));
        }
        if options.captures_rejections() {
            host.on_rejection(self.reporter.clone().rejection_listener());
        }

        self.state = InstallState::Installed;
        tracing::debug!(integration = self.name(), "installed host interception");
    }
}

impl fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("name", &self.name())
            .field("has_host", &self.host.is_some())
            .field("state", &self.state)
            .finish()
    }
}

/// Builder for [`Interceptor`].
pub struct InterceptorBuilder {
    hub: Arc<dyn ReportingHub>,
    host: Option<Arc<dyn HostRuntime>>,
    options: InterceptOptions,
}

impl InterceptorBuilder {
    /// Sets an explicit host runtime. `None` falls back to the global handle.
    #[must_use]
    pub fn host(mut self, host: Option<Arc<dyn HostRuntime>>) -> Self {
        self.host = host;
        self
    }

    /// Replaces the default [`InterceptOptions`].
    #[must_use]
    pub fn options(mut self, options: InterceptOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolves the host and builds an [`Interceptor`] in the
    /// [`Uninstalled`](InstallState::Uninstalled) state.
    pub fn build(self) -> Interceptor {
        let host = self.host.or_else(host::global);
        if host.is_none() {
            tracing::debug!(integration = self.options.name(), "no host runtime available");
        }

        Interceptor {
            reporter: Reporter::new(self.hub, self.options),
            host,
            state: InstallState::Uninstalled,
        }
    }
}

impl fmt::Debug for InterceptorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorBuilder")
            .field("has_host", &self.host.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
