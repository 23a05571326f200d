use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use futures_core::future::BoxFuture;
use parking_lot::Mutex;

use super::ScopeGuard;
use crate::error::CaptureError;
use crate::traits::ReportingHub;
use crate::types::{Event, EventHint, EventId, Scope, SdkInfo, SharedError};

/// Scope stack with a root that is never popped.
#[derive(Debug, Default)]
struct Stack {
    root: Scope,
    children: Vec<Scope>,
}

impl Stack {
    fn current(&self) -> &Scope {
        self.children.last().unwrap_or(&self.root)
    }

    /// Scope at a 1-based `depth`, the root being depth 1.
    fn at_depth_mut(&mut self, depth: usize) -> Option<&mut Scope> {
        match depth {
            0 => None,
            1 => Some(&mut self.root),
            n => self.children.get_mut(n - 2),
        }
    }

    fn depth(&self) -> usize {
        self.children.len() + 1
    }
}

/// In-memory [`ReportingHub`] with a deferred event-processor pipeline.
///
/// Captures stamp the event with the hub's [`SdkInfo`], snapshot the current
/// scope, and queue the scope's processors without running them. Call
/// [`flush`](Self::flush) to drive the queued pipelines and collect the
/// resulting events. Nothing bounds the queue: a hub that is never flushed
/// keeps every captured pipeline alive.
///
/// `configure_scope` edits a copy of the current scope outside the stack lock
/// and writes it back to the same depth afterwards, so its callback may call
/// into the hub. Scopes pushed from inside the callback start from the
/// unedited copy.
///
/// The [`EventHint`] passed to `capture_exception` is not retained. The
/// event's exception section is built from the captured error itself.
///
/// # Examples
///
/// ```
/// # tokio_test_block(async {
/// use std::sync::Arc;
/// use host_rail::prelude::*;
///
/// let hub = MemoryHub::new();
/// let error: SharedError = Arc::new(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
///
/// hub.capture_exception(&error, EventHint::original(&error)).unwrap();
/// assert_eq!(hub.pending(), 1);
///
/// assert_eq!(hub.flush().await, 1);
/// assert_eq!(hub.events()[0].exception.as_ref().unwrap().value, "boom");
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
pub struct MemoryHub {
    stack: Mutex<Stack>,
    pending: Mutex<VecDeque<BoxFuture<'static, Option<Event>>>>,
    delivered: Mutex<Vec<Event>>,
    sdk: Option<SdkInfo>,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl MemoryHub {
    /// Creates a hub that stamps events with this crate's SDK info.
    pub fn new() -> Self {
        Self::with_sdk(Some(SdkInfo::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))))
    }

    /// Creates a hub with a custom (or no) SDK section.
    pub fn with_sdk(sdk: Option<SdkInfo>) -> Self {
        Self {
            stack: Mutex::new(Stack::default()),
            pending: Mutex::new(VecDeque::new()),
            delivered: Mutex::new(Vec::new()),
            sdk,
            next_id: AtomicU64::new(1),
            closed: AtomicBool::new(false),
        }
    }

    /// Number of scopes on the stack, root included.
    pub fn depth(&self) -> usize {
        self.stack.lock().depth()
    }

    /// Returns a copy of the current scope.
    pub fn current_scope(&self) -> Scope {
        self.stack.lock().current().clone()
    }

    /// Number of captured events whose pipeline has not run yet.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Returns the events delivered so far.
    pub fn events(&self) -> Vec<Event> {
        self.delivered.lock().clone()
    }

    /// Makes every subsequent capture fail with [`CaptureError::Unavailable`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Runs every queued processor pipeline in capture order.
    ///
    /// Returns how many events survived their pipeline.
    pub async fn flush(&self) -> usize {
        let queued: Vec<_> = self.pending.lock().drain(..).collect();
        let mut delivered = 0;

        for pipeline in queued {
            if let Some(event) = pipeline.await {
                tracing::trace!(event_id = %event.event_id, "event delivered");
                self.delivered.lock().push(event);
                delivered += 1;
            }
        }

        delivered
    }

    fn enqueue(&self, mut event: Event) -> Result<EventId, CaptureError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CaptureError::Unavailable);
        }

        if let Some(sdk) = &self.sdk {
            event.sdk = Some(sdk.clone());
        }

        let event_id = event.event_id;
        let pipeline = self.stack.lock().current().apply_to_event(event);
        self.pending.lock().push_back(pipeline);
        Ok(event_id)
    }

    fn next_event_id(&self) -> EventId {
        EventId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for MemoryHub {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryHub")
            .field("depth", &self.depth())
            .field("pending", &self.pending())
            .field("delivered", &self.delivered.lock().len())
            .field("sdk", &self.sdk)
            .finish()
    }
}

impl ReportingHub for MemoryHub {
    fn push_scope(&self) {
        let mut stack = self.stack.lock();
        let child = stack.current().clone();
        stack.children.push(child);
    }

    fn pop_scope(&self) {
        if self.stack.lock().children.pop().is_none() {
            tracing::warn!("pop_scope called with only the root scope on the stack");
        }
    }

    fn configure_scope(&self, f: &mut dyn FnMut(&mut Scope)) {
        // Edit a copy with the lock released so `f` may call back into the hub.
        let (depth, mut scope) = {
            let stack = self.stack.lock();
            (stack.depth(), stack.current().clone())
        };
        f(&mut scope);

        match self.stack.lock().at_depth_mut(depth) {
            Some(slot) => *slot = scope,
            None => tracing::warn!(depth, "scope popped while being configured; changes dropped"),
        }
    }

    fn with_scope(&self, f: &mut dyn FnMut()) {
        let _guard = ScopeGuard::push(self);
        f();
    }

    fn capture_exception(
        &self,
        error: &SharedError,
        _hint: EventHint,
    ) -> Result<EventId, CaptureError> {
        self.enqueue(Event::exception(self.next_event_id(), &**error))
    }

    fn capture_message(&self, message: &str) -> Result<EventId, CaptureError> {
        self.enqueue(Event::message(self.next_event_id(), message))
    }
}
