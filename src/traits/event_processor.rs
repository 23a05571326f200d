//! Transforms registered on a scope's event-processing pipeline.
//!
//! Processors run once per outgoing event, in registration order. Each one
//! returns a boxed future so hubs can drive the pipeline whenever they like;
//! the code that registered the processor never waits for it.
//!
//! # Examples
//!
//! ```
//! use host_rail::types::{Event, Scope};
//!
//! let mut scope = Scope::new();
//! scope.add_event_processor(|mut event: Event| async move {
//!     event.tags.insert("release".into(), "1.0.0".into());
//!     Some(event)
//! });
//! assert_eq!(scope.processor_count(), 1);
//! ```
use core::future::Future;

use futures_core::future::BoxFuture;

use crate::types::Event;

/// Asynchronous event transform.
///
/// Returning `None` drops the event.
pub trait EventProcessor: Send + Sync {
    fn process(&self, event: Event) -> BoxFuture<'static, Option<Event>>;
}

impl<F, Fut> EventProcessor for F
where
    F: Fn(Event) -> Fut + Send + Sync,
    Fut: Future<Output = Option<Event>> + Send + 'static,
{
    #[inline]
    fn process(&self, event: Event) -> BoxFuture<'static, Option<Event>> {
        Box::pin(self(event))
    }
}
