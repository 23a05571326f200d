//! Reporting scope: contextual state applied to every event captured while the
//! scope is current.
//!
//! A scope carries extra key/value data, tags, and an ordered list of
//! [`EventProcessor`]s. Hubs push a copy of the current scope, let callers
//! mutate it through `configure_scope`, and pop it once the report is issued.
//!
//! # Examples
//!
//! ```
//! use host_rail::types::Scope;
//!
//! let mut scope = Scope::new();
//! scope.set_extra("reason", "boom");
//! scope.set_tag("integration", "ember");
//!
//! assert_eq!(scope.extra("reason"), Some(&serde_json::json!("boom")));
//! assert_eq!(scope.tag("integration"), Some("ember"));
//! ```
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures_core::future::BoxFuture;
use serde_json::Value;
use smallvec::SmallVec;

use crate::traits::EventProcessor;
use crate::types::Event;

/// SmallVec-backed list of processors registered on a scope.
///
/// Inline storage for two entries covers the common case of one integration
/// processor plus one application processor.
pub type ProcessorVec = SmallVec<[Arc<dyn EventProcessor>; 2]>;

/// Contextual state owned by a reporting hub.
#[derive(Clone, Default)]
pub struct Scope {
    extra: BTreeMap<String, Value>,
    tags: BTreeMap<String, String>,
    processors: ProcessorVec,
}

impl Scope {
    /// Creates an empty scope.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (or overwrites) an extra value.
    pub fn set_extra<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.extra.insert(key.into(), value.into());
    }

    /// Returns an extra value by key.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Returns all extra values.
    pub fn extras(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Sets (or overwrites) a tag.
    pub fn set_tag<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.tags.insert(key.into(), value.into());
    }

    /// Returns a tag by key.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Registers a processor to run on every event captured under this scope.
    pub fn add_event_processor<P>(&mut self, processor: P)
    where
        P: EventProcessor + 'static,
    {
        self.processors.push(Arc::new(processor));
    }

    /// Number of registered processors.
    #[inline]
    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    /// Resets the scope to an empty state.
    pub fn clear(&mut self) {
        self.extra.clear();
        self.tags.clear();
        self.processors.clear();
    }

    /// Merges scope data into `event` and returns the processor pipeline as a
    /// deferred future.
    ///
    /// Extras and tags already present on the event win over scope values.
    /// The returned future owns a snapshot of the processor list, so it is
    /// unaffected by later mutations or pops of this scope. It resolves to
    /// `None` if any processor drops the event.
    pub fn apply_to_event(&self, mut event: Event) -> BoxFuture<'static, Option<Event>> {
        for (key, value) in &self.extra {
            event.extra.entry(key.clone()).or_insert_with(|| value.clone());
        }
        for (key, value) in &self.tags {
            event.tags.entry(key.clone()).or_insert_with(|| value.clone());
        }

        let processors = self.processors.clone();
        Box::pin(async move {
            let mut event = event;
            for processor in processors.iter() {
                event = processor.process(event).await?;
            }
            Some(event)
        })
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("extra", &self.extra)
            .field("tags", &self.tags)
            .field("processors", &self.processors.len())
            .finish()
    }
}
