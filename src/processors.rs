//! Event processor that records the adapter's provenance on outgoing events.
//!
//! [`SdkIntegrationProcessor`] appends a fixed integration id to
//! `event.sdk.integrations`. Events without an SDK section pass through
//! untouched: the processor never fabricates one.
//!
//! # Examples
//!
//! ```
//! use host_rail::processors::attach_sdk_integration;
//! use host_rail::types::Scope;
//!
//! let mut scope = Scope::new();
//! attach_sdk_integration(&mut scope, "ember");
//! assert_eq!(scope.processor_count(), 1);
//! ```
use std::borrow::Cow;

use futures_core::future::BoxFuture;

use crate::traits::EventProcessor;
use crate::types::{Event, Scope};

/// Appends an integration id to the event's SDK section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkIntegrationProcessor {
    integration: Cow<'static, str>,
}

impl SdkIntegrationProcessor {
    /// Creates a processor that appends `integration`.
    pub fn new<S: Into<Cow<'static, str>>>(integration: S) -> Self {
        Self { integration: integration.into() }
    }

    #[inline]
    pub fn integration(&self) -> &str {
        &self.integration
    }

    /// Applies the transform synchronously.
    pub fn apply(&self, mut event: Event) -> Event {
        if let Some(sdk) = event.sdk.as_mut() {
            sdk.integrations.push(self.integration.clone().into_owned());
        }
        event
    }
}

impl EventProcessor for SdkIntegrationProcessor {
    fn process(&self, event: Event) -> BoxFuture<'static, Option<Event>> {
        let event = self.apply(event);
        Box::pin(async move { Some(event) })
    }
}

/// Registers a [`SdkIntegrationProcessor`] for `integration` on `scope`.
pub fn attach_sdk_integration<S>(scope: &mut Scope, integration: S)
where
    S: Into<Cow<'static, str>>,
{
    scope.add_event_processor(SdkIntegrationProcessor::new(integration));
}
