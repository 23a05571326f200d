//! Outgoing report descriptors.
//!
//! An [`Event`] is what a reporting hub hands to its event-processor pipeline
//! and, eventually, to whatever delivers it. The adapter only ever touches the
//! [`SdkInfo`] section, appending its integration id.
//!
//! # Examples
//!
//! ```
//! use host_rail::types::{Event, EventId, Level, SdkInfo};
//!
//! let event = Event::message(EventId::new(1), "Unhandled Promise error detected")
//!     .with_sdk(SdkInfo::new("host-rail", "0.1.0").with_integration("foo"));
//!
//! assert_eq!(event.level, Level::Info);
//! assert_eq!(event.integrations(), Some(&["foo".to_string()][..]));
//! ```
use core::fmt;
use std::collections::BTreeMap;
use std::error::Error;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier a hub assigns to every captured event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    /// Wraps a raw id.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Severity of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Fatal,
}

/// SDK section of an event: who produced it and which integrations touched it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SdkInfo {
    pub name: String,
    pub version: String,
    /// Ordered list of integration ids. Integrations append, never replace.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub integrations: Vec<String>,
}

impl SdkInfo {
    /// Creates an SDK section with no integrations.
    pub fn new<N: Into<String>, V: Into<String>>(name: N, version: V) -> Self {
        Self { name: name.into(), version: version.into(), integrations: Vec::new() }
    }

    /// Appends an integration id.
    #[must_use]
    pub fn with_integration<S: Into<String>>(mut self, integration: S) -> Self {
        self.integrations.push(integration.into());
        self
    }
}

/// Exception payload derived from an error value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    /// `Display` output of the error.
    pub value: String,
    /// `Display` output of each `source()` in the chain, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl ExceptionInfo {
    /// Builds exception info from any error, walking its source chain.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut sources = Vec::new();
        let mut next = error.source();
        while let Some(source) = next {
            sources.push(source.to_string());
            next = source.source();
        }

        Self { value: error.to_string(), sources }
    }
}

/// A report descriptor flowing through a hub's event-processor pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: EventId,
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionInfo>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk: Option<SdkInfo>,
}

impl Event {
    /// Creates an error-level event from an error value.
    pub fn exception(event_id: EventId, error: &(dyn Error + 'static)) -> Self {
        Self {
            exception: Some(ExceptionInfo::from_error(error)),
            ..Self::empty(event_id, Level::Error)
        }
    }

    /// Creates an info-level event carrying only a message.
    pub fn message<S: Into<String>>(event_id: EventId, message: S) -> Self {
        Self { message: Some(message.into()), ..Self::empty(event_id, Level::Info) }
    }

    fn empty(event_id: EventId, level: Level) -> Self {
        Self {
            event_id,
            level,
            message: None,
            exception: None,
            extra: BTreeMap::new(),
            tags: BTreeMap::new(),
            sdk: None,
        }
    }

    /// Sets the SDK section.
    #[must_use]
    pub fn with_sdk(mut self, sdk: SdkInfo) -> Self {
        self.sdk = Some(sdk);
        self
    }

    /// Returns the SDK integration list, if the event has an SDK section.
    pub fn integrations(&self) -> Option<&[String]> {
        self.sdk.as_ref().map(|sdk| sdk.integrations.as_slice())
    }
}

/// Extra information passed alongside a capture call.
///
/// Hubs may use the original error for processors that need more than the
/// rendered [`ExceptionInfo`].
#[derive(Clone, Default)]
pub struct EventHint {
    pub original_exception: Option<super::SharedError>,
}

impl EventHint {
    /// Hint that threads the triggering error through as report metadata.
    #[inline]
    pub fn original(error: &super::SharedError) -> Self {
        Self { original_exception: Some(error.clone()) }
    }
}

impl fmt::Debug for EventHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHint")
            .field("original_exception", &self.original_exception.as_ref().map(|e| e.to_string()))
            .finish()
    }
}
