//! Interceptor configuration.
//!
//! Options follow the builder style used throughout the crate and can also be
//! deserialized (missing fields take their defaults), so they can live in an
//! application's configuration file.
//!
//! # Examples
//!
//! ```
//! use host_rail::InterceptOptions;
//!
//! let options = InterceptOptions::new()
//!     .sdk_integration("glimmer")
//!     .capture_rejections(false);
//!
//! assert_eq!(options.sdk_integration_id(), "glimmer");
//! assert!(options.captures_sync_errors());
//! assert!(!options.captures_rejections());
//!
//! let parsed: InterceptOptions = serde_json::from_str(r#"{ "integration_name": "Glimmer" }"#).unwrap();
//! assert_eq!(parsed.name(), "Glimmer");
//! assert_eq!(parsed.rejection_text(), InterceptOptions::DEFAULT_REJECTION_MESSAGE);
//! ```
use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Settings for an [`Interceptor`](crate::Interceptor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptOptions {
    integration_name: Cow<'static, str>,
    sdk_integration: Cow<'static, str>,
    rejection_message: Cow<'static, str>,
    capture_sync_errors: bool,
    capture_rejections: bool,
}

impl InterceptOptions {
    /// Human-readable integration name.
    pub const DEFAULT_NAME: &'static str = "Ember";
    /// Identifier appended to `sdk.integrations` on outgoing events.
    pub const DEFAULT_SDK_INTEGRATION: &'static str = "ember";
    /// Context note and message text used for unhandled rejections.
    pub const DEFAULT_REJECTION_MESSAGE: &'static str = "Unhandled Promise error detected";

    /// Creates options with every default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the human-readable integration name.
    #[must_use]
    pub fn integration_name<S: Into<Cow<'static, str>>>(mut self, name: S) -> Self {
        self.integration_name = name.into();
        self
    }

    /// Sets the identifier appended to `sdk.integrations`.
    #[must_use]
    pub fn sdk_integration<S: Into<Cow<'static, str>>>(mut self, id: S) -> Self {
        self.sdk_integration = id.into();
        self
    }

    /// Sets the text used for the rejection context note and message.
    #[must_use]
    pub fn rejection_message<S: Into<Cow<'static, str>>>(mut self, message: S) -> Self {
        self.rejection_message = message.into();
        self
    }

    /// Enables or disables wrapping of the host's error callback.
    #[must_use]
    pub fn capture_sync_errors(mut self, enabled: bool) -> Self {
        self.capture_sync_errors = enabled;
        self
    }

    /// Enables or disables the rejection subscription.
    #[must_use]
    pub fn capture_rejections(mut self, enabled: bool) -> Self {
        self.capture_rejections = enabled;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.integration_name
    }

    #[inline]
    pub fn sdk_integration_id(&self) -> &str {
        &self.sdk_integration
    }

    #[inline]
    pub fn rejection_text(&self) -> &str {
        &self.rejection_message
    }

    #[inline]
    pub fn captures_sync_errors(&self) -> bool {
        self.capture_sync_errors
    }

    #[inline]
    pub fn captures_rejections(&self) -> bool {
        self.capture_rejections
    }
}

impl Default for InterceptOptions {
    fn default() -> Self {
        Self {
            integration_name: Cow::Borrowed(Self::DEFAULT_NAME),
            sdk_integration: Cow::Borrowed(Self::DEFAULT_SDK_INTEGRATION),
            rejection_message: Cow::Borrowed(Self::DEFAULT_REJECTION_MESSAGE),
            capture_sync_errors: true,
            capture_rejections: true,
        }
    }
}
