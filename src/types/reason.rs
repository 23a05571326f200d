//! Values delivered with unhandled asynchronous rejections.
//!
//! A host rejects a promise with whatever value it likes. [`RejectionReason`]
//! keeps the two shapes that matter for reporting apart: error-like values
//! (reported as exceptions) and everything else (reported as a message with
//! the raw value attached as context).
//!
//! # Examples
//!
//! ```
//! use host_rail::types::RejectionReason;
//! use serde_json::json;
//!
//! let opaque = RejectionReason::from("boom");
//! assert!(!opaque.is_error_like());
//! assert_eq!(opaque.raw_value(), json!("boom"));
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
//! let error_like = RejectionReason::error(err);
//! assert!(error_like.is_error_like());
//! ```
use core::fmt;
use std::error::Error;
use std::sync::Arc;

use serde_json::Value;

/// Error value shared between the host, the adapter and the hub.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Reason attached to an unhandled asynchronous rejection.
#[derive(Clone)]
pub enum RejectionReason {
    /// An error-like value carrying a message and source chain.
    Error(SharedError),
    /// Any other value.
    Value(Value),
}

impl RejectionReason {
    /// Wraps an error value.
    pub fn error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Error(Arc::new(error))
    }

    /// Returns `true` when the reason should be reported as an exception.
    #[inline]
    pub fn is_error_like(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the error, if the reason is error-like.
    #[inline]
    pub fn as_error(&self) -> Option<&SharedError> {
        match self {
            Self::Error(error) => Some(error),
            Self::Value(_) => None,
        }
    }

    /// Returns the reason as a JSON value.
    ///
    /// Error-like reasons render to their `Display` string.
    pub fn raw_value(&self) -> Value {
        match self {
            Self::Error(error) => Value::String(error.to_string()),
            Self::Value(value) => value.clone(),
        }
    }
}

impl fmt::Debug for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => f.debug_tuple("Error").field(&error.to_string()).finish(),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => write!(f, "{error}"),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

impl From<SharedError> for RejectionReason {
    #[inline]
    fn from(error: SharedError) -> Self {
        Self::Error(error)
    }
}

impl From<Value> for RejectionReason {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for RejectionReason {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_owned()))
    }
}

impl From<String> for RejectionReason {
    #[inline]
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}
