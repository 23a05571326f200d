//! Conversion of host-side values into a [`RejectionReason`].
//!
//! Hosts hand whatever a rejected promise carried to
//! [`Runtime::reject`](crate::host::Runtime::reject). This trait classifies
//! that value once, at the boundary:
//!
//! - [`SharedError`] becomes [`RejectionReason::Error`] (error-like)
//! - `serde_json::Value`, `String` and `&str` become [`RejectionReason::Value`]
//! - [`RejectionReason`] converts to itself
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use host_rail::traits::IntoRejectionReason;
//! use host_rail::SharedError;
//!
//! let error: SharedError = Arc::new(std::io::Error::new(std::io::ErrorKind::Other, "timeout"));
//! assert!(error.into_rejection_reason().is_error_like());
//!
//! let opaque = serde_json::json!({ "code": 7 }).into_rejection_reason();
//! assert_eq!(opaque.raw_value(), serde_json::json!({ "code": 7 }));
//! ```
use serde_json::Value;

use crate::types::{RejectionReason, SharedError};

/// Converts a rejected value into a classified [`RejectionReason`].
///
/// Implement it for host-specific payload types that should be reported as
/// something other than their default shape.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a rejection reason",
    label = "this type does not implement `IntoRejectionReason`",
    note = "wrap errors in `Arc` to make them a `SharedError`, or convert the value to `serde_json::Value`"
)]
pub trait IntoRejectionReason {
    fn into_rejection_reason(self) -> RejectionReason;
}

impl IntoRejectionReason for RejectionReason {
    #[inline]
    fn into_rejection_reason(self) -> RejectionReason {
        self
    }
}

impl IntoRejectionReason for SharedError {
    #[inline]
    fn into_rejection_reason(self) -> RejectionReason {
        RejectionReason::Error(self)
    }
}

impl IntoRejectionReason for Value {
    #[inline]
    fn into_rejection_reason(self) -> RejectionReason {
        RejectionReason::Value(self)
    }
}

impl IntoRejectionReason for String {
    #[inline]
    fn into_rejection_reason(self) -> RejectionReason {
        RejectionReason::from(self)
    }
}

impl IntoRejectionReason for &str {
    #[inline]
    fn into_rejection_reason(self) -> RejectionReason {
        RejectionReason::from(self)
    }
}
