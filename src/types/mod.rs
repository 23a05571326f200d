//! Data types shared by the adapter and its collaborators.
//!
//! # Examples
//!
//! ```
//! use host_rail::types::{Event, EventId, RejectionReason, Scope};
//!
//! let mut scope = Scope::new();
//! scope.set_extra("reason", RejectionReason::from("boom").raw_value());
//!
//! let event = Event::message(EventId::new(7), "Unhandled Promise error detected");
//! assert!(event.sdk.is_none());
//! assert_eq!(scope.extras().len(), 1);
//! ```
pub mod event;
pub mod reason;
pub mod scope;

pub use event::*;
pub use reason::*;
pub use scope::*;
