//! Scope discipline helpers and the in-memory reference hub.
//!
//! [`ScopeGuard`] pairs a `push_scope` with a `pop_scope` that runs on every
//! exit path, including early returns through `?` and panic unwinding.
//!
//! # Examples
//!
//! ```
//! use host_rail::hub::{MemoryHub, ScopeGuard};
//! use host_rail::traits::ReportingHub;
//! use host_rail::types::Scope;
//!
//! let hub = MemoryHub::new();
//! {
//!     let _guard = ScopeGuard::push(&hub);
//!     hub.configure_scope(&mut |scope: &mut Scope| scope.set_extra("request", 42));
//!     assert_eq!(hub.depth(), 2);
//! }
//! assert_eq!(hub.depth(), 1);
//! ```
mod memory;

pub use memory::MemoryHub;

use crate::traits::ReportingHub;

/// Pushes a scope on creation and pops it on drop.
#[must_use = "dropping the guard immediately pops the scope"]
pub struct ScopeGuard<'a, H: ReportingHub + ?Sized> {
    hub: &'a H,
}

impl<'a, H: ReportingHub + ?Sized> ScopeGuard<'a, H> {
    /// Pushes a new scope on `hub`.
    #[inline]
    pub fn push(hub: &'a H) -> Self {
        hub.push_scope();
        Self { hub }
    }

    /// Returns the guarded hub.
    #[inline]
    pub fn hub(&self) -> &'a H {
        self.hub
    }
}

impl<H: ReportingHub + ?Sized> Drop for ScopeGuard<'_, H> {
    fn drop(&mut self) {
        self.hub.pop_scope();
    }
}
