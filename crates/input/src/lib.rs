//! Keyboard input mapped to shared fragment actions.
//!
//! # Invariants
//! - The session consumes actions, never raw key events.
//! - Unbound keys resolve to `Action::Noop`.

pub mod action;
pub mod bindings;

pub use action::Action;
pub use bindings::{Bindings, Key};
