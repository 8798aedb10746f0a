//! Fragment control: move, rotate, collision check and settle against a grid.
//!
//! # Invariants
//! - A rejected move leaves both transforms exactly as they were.
//! - A failed drop leaves the grid and the fragment unchanged.
//! - The grid is owned by the session, never by global state.

mod control;
mod fragment;
mod session;

pub use control::{Collision, Control, ControlError};
pub use fragment::{Fragment, Shape};
pub use session::{Outcome, Session, SessionConfig, SessionError};
