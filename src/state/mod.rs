//! Session state module.
//!
//! This module contains the value types of an edit session:
//! - `Mode`, the viewing/editing/adding discriminator
//! - `SessionState`, the immutable snapshot published by the store
//! - State error handling

mod error;
mod mode;
mod session;

pub use error::StateError;
pub use mode::Mode;
pub use session::SessionState;
