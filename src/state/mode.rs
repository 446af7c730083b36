//! Session mode types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Specifying the different session modes.
///
/// Exactly one mode holds at any time and it is the only input to transition
/// guards.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Viewing,
    Editing,
    Adding,
}

impl Mode {
    /// Returns true when no record is under edit or creation.
    ///
    pub fn is_viewing(&self) -> bool {
        matches!(self, Mode::Viewing)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Viewing
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Viewing => "viewing",
            Mode::Editing => "editing",
            Mode::Adding => "adding",
        };
        write!(f, "{}", name)
    }
}
