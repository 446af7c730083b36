//! Guarded edit sessions over a collection of employee records.
//!
//! A [`Store`] holds an immutable [`SessionState`] snapshot that moves between
//! viewing, editing and adding modes as [`Action`]s are dispatched. Actions
//! that are not legal in the current mode leave the snapshot unchanged.

pub mod action;
pub mod config;
pub mod employee;
pub mod error;
pub mod logger;
pub mod script;
pub mod state;
pub mod store;

pub use action::{Action, ActionKind};
pub use employee::{Employee, EmployeeChanges};
pub use error::{AppError, AppResult};
pub use state::{Mode, SessionState};
pub use store::{Dispatched, Store, StoreError, Subscription};
