//! Transition table for edit sessions.
//!
//! Every transition is a pure function of the current snapshot, the action and
//! the current time. A transition whose guard fails returns the snapshot it was
//! given, so callers can detect a no-op with `Arc::ptr_eq`.

use crate::action::{Action, ActionKind};
use crate::employee::Employee;
use crate::state::{Mode, SessionState};
use chrono::{DateTime, Utc};
use log::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Signature shared by all transition functions.
///
pub type TransitionFn = fn(&Arc<SessionState>, &Action, DateTime<Utc>) -> Arc<SessionState>;

/// Maps action kinds to their transition functions.
///
#[derive(Clone)]
pub struct TransitionTable {
    transitions: HashMap<ActionKind, TransitionFn>,
}

impl TransitionTable {
    /// Returns a table with no transitions registered.
    ///
    pub fn empty() -> Self {
        TransitionTable {
            transitions: HashMap::new(),
        }
    }

    /// Returns the table of the four session transitions.
    ///
    pub fn standard() -> Self {
        let mut table = TransitionTable::empty();
        table
            .register(ActionKind::StartEdit, start_edit)
            .register(ActionKind::StartAdd, start_add)
            .register(ActionKind::Save, save)
            .register(ActionKind::Cancel, cancel);
        table
    }

    /// Registers the transition for a kind, replacing any previous one.
    ///
    pub fn register(&mut self, kind: ActionKind, transition: TransitionFn) -> &mut Self {
        self.transitions.insert(kind, transition);
        self
    }

    /// Returns the transition registered for a kind.
    ///
    pub fn get(&self, kind: ActionKind) -> Option<TransitionFn> {
        self.transitions.get(&kind).copied()
    }

    /// Returns true if a transition is registered for the kind.
    ///
    pub fn contains(&self, kind: ActionKind) -> bool {
        self.transitions.contains_key(&kind)
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        TransitionTable::standard()
    }
}

impl std::fmt::Debug for TransitionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<String> = self.transitions.keys().map(|k| k.to_string()).collect();
        kinds.sort();
        f.debug_struct("TransitionTable").field("kinds", &kinds).finish()
    }
}

/// Begin editing an existing record. Requires viewing mode.
///
pub fn start_edit(
    state: &Arc<SessionState>,
    action: &Action,
    _now: DateTime<Utc>,
) -> Arc<SessionState> {
    let record = match action {
        Action::StartEdit(record) => record,
        _ => return Arc::clone(state),
    };
    if !state.can_edit() {
        return Arc::clone(state);
    }
    Arc::new(SessionState::working(
        Mode::Editing,
        record.clone(),
        Arc::clone(state.shared_records()),
        format!("Editing: {}", record.name),
    ))
}

/// Begin creating a new record. Requires viewing mode.
///
/// The proposed identifier is one past the collection length, which is fresh
/// as long as the collection is densely numbered from one.
///
pub fn start_add(
    state: &Arc<SessionState>,
    action: &Action,
    now: DateTime<Utc>,
) -> Arc<SessionState> {
    if !matches!(action, Action::StartAdd) || !state.can_add() {
        return Arc::clone(state);
    }
    let id = state.records().len() as u64 + 1;
    Arc::new(SessionState::working(
        Mode::Adding,
        Employee::blank(id, now),
        Arc::clone(state.shared_records()),
        "Adding new employee".to_string(),
    ))
}

/// Commit the record and return to viewing mode. Requires a non-viewing mode.
///
pub fn save(
    state: &Arc<SessionState>,
    action: &Action,
    _now: DateTime<Utc>,
) -> Arc<SessionState> {
    let record = match action {
        Action::Save(record) => record,
        _ => return Arc::clone(state),
    };
    let records = match state.mode() {
        Mode::Viewing => return Arc::clone(state),
        Mode::Adding => append(state.shared_records(), record),
        Mode::Editing => replace(state.shared_records(), record),
    };
    Arc::new(SessionState::viewing(records, format!("Saved: {}", record.name)))
}

/// Discard the record under edit and return to viewing mode. Requires a
/// non-viewing mode.
///
pub fn cancel(
    state: &Arc<SessionState>,
    action: &Action,
    _now: DateTime<Utc>,
) -> Arc<SessionState> {
    if !matches!(action, Action::Cancel) || state.mode().is_viewing() {
        return Arc::clone(state);
    }
    Arc::new(SessionState::viewing(
        Arc::clone(state.shared_records()),
        "Cancelled".to_string(),
    ))
}

fn append(records: &Arc<Vec<Employee>>, record: &Employee) -> Arc<Vec<Employee>> {
    let mut next = Vec::with_capacity(records.len() + 1);
    next.extend(records.iter().cloned());
    next.push(record.clone());
    Arc::new(next)
}

// Unknown identifiers are a stale edit: the collection is shared unchanged.
fn replace(records: &Arc<Vec<Employee>>, record: &Employee) -> Arc<Vec<Employee>> {
    match records.iter().position(|existing| existing.id == record.id) {
        Some(index) => {
            let mut next = records.as_ref().clone();
            next[index] = record.clone();
            Arc::new(next)
        }
        None => {
            debug!(
                "Dropping save for employee {} which is no longer in the collection",
                record.id
            );
            Arc::clone(records)
        }
    }
}
