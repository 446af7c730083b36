use super::error::StateError;
use super::mode::Mode;
use crate::employee::Employee;
use std::collections::HashSet;
use std::sync::Arc;

/// Houses one immutable snapshot of an edit session.
///
/// Snapshots are never mutated after construction. Transitions build a new
/// value and share the record collection with the previous snapshot until
/// they need to change it.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    mode: Mode,
    current_record: Option<Employee>,
    records: Arc<Vec<Employee>>,
    last_action: String,
}

/// Defines an empty session in viewing mode.
///
impl Default for SessionState {
    fn default() -> SessionState {
        SessionState {
            mode: Mode::Viewing,
            current_record: None,
            records: Arc::new(vec![]),
            last_action: String::new(),
        }
    }
}

impl SessionState {
    /// Returns a viewing session over the seed collection, or an error if two
    /// seed records share an identifier or the identifiers are not exactly
    /// `1..=n` for a seed of `n` records.
    ///
    /// New records are numbered one past the collection length, which is only
    /// fresh when the seed is densely numbered.
    ///
    pub fn seeded(records: Vec<Employee>) -> Result<Self, StateError> {
        let len = records.len() as u64;
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(StateError::DuplicateIdentifier { id: record.id });
            }
        }
        if let Some(record) = records.iter().find(|record| record.id == 0 || record.id > len) {
            return Err(StateError::IdentifierOutOfRange {
                id: record.id,
                len,
            });
        }
        Ok(SessionState {
            records: Arc::new(records),
            ..SessionState::default()
        })
    }

    pub(crate) fn viewing(records: Arc<Vec<Employee>>, last_action: String) -> Self {
        SessionState {
            mode: Mode::Viewing,
            current_record: None,
            records,
            last_action,
        }
    }

    pub(crate) fn working(
        mode: Mode,
        record: Employee,
        records: Arc<Vec<Employee>>,
        last_action: String,
    ) -> Self {
        debug_assert!(!mode.is_viewing(), "working state requires a non-viewing mode");
        SessionState {
            mode,
            current_record: Some(record),
            records,
            last_action,
        }
    }

    /// Returns the current mode.
    ///
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the record under edit or creation, if any.
    ///
    pub fn current_record(&self) -> Option<&Employee> {
        self.current_record.as_ref()
    }

    /// Returns the working collection in order.
    ///
    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    /// Returns the shared handle to the working collection.
    ///
    pub fn shared_records(&self) -> &Arc<Vec<Employee>> {
        &self.records
    }

    /// Returns the description of the last committed transition.
    ///
    pub fn last_action(&self) -> &str {
        &self.last_action
    }

    /// Returns the record with the given identifier, if present.
    ///
    pub fn find(&self, id: u64) -> Option<&Employee> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Returns true if an edit may be started.
    ///
    pub fn can_edit(&self) -> bool {
        self.mode == Mode::Viewing
    }

    /// Returns true if an addition may be started.
    ///
    pub fn can_add(&self) -> bool {
        self.mode == Mode::Viewing
    }
}
