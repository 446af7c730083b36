//! Replayable action scripts.
//!
//! A script is a YAML list of steps resolved against the store's current
//! snapshot one at a time, so a step can refer to records by identifier or to
//! whatever record is currently under edit.

use crate::action::Action;
use crate::employee::{Employee, EmployeeChanges};
use crate::error::AppError;
use crate::state::SessionState;
use crate::store::Store;
use log::*;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, sync::Arc};

/// Errors that can occur while reading or resolving a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Failed to read the script file
    #[error("Failed to read script {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse the script
    #[error("Failed to parse script: {0}")]
    ParseFailed(String),

    /// Step refers to an employee that is not in the collection
    #[error("Step {step}: employee {id} not found")]
    UnknownEmployee { step: usize, id: u64 },

    /// Step saves the current record but none is under edit
    #[error("Step {step}: no record is being edited or added")]
    NoCurrentRecord { step: usize },
}

/// Specify the different script steps.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    StartAdd,
    StartEdit {
        id: u64,
        #[serde(default)]
        changes: EmployeeChanges,
    },
    Save {
        employee: Employee,
    },
    SaveCurrent {
        #[serde(default)]
        changes: EmployeeChanges,
    },
    Cancel,
}

impl Step {
    /// Returns the action this step dispatches against the given snapshot.
    /// `step` is the one-based position used in error messages.
    ///
    pub fn resolve(&self, state: &SessionState, step: usize) -> Result<Action, ScriptError> {
        match self {
            Step::StartAdd => Ok(Action::StartAdd),
            Step::Cancel => Ok(Action::Cancel),
            Step::Save { employee } => Ok(Action::Save(employee.clone())),
            Step::StartEdit { id, changes } => state
                .find(*id)
                .map(|employee| Action::StartEdit(changes.apply(employee)))
                .ok_or(ScriptError::UnknownEmployee { step, id: *id }),
            Step::SaveCurrent { changes } => state
                .current_record()
                .map(|employee| Action::Save(changes.apply(employee)))
                .ok_or(ScriptError::NoCurrentRecord { step }),
        }
    }
}

/// Ordered list of steps.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    /// Returns a script from its steps.
    ///
    pub fn new(steps: Vec<Step>) -> Self {
        Script { steps }
    }

    /// Parses a script from YAML text.
    ///
    pub fn parse(contents: &str) -> Result<Self, ScriptError> {
        let steps: Vec<Step> = serde_yaml::from_str(contents)
            .map_err(|e| ScriptError::ParseFailed(e.to_string()))?;
        Ok(Script { steps })
    }

    /// Reads and parses a script file.
    ///
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path).map_err(|e| ScriptError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        Script::parse(&contents)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Dispatches every step in order and returns the snapshot after each.
    /// Stops at the first step that cannot be resolved.
    ///
    pub fn run(&self, store: &Store) -> Result<Vec<Arc<SessionState>>, AppError> {
        let mut snapshots = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            let action = step.resolve(&store.get_state(), index + 1)?;
            debug!("Running script step {}: {:?}", index + 1, action.kind());
            snapshots.push(store.dispatch(action)?);
        }
        Ok(snapshots)
    }
}
