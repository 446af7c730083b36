use crate::employee::Employee;
use std::fmt;

/// Specify the actions a session store accepts.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    StartEdit(Employee),
    StartAdd,
    Save(Employee),
    Cancel,
}

/// Specify the payload-free discriminant of an action.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    StartEdit,
    StartAdd,
    Save,
    Cancel,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::StartEdit,
        ActionKind::StartAdd,
        ActionKind::Save,
        ActionKind::Cancel,
    ];
}

impl Action {
    /// Returns the kind used to look up the action's transition.
    ///
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::StartEdit(_) => ActionKind::StartEdit,
            Action::StartAdd => ActionKind::StartAdd,
            Action::Save(_) => ActionKind::Save,
            Action::Cancel => ActionKind::Cancel,
        }
    }

    /// Returns the record carried by the action, if any.
    ///
    pub fn record(&self) -> Option<&Employee> {
        match self {
            Action::StartEdit(record) | Action::Save(record) => Some(record),
            Action::StartAdd | Action::Cancel => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::StartEdit => "start_edit",
            ActionKind::StartAdd => "start_add",
            ActionKind::Save => "save",
            ActionKind::Cancel => "cancel",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    #[test]
    fn kind_matches_variant() {
        let employee: Employee = Faker.fake();
        assert_eq!(Action::StartEdit(employee.to_owned()).kind(), ActionKind::StartEdit);
        assert_eq!(Action::StartAdd.kind(), ActionKind::StartAdd);
        assert_eq!(Action::Save(employee).kind(), ActionKind::Save);
        assert_eq!(Action::Cancel.kind(), ActionKind::Cancel);
    }

    #[test]
    fn record_payload() {
        let employee: Employee = Faker.fake();
        assert_eq!(Action::Save(employee.to_owned()).record(), Some(&employee));
        assert_eq!(Action::Cancel.record(), None);
        assert_eq!(Action::StartAdd.record(), None);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ActionKind::StartEdit.to_string(), "start_edit");
        assert_eq!(ActionKind::StartAdd.to_string(), "start_add");
        assert_eq!(ActionKind::Save.to_string(), "save");
        assert_eq!(ActionKind::Cancel.to_string(), "cancel");
    }
}
