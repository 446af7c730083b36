use chrono::{DateTime, Utc};
use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Defines employee data structure.
///
/// Employees are the records managed by an edit session. The identifier is
/// unique within a session's collection; every other field is plain data
/// populated and validated upstream.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Returns a record with the given identifier and creation time and all
    /// other fields empty.
    ///
    pub fn blank(id: u64, created_at: DateTime<Utc>) -> Employee {
        Employee {
            id,
            name: String::new(),
            email: String::new(),
            department: String::new(),
            position: String::new(),
            created_at,
        }
    }
}

/// Partial set of employee fields applied on top of an existing record.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

impl EmployeeChanges {
    /// Returns a copy of the record with every provided field replaced.
    ///
    pub fn apply(&self, employee: &Employee) -> Employee {
        let mut updated = employee.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(email) = &self.email {
            updated.email = email.clone();
        }
        if let Some(department) = &self.department {
            updated.department = department.clone();
        }
        if let Some(position) = &self.position {
            updated.position = position.clone();
        }
        updated
    }
}
