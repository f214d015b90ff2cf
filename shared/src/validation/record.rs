//! Record validator - runs every field check against a draft

use super::field;
use super::path::FieldPath;
use crate::models::{
    ContactInfo, ContactInfoPatch, DEFAULT_LEAVE_BALANCE, Department, EmployeeDraft,
    EmployeePatch, EmployeeStatus, NewEmployee,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which form the draft came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftScope {
    /// Adding an employee; leave balance is fixed to the default
    Create,
    /// Editing a committed employee; leave balance is editable
    Edit,
}

impl DraftScope {
    /// Whether the user may type into `path` in this scope
    pub fn is_editable(&self, path: FieldPath) -> bool {
        !(matches!(self, Self::Create) && path == FieldPath::LeaveBalance)
    }
}

/// Path-keyed validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FieldPath, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, path: FieldPath) -> Option<&str> {
        self.0.get(&path).map(String::as_str)
    }

    pub fn contains(&self, path: FieldPath) -> bool {
        self.0.contains_key(&path)
    }

    pub fn insert(&mut self, path: FieldPath, message: impl Into<String>) {
        self.0.insert(path, message.into());
    }

    /// Drop the message at exactly `path`; returns whether one existed
    pub fn clear(&mut self, path: FieldPath) -> bool {
        self.0.remove(&path).is_some()
    }

    pub fn paths(&self) -> impl Iterator<Item = FieldPath> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &str)> {
        self.0.iter().map(|(p, m)| (*p, m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (path, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{path}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A draft that passed every check, with values trimmed and coerced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEmployee {
    pub first_name: String,
    pub last_name: String,
    pub department: Department,
    pub position: String,
    pub status: EmployeeStatus,
    pub salary: u64,
    pub hire_date: String,
    pub leave_balance: u32,
    pub contact_info: ContactInfo,
}

impl ValidatedEmployee {
    /// Create payload; a new hire never has a last leave date
    pub fn into_new_employee(self) -> NewEmployee {
        NewEmployee {
            first_name: self.first_name,
            last_name: self.last_name,
            department: self.department,
            position: self.position,
            status: self.status,
            salary: self.salary,
            hire_date: self.hire_date,
            last_leave_date: None,
            leave_balance: self.leave_balance,
            contact_info: self.contact_info,
        }
    }

    /// Update payload carrying every editable field
    pub fn into_patch(self) -> EmployeePatch {
        EmployeePatch {
            first_name: Some(self.first_name),
            last_name: Some(self.last_name),
            department: Some(self.department),
            position: Some(self.position),
            status: Some(self.status),
            salary: Some(self.salary),
            hire_date: Some(self.hire_date),
            leave_balance: Some(self.leave_balance),
            contact_info: Some(ContactInfoPatch {
                email: Some(self.contact_info.email),
                phone: Some(self.contact_info.phone),
            }),
        }
    }
}

/// Check every field without short-circuiting.
pub fn check(draft: &EmployeeDraft, scope: DraftScope) -> ValidationErrors {
    let checks: [(FieldPath, fn(&str) -> Option<String>); 9] = [
        (FieldPath::FirstName, field::first_name),
        (FieldPath::LastName, field::last_name),
        (FieldPath::Department, field::department),
        (FieldPath::Position, field::position),
        (FieldPath::Status, field::status),
        (FieldPath::Salary, field::salary),
        (FieldPath::HireDate, field::hire_date),
        (FieldPath::ContactEmail, field::email),
        (FieldPath::ContactPhone, field::phone),
    ];

    let mut errors = ValidationErrors::new();
    for (path, rule) in checks {
        if let Some(message) = rule(draft.get(path)) {
            errors.insert(path, message);
        }
    }
    if scope == DraftScope::Edit
        && let Some(message) = field::leave_balance(draft.get(FieldPath::LeaveBalance))
    {
        errors.insert(FieldPath::LeaveBalance, message);
    }
    errors
}

/// Validate a draft and, when clean, coerce it into typed values.
pub fn validate(
    draft: &EmployeeDraft,
    scope: DraftScope,
) -> Result<ValidatedEmployee, ValidationErrors> {
    let errors = check(draft, scope);
    if !errors.is_empty() {
        return Err(errors);
    }

    // Every parse below was proven by `check`; a mismatch means the rules drifted
    let coerce_error = |path: FieldPath| {
        let mut errors = ValidationErrors::new();
        errors.insert(path, "Invalid value");
        errors
    };

    let department = draft
        .department
        .parse::<Department>()
        .map_err(|_| coerce_error(FieldPath::Department))?;
    let status = draft
        .status
        .parse::<EmployeeStatus>()
        .map_err(|_| coerce_error(FieldPath::Status))?;
    let salary = draft
        .salary
        .trim()
        .parse::<u64>()
        .map_err(|_| coerce_error(FieldPath::Salary))?;
    let leave_balance = match scope {
        DraftScope::Create => DEFAULT_LEAVE_BALANCE,
        DraftScope::Edit => draft
            .leave_balance
            .trim()
            .parse::<u32>()
            .map_err(|_| coerce_error(FieldPath::LeaveBalance))?,
    };

    Ok(ValidatedEmployee {
        first_name: draft.first_name.trim().to_string(),
        last_name: draft.last_name.trim().to_string(),
        department,
        position: draft.position.trim().to_string(),
        status,
        salary,
        hire_date: draft.hire_date.trim().to_string(),
        leave_balance,
        contact_info: ContactInfo {
            email: draft.contact_info.email.trim().to_string(),
            phone: draft.contact_info.phone.trim().to_string(),
        },
    })
}
