//! Employee draft - the in-progress record behind a form

use super::employee::{DEFAULT_LEAVE_BALANCE, Employee, EmployeeStatus};
use crate::validation::FieldPath;
use serde::{Deserialize, Serialize};

/// Contact leaves of a draft
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub email: String,
    pub phone: String,
}

/// Raw user input for one employee.
///
/// Every value is kept exactly as typed; trimming and coercion happen only in
/// the record validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    pub position: String,
    pub status: String,
    pub salary: String,
    pub hire_date: String,
    pub leave_balance: String,
    pub contact_info: ContactDraft,
}

impl Default for EmployeeDraft {
    fn default() -> Self {
        Self::template()
    }
}

impl EmployeeDraft {
    /// Blank "add employee" template
    pub fn template() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            department: String::new(),
            position: String::new(),
            status: EmployeeStatus::Active.as_str().to_string(),
            salary: String::new(),
            hire_date: String::new(),
            leave_balance: DEFAULT_LEAVE_BALANCE.to_string(),
            contact_info: ContactDraft::default(),
        }
    }

    /// Draft pre-filled from a committed record (edit sessions)
    pub fn from_employee(emp: &Employee) -> Self {
        Self {
            first_name: emp.first_name.clone(),
            last_name: emp.last_name.clone(),
            department: emp.department.as_str().to_string(),
            position: emp.position.clone(),
            status: emp.status.as_str().to_string(),
            salary: emp.salary.to_string(),
            hire_date: emp.hire_date.clone(),
            leave_balance: emp.leave_balance.to_string(),
            contact_info: ContactDraft {
                email: emp.contact_info.email.clone(),
                phone: emp.contact_info.phone.clone(),
            },
        }
    }

    pub fn get(&self, path: FieldPath) -> &str {
        match path {
            FieldPath::FirstName => &self.first_name,
            FieldPath::LastName => &self.last_name,
            FieldPath::Department => &self.department,
            FieldPath::Position => &self.position,
            FieldPath::Status => &self.status,
            FieldPath::Salary => &self.salary,
            FieldPath::HireDate => &self.hire_date,
            FieldPath::LeaveBalance => &self.leave_balance,
            FieldPath::ContactEmail => &self.contact_info.email,
            FieldPath::ContactPhone => &self.contact_info.phone,
        }
    }

    /// Replace a single leaf, leaving every sibling untouched
    pub fn set(&mut self, path: FieldPath, value: impl Into<String>) {
        let slot = match path {
            FieldPath::FirstName => &mut self.first_name,
            FieldPath::LastName => &mut self.last_name,
            FieldPath::Department => &mut self.department,
            FieldPath::Position => &mut self.position,
            FieldPath::Status => &mut self.status,
            FieldPath::Salary => &mut self.salary,
            FieldPath::HireDate => &mut self.hire_date,
            FieldPath::LeaveBalance => &mut self.leave_balance,
            FieldPath::ContactEmail => &mut self.contact_info.email,
            FieldPath::ContactPhone => &mut self.contact_info.phone,
        };
        *slot = value.into();
    }
}
