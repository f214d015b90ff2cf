//! Employee Model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leave balance granted to every new hire
pub const DEFAULT_LEAVE_BALANCE: u32 = 20;

/// Department an employee belongs to
///
/// Decoding ignores case and surrounding whitespace; rows edited through free
/// text on the server may read `engineering` or `Hr `.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Department {
    Engineering,
    #[serde(rename = "HR")]
    Hr,
    Marketing,
    Sales,
    Finance,
}

impl Department {
    /// All departments, in the order the console offers them
    pub const ALL: [Department; 5] = [
        Department::Engineering,
        Department::Hr,
        Department::Marketing,
        Department::Sales,
        Department::Finance,
    ];

    /// Wire and display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engineering => "Engineering",
            Self::Hr => "HR",
            Self::Marketing => "Marketing",
            Self::Sales => "Sales",
            Self::Finance => "Finance",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Department {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Employment status
///
/// The create form offers `Active / On Leave / Terminated` while the edit form
/// offers `Active / On Leave / Inactive`. Both lists are kept as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum EmployeeStatus {
    #[default]
    Active,
    #[serde(rename = "On Leave")]
    OnLeave,
    Terminated,
    Inactive,
}

impl EmployeeStatus {
    /// Every status the backend may hold
    pub const ALL: [EmployeeStatus; 4] = [
        EmployeeStatus::Active,
        EmployeeStatus::OnLeave,
        EmployeeStatus::Terminated,
        EmployeeStatus::Inactive,
    ];

    /// Options offered when adding an employee
    pub const CREATE_OPTIONS: [EmployeeStatus; 3] = [
        EmployeeStatus::Active,
        EmployeeStatus::OnLeave,
        EmployeeStatus::Terminated,
    ];

    /// Options offered when editing an employee
    pub const EDIT_OPTIONS: [EmployeeStatus; 3] = [
        EmployeeStatus::Active,
        EmployeeStatus::OnLeave,
        EmployeeStatus::Inactive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "On Leave",
            Self::Terminated => "Terminated",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Department {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| serde::de::Error::custom(UnknownVariant(raw)))
    }
}

impl<'de> Deserialize<'de> for EmployeeStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| serde::de::Error::custom(UnknownVariant(raw)))
    }
}

/// Returned when a string names no known enum variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

/// Contact details, always validated with the parent record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

/// Employee as held by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Server identity, used in `/employees/:id`
    #[serde(alias = "_id", default)]
    pub id: String,
    /// Human readable badge id (e.g. `JODO01234`)
    #[serde(rename = "employeeID", default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub department: Department,
    pub position: String,
    pub status: EmployeeStatus,
    pub salary: u64,
    /// ISO calendar date (`YYYY-MM-DD`)
    pub hire_date: String,
    #[serde(default)]
    pub last_leave_date: Option<String>,
    #[serde(default)]
    pub leave_balance: u32,
    pub contact_info: ContactInfo,
}

impl Employee {
    /// Commit a create payload under the identity the server assigned
    pub fn from_new(id: impl Into<String>, employee_id: Option<String>, new: NewEmployee) -> Self {
        Self {
            id: id.into(),
            employee_id,
            first_name: new.first_name,
            last_name: new.last_name,
            department: new.department,
            position: new.position,
            status: new.status,
            salary: new.salary,
            hire_date: new.hire_date,
            last_leave_date: new.last_leave_date,
            leave_balance: new.leave_balance,
            contact_info: new.contact_info,
        }
    }

    /// `first last`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Badge id when the server issued one, identity otherwise
    pub fn display_id(&self) -> &str {
        self.employee_id.as_deref().unwrap_or(&self.id)
    }

    /// Shallow merge of `patch` into this record.
    ///
    /// `contactInfo` is merged leaf by leaf so a partial contact edit keeps the
    /// untouched field.
    pub fn apply_patch(&mut self, patch: &EmployeePatch) {
        if let Some(v) = &patch.first_name {
            self.first_name = v.clone();
        }
        if let Some(v) = &patch.last_name {
            self.last_name = v.clone();
        }
        if let Some(v) = patch.department {
            self.department = v;
        }
        if let Some(v) = &patch.position {
            self.position = v.clone();
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.salary {
            self.salary = v;
        }
        if let Some(v) = &patch.hire_date {
            self.hire_date = v.clone();
        }
        if let Some(v) = patch.leave_balance {
            self.leave_balance = v;
        }
        if let Some(contact) = &patch.contact_info {
            if let Some(email) = &contact.email {
                self.contact_info.email = email.clone();
            }
            if let Some(phone) = &contact.phone {
                self.contact_info.phone = phone.clone();
            }
        }
    }
}

/// Create employee payload (no identity yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub department: Department,
    pub position: String,
    pub status: EmployeeStatus,
    pub salary: u64,
    pub hire_date: String,
    pub last_leave_date: Option<String>,
    pub leave_balance: u32,
    pub contact_info: ContactInfo,
}

/// Partial contact update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Update employee payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_balance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfoPatch>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            id: "65f0c1".into(),
            employee_id: Some("JADO01234".into()),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            department: Department::Engineering,
            position: "Software Engineer".into(),
            status: EmployeeStatus::Active,
            salary: 85_000,
            hire_date: "2023-04-01".into(),
            last_leave_date: None,
            leave_balance: 20,
            contact_info: ContactInfo {
                email: "x@y.z".into(),
                phone: "1112223333".into(),
            },
        }
    }

    #[test]
    fn test_patch_merges_contact_leaf_by_leaf() {
        let mut emp = sample();
        let patch = EmployeePatch {
            contact_info: Some(ContactInfoPatch {
                email: Some("jane@corp.io".into()),
                phone: None,
            }),
            ..Default::default()
        };
        emp.apply_patch(&patch);
        assert_eq!(emp.contact_info.email, "jane@corp.io");
        assert_eq!(emp.contact_info.phone, "1112223333");
    }

    #[test]
    fn test_patch_touches_only_given_fields() {
        let mut emp = sample();
        let before = emp.clone();
        emp.apply_patch(&EmployeePatch {
            department: Some(Department::Sales),
            ..Default::default()
        });
        assert_eq!(emp.department, Department::Sales);
        assert_eq!(emp.contact_info, before.contact_info);
        assert_eq!(emp.first_name, before.first_name);
        assert_eq!(emp.salary, before.salary);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["employeeID"], "JADO01234");
        assert_eq!(json["status"], "Active");
        assert_eq!(json["department"], "Engineering");
        assert_eq!(json["contactInfo"]["phone"], "1112223333");
        assert!(json["lastLeaveDate"].is_null());
    }

    #[test]
    fn test_deserialize_accepts_mongo_identity() {
        let emp: Employee = serde_json::from_str(
            r#"{"_id":"abc","firstName":"A","lastName":"B","department":"HR",
                "position":"P","status":"On Leave","salary":1,"hireDate":"2024-01-01",
                "contactInfo":{"email":"a@b.c","phone":"1234567890"}}"#,
        )
        .unwrap();
        assert_eq!(emp.id, "abc");
        assert_eq!(emp.department, Department::Hr);
        assert_eq!(emp.status, EmployeeStatus::OnLeave);
        assert_eq!(emp.leave_balance, 0);
        assert_eq!(emp.display_id(), "abc");
    }

    #[test]
    fn test_empty_patch_serializes_to_empty_object() {
        let patch = EmployeePatch::default();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
    }

    #[test]
    fn test_status_option_lists_differ() {
        assert!(EmployeeStatus::CREATE_OPTIONS.contains(&EmployeeStatus::Terminated));
        assert!(!EmployeeStatus::EDIT_OPTIONS.contains(&EmployeeStatus::Terminated));
        assert!(EmployeeStatus::EDIT_OPTIONS.contains(&EmployeeStatus::Inactive));
        assert_eq!("On Leave".parse::<EmployeeStatus>(), Ok(EmployeeStatus::OnLeave));
        assert!("Retired".parse::<EmployeeStatus>().is_err());
    }

    #[test]
    fn test_enum_decoding_ignores_case_and_padding() {
        let dept: Department = serde_json::from_str(r#""engineering""#).unwrap();
        assert_eq!(dept, Department::Engineering);
        let dept: Department = serde_json::from_str(r#"" hr ""#).unwrap();
        assert_eq!(dept, Department::Hr);
        let status: EmployeeStatus = serde_json::from_str(r#""on leave""#).unwrap();
        assert_eq!(status, EmployeeStatus::OnLeave);

        assert!(serde_json::from_str::<Department>(r#""Legal""#).is_err());
        // Encoding keeps the canonical spelling
        assert_eq!(serde_json::to_string(&Department::Hr).unwrap(), r#""HR""#);
    }
}
