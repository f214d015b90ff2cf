//! REST payloads exchanged with the employee API
//!
//! | Operation | Method & path |
//! |-----------|---------------|
//! | login     | `POST /login` |
//! | list      | `GET /employees` |
//! | create    | `POST /employees` |
//! | update    | `PUT /employees/:id` |
//! | remove    | `DELETE /employees/:id` |

use crate::models::Employee;
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response; the token is optional even on success
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

// =============================================================================
// Employee API DTOs
// =============================================================================

/// `GET /employees` body. Pagination fields, if any, are ignored.
///
/// Rows are kept raw so each one decodes on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeListResponse {
    #[serde(default)]
    pub employees: Option<Vec<serde_json::Value>>,
}

impl EmployeeListResponse {
    /// Decode every row; a bad row yields its own error instead of failing the list
    pub fn into_rows(self) -> Vec<Result<Employee, serde_json::Error>> {
        self.employees
            .unwrap_or_default()
            .into_iter()
            .map(serde_json::from_value)
            .collect()
    }
}

/// Acknowledgment-only create answer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAck {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "employeeID", default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// `POST /employees` body: either the committed record or an acknowledgment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreateEmployeeResponse {
    Record(Employee),
    Ack(CreateAck),
}

/// Body of a non-2xx answer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// `error` wins over `message`; blank strings count as absent
    pub fn user_message(&self) -> Option<&str> {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;

    #[test]
    fn test_create_response_accepts_ack() {
        let resp: CreateEmployeeResponse = serde_json::from_str(
            r#"{"message":"Employee added successfully","employeeID":"JODO00042"}"#,
        )
        .unwrap();
        match resp {
            CreateEmployeeResponse::Ack(ack) => {
                assert_eq!(ack.employee_id.as_deref(), Some("JODO00042"));
                assert!(ack.id.is_none());
            }
            CreateEmployeeResponse::Record(_) => panic!("expected ack"),
        }
    }

    #[test]
    fn test_create_response_prefers_full_record() {
        let resp: CreateEmployeeResponse = serde_json::from_str(
            r#"{"id":"1","firstName":"A","lastName":"B","department":"Sales",
                "position":"Rep","status":"Active","salary":10,"hireDate":"2024-01-01",
                "leaveBalance":20,"contactInfo":{"email":"a@b.c","phone":"1234567890"}}"#,
        )
        .unwrap();
        assert!(matches!(resp, CreateEmployeeResponse::Record(e) if e.id == "1"));
    }

    #[test]
    fn test_list_tolerates_missing_or_null_employees() {
        let resp: EmployeeListResponse = serde_json::from_str(r#"{"employees":null}"#).unwrap();
        assert!(resp.employees.is_none());
        let resp: EmployeeListResponse =
            serde_json::from_str(r#"{"pagination":{"currentPage":1}}"#).unwrap();
        assert!(resp.employees.is_none());
        assert!(resp.into_rows().is_empty());
    }

    #[test]
    fn test_list_rows_decode_independently() {
        let resp: EmployeeListResponse = serde_json::from_str(
            r#"{"employees":[
                {"_id":"1","firstName":"A","lastName":"B","department":"Sales","position":"Rep",
                 "status":"Active","salary":10,"hireDate":"2024-01-01",
                 "contactInfo":{"email":"a@b.c","phone":"1234567890"}},
                {"_id":"2","firstName":"C","lastName":"D","department":"engineering","position":"Dev",
                 "status":"active","salary":10,"hireDate":"2024-01-01",
                 "contactInfo":{"email":"c@d.e","phone":"1234567890"}},
                {"_id":"3","firstName":"E","lastName":"F","department":"Legal","position":"Counsel",
                 "status":"Active","salary":10,"hireDate":"2024-01-01",
                 "contactInfo":{"email":"e@f.g","phone":"1234567890"}}
            ]}"#,
        )
        .unwrap();

        let rows = resp.into_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].as_ref().unwrap().department, Department::Sales);
        assert_eq!(rows[1].as_ref().unwrap().department, Department::Engineering);
        assert!(rows[2].is_err());
    }

    #[test]
    fn test_error_body_prefers_error_field() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error":"Employee not found","message":"ignored"}"#).unwrap();
        assert_eq!(body.user_message(), Some("Employee not found"));
        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"Unauthorized access"}"#).unwrap();
        assert_eq!(body.user_message(), Some("Unauthorized access"));
        let body: ApiErrorBody = serde_json::from_str(r#"{"error":""}"#).unwrap();
        assert_eq!(body.user_message(), None);
    }
}
