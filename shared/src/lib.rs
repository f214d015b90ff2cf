//! Shared types for staffdesk
//!
//! Employee records, drafts, REST payloads and the pure validators that run
//! before anything is sent to the server.

pub mod client;
pub mod models;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    ContactDraft, ContactInfo, ContactInfoPatch, Department, Employee, EmployeeDraft,
    EmployeePatch, EmployeeStatus, NewEmployee,
};
pub use validation::{DraftScope, FieldPath, ValidationErrors};
