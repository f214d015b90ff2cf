//! Staffdesk Client - employee records sync engine
//!
//! Talks to the employee REST API, keeps a confirmed-only cache of the
//! collection, and drives the add/edit forms that feed it.

pub mod auth;
pub mod cache;
pub mod config;
pub mod edit;
pub mod error;
pub mod form;
pub mod http;
pub mod logger;
pub mod search;

#[cfg(test)]
mod testing;

pub use auth::{AuthSession, LoginState, SessionToken, StaticToken, TokenProvider};
pub use cache::{RecordLifecycle, RefreshOutcome, SyncManager};
pub use config::ClientConfig;
pub use edit::{EditError, EditSession, EditSlot};
pub use error::{ClientError, ClientResult, FailureKind, Operation};
pub use form::{FormError, FormMode, FormState, InFlight, SubmitOutcome};
pub use http::{EmployeeApi, NetworkHttpClient};

// Re-export shared types for convenience
pub use shared::client::LoginResponse;
pub use shared::models::{Department, Employee, EmployeePatch, EmployeeStatus, NewEmployee};
