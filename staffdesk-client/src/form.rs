//! Form state for adding and editing an employee
//!
//! Fields are addressed by path (`firstName`, `contactInfo.email`). Submitting
//! validates locally first; only a clean draft reaches the sync manager.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use shared::models::{Employee, EmployeeDraft};
use shared::validation::{self, DraftScope, FieldPath, UnknownFieldPath, ValidationErrors};
use thiserror::Error;

use crate::cache::SyncManager;
use crate::error::{FailureKind, Operation};
use crate::http::EmployeeApi;

/// What a submit does with a valid draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    pub fn scope(&self) -> DraftScope {
        match self {
            Self::Create => DraftScope::Create,
            Self::Edit { .. } => DraftScope::Edit,
        }
    }

    fn operation(&self) -> Operation {
        match self {
            Self::Create => Operation::Create,
            Self::Edit { .. } => Operation::Update,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldPath),

    #[error("{0} cannot be changed here")]
    ReadOnly(FieldPath),
}

/// Result of one submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid,
    Created(Employee),
    /// Merged record, or `None` when it left the cache meanwhile
    Updated(Option<Employee>),
    /// The server call failed; `message` is also kept as the submission error
    Failed { message: String, kind: FailureKind },
}

/// Read-only view of a form's in-flight flag
#[derive(Debug, Clone)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Raises the flag for its lifetime
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn engage(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag.clone())
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct FormState {
    mode: FormMode,
    initial: EmployeeDraft,
    draft: EmployeeDraft,
    errors: ValidationErrors,
    submit_error: Option<String>,
    success_message: Option<String>,
    in_flight: Arc<AtomicBool>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Blank "add employee" form
    pub fn new() -> Self {
        Self::with_draft(FormMode::Create, EmployeeDraft::template())
    }

    /// Form pre-filled from a committed record
    pub fn for_edit(emp: &Employee) -> Self {
        Self::with_draft(
            FormMode::Edit { id: emp.id.clone() },
            EmployeeDraft::from_employee(emp),
        )
    }

    fn with_draft(mode: FormMode, draft: EmployeeDraft) -> Self {
        Self {
            mode,
            initial: draft.clone(),
            draft,
            errors: ValidationErrors::new(),
            submit_error: None,
            success_message: None,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &EmployeeDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, path: FieldPath) -> Option<&str> {
        self.errors.get(path)
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Handle for disabling controls while a submit is pending
    pub fn in_flight(&self) -> InFlight {
        InFlight(self.in_flight.clone())
    }

    /// Set the leaf named by `path` and clear the error at exactly that path
    pub fn set_field(&mut self, path: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.set(path.parse()?, value)
    }

    pub fn set(&mut self, path: FieldPath, value: impl Into<String>) -> Result<(), FormError> {
        if !self.mode.scope().is_editable(path) {
            return Err(FormError::ReadOnly(path));
        }
        self.draft.set(path, value);
        self.errors.clear(path);
        Ok(())
    }

    /// Back to the template (create) or the original record (edit)
    pub fn reset(&mut self) {
        self.draft = self.initial.clone();
        self.errors = ValidationErrors::new();
        self.submit_error = None;
    }

    /// Validate, then create or update through `sync`
    pub async fn submit<A: EmployeeApi>(&mut self, sync: &SyncManager<A>) -> SubmitOutcome {
        self.submit_error = None;
        self.success_message = None;

        let scope = self.mode.scope();
        let valid = match validation::validate(&self.draft, scope) {
            Ok(valid) => valid,
            Err(errors) => {
                tracing::debug!(errors = %errors, "Draft failed validation");
                self.errors = errors;
                return SubmitOutcome::Invalid;
            }
        };
        self.errors = ValidationErrors::new();

        let _flight = InFlightGuard::engage(&self.in_flight);
        let mode = self.mode.clone();
        let result = match &mode {
            FormMode::Create => sync
                .create(&valid.into_new_employee())
                .await
                .map(|emp| {
                    self.reset();
                    self.success_message = Some(format!(
                        "Employee added successfully with ID: {}",
                        emp.display_id()
                    ));
                    SubmitOutcome::Created(emp)
                }),
            FormMode::Edit { id } => sync.update(id, &valid.into_patch()).await.map(|merged| {
                self.success_message = Some("Employee updated successfully".into());
                SubmitOutcome::Updated(merged)
            }),
        };

        result.unwrap_or_else(|e| {
            let message = e.user_message(mode.operation());
            self.submit_error = Some(message.clone());
            SubmitOutcome::Failed {
                message,
                kind: e.kind(),
            }
        })
    }
}
