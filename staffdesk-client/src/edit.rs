//! Single active edit session

use shared::models::Employee;
use thiserror::Error;

use crate::cache::SyncManager;
use crate::form::{FormState, SubmitOutcome};
use crate::http::EmployeeApi;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("already editing employee {id}")]
    AlreadyEditing { id: String },

    #[error("no edit in progress")]
    NotEditing,
}

/// The record being edited and its form
#[derive(Debug)]
pub struct EditSession {
    original: Employee,
    form: FormState,
}

impl EditSession {
    pub fn original(&self) -> &Employee {
        &self.original
    }

    pub fn id(&self) -> &str {
        &self.original.id
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }
}

/// Holds at most one edit session
#[derive(Debug, Default)]
pub struct EditSlot {
    active: Option<EditSession>,
}

impl EditSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, record: &Employee) -> Result<&mut EditSession, EditError> {
        if let Some(session) = &self.active {
            return Err(EditError::AlreadyEditing {
                id: session.id().to_string(),
            });
        }
        tracing::debug!(id = %record.id, "Opening edit session");
        Ok(self.active.insert(EditSession {
            original: record.clone(),
            form: FormState::for_edit(record),
        }))
    }

    pub fn active(&self) -> Option<&EditSession> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut EditSession> {
        self.active.as_mut()
    }

    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    /// Discard the session without contacting the server
    pub fn cancel(&mut self) -> Option<EditSession> {
        self.active.take()
    }

    /// Submit the edit; the slot closes only when the update was committed
    pub async fn save<A: EmployeeApi>(
        &mut self,
        sync: &SyncManager<A>,
    ) -> Result<SubmitOutcome, EditError> {
        let session = self.active.as_mut().ok_or(EditError::NotEditing)?;
        let outcome = session.form.submit(sync).await;
        if matches!(outcome, SubmitOutcome::Updated(_)) {
            self.active = None;
        }
        Ok(outcome)
    }
}
