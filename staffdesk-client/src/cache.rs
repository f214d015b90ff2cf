//! Record cache and sync manager
//!
//! The cache mirrors the server's collection. Nothing is written until the
//! server confirms it: creates insert the returned record, updates merge the
//! submitted patch, removes drop the entry. A failed call leaves the cache as
//! it was.
//!
//! Refreshes replace the whole collection and are numbered in issue order. A
//! list that arrives after a newer one was applied is discarded. Mutations
//! confirmed while a refresh is in flight are journaled and replayed onto the
//! fresh list, so a list read before the mutation cannot undo it.
//!
//! Records can also be addressed by badge (`employeeID`). An acknowledged
//! create may know nothing else, and once a list brings the server's identity
//! the badge keeps resolving to that row.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shared::models::{Employee, EmployeePatch, NewEmployee};

use crate::error::ClientResult;
use crate::http::EmployeeApi;
use crate::search;

/// Result of a refresh that reached the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The list replaced the cache
    Applied { records: usize },
    /// A newer refresh had already been applied; the list was dropped
    Superseded,
}

/// Where a cached record stands with the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLifecycle {
    Committed,
    PendingUpdate,
    PendingDelete,
}

/// A confirmed mutation, replayable onto any list
#[derive(Debug, Clone)]
enum Mutation {
    Created(Employee),
    Updated { id: String, patch: EmployeePatch },
    Removed(String),
}

#[derive(Debug, Default)]
struct CacheState {
    records: Vec<Employee>,
    /// Last refresh ticket handed out
    issued: u64,
    /// Ticket of the refresh currently reflected in `records`
    applied: u64,
    refreshes_in_flight: usize,
    /// Mutations tagged with the ticket count at confirmation time
    journal: Vec<(u64, Mutation)>,
    pending: HashMap<String, RecordLifecycle>,
    pending_creates: usize,
}

impl CacheState {
    /// Index of `id`, falling back to a record carrying it as its badge
    fn position(&self, id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|e| e.id == id)
            .or_else(|| self.badge_position(id))
    }

    fn badge_position(&self, badge: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|e| e.employee_id.as_deref() == Some(badge))
    }

    /// Server identity of the cached record `id` resolves to
    fn identity(&self, id: &str) -> String {
        self.position(id)
            .map_or_else(|| id.to_string(), |idx| self.records[idx].id.clone())
    }

    fn apply(&mut self, mutation: &Mutation) -> Option<Employee> {
        match mutation {
            Mutation::Created(emp) => {
                if let Some(idx) = self.records.iter().position(|e| e.id == emp.id) {
                    self.records[idx] = emp.clone();
                    return Some(emp.clone());
                }
                // An acknowledged create may only know the badge; a listed row
                // with that badge is the server's own copy and wins
                if let Some(badge) = emp.employee_id.as_deref()
                    && let Some(idx) = self.badge_position(badge)
                {
                    tracing::debug!(id = %self.records[idx].id, badge, "Created employee already listed");
                    return Some(self.records[idx].clone());
                }
                self.records.push(emp.clone());
                Some(emp.clone())
            }
            Mutation::Updated { id, patch } => {
                let idx = self.position(id)?;
                self.records[idx].apply_patch(patch);
                Some(self.records[idx].clone())
            }
            Mutation::Removed(id) => {
                let idx = self.position(id)?;
                Some(self.records.remove(idx))
            }
        }
    }

    /// Apply a confirmed mutation and journal it for in-flight refreshes
    fn commit(&mut self, mutation: Mutation) -> Option<Employee> {
        let result = self.apply(&mutation);
        if self.refreshes_in_flight > 0 {
            self.journal.push((self.issued, mutation));
        }
        result
    }

    fn replace_all(&mut self, list: Vec<Employee>) {
        let mut seen = HashSet::with_capacity(list.len());
        self.records = list
            .into_iter()
            .filter(|emp| {
                if emp.id.trim().is_empty() {
                    tracing::warn!(name = %emp.full_name(), "Dropping employee without identity");
                    return false;
                }
                if !seen.insert(emp.id.clone()) {
                    tracing::warn!(id = %emp.id, "Dropping duplicate employee");
                    return false;
                }
                true
            })
            .collect();
    }
}

/// Releases a pending marker on every exit path, including cancellation
struct PendingGuard<'a> {
    state: &'a RwLock<CacheState>,
    slot: PendingSlot,
}

enum PendingSlot {
    Refresh,
    Create,
    Record(String, RecordLifecycle),
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        match &self.slot {
            PendingSlot::Refresh => {
                state.refreshes_in_flight -= 1;
                if state.refreshes_in_flight == 0 {
                    state.journal.clear();
                }
            }
            PendingSlot::Create => state.pending_creates -= 1,
            PendingSlot::Record(id, _) => {
                state.pending.remove(id);
            }
        }
    }
}

/// Owns the cached collection and routes every change through the API
#[derive(Debug)]
pub struct SyncManager<A> {
    api: A,
    state: RwLock<CacheState>,
}

impl<A: EmployeeApi> SyncManager<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RwLock::new(CacheState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn mark(&self, slot: PendingSlot) -> PendingGuard<'_> {
        {
            let mut state = self.write();
            match &slot {
                PendingSlot::Refresh => state.refreshes_in_flight += 1,
                PendingSlot::Create => state.pending_creates += 1,
                PendingSlot::Record(id, lifecycle) => {
                    state.pending.insert(id.clone(), *lifecycle);
                }
            }
        }
        PendingGuard {
            state: &self.state,
            slot,
        }
    }

    // ========== Commands ==========

    /// Reload the whole collection from the server
    pub async fn refresh(&self) -> ClientResult<RefreshOutcome> {
        let ticket = {
            let mut state = self.write();
            state.issued += 1;
            state.issued
        };
        let _guard = self.mark(PendingSlot::Refresh);
        tracing::debug!(ticket, "Refreshing employees");

        let list = self.api.list().await?;

        let mut state = self.write();
        if ticket <= state.applied {
            tracing::warn!(ticket, applied = state.applied, "Discarding superseded employee list");
            return Ok(RefreshOutcome::Superseded);
        }
        state.replace_all(list);

        // Entries confirmed before this ticket was issued are already in the list
        let journal = std::mem::take(&mut state.journal);
        let replay: Vec<_> = journal.into_iter().filter(|(at, _)| *at >= ticket).collect();
        for (_, mutation) in &replay {
            state.apply(mutation);
        }
        state.journal = replay;
        state.applied = ticket;

        let records = state.records.len();
        tracing::info!(ticket, records, "Employee list refreshed");
        Ok(RefreshOutcome::Applied { records })
    }

    /// Submit a new record; it enters the cache only once the server commits it
    pub async fn create(&self, record: &NewEmployee) -> ClientResult<Employee> {
        let _guard = self.mark(PendingSlot::Create);
        let committed = self.api.create(record).await?;

        let mut state = self.write();
        state.commit(Mutation::Created(committed.clone()));
        tracing::info!(id = %committed.id, name = %committed.full_name(), "Employee created");
        Ok(committed)
    }

    /// Send `patch` for `id`; on acknowledgment merge it into the cached record.
    ///
    /// Returns the merged record, or `None` when `id` is no longer cached.
    pub async fn update(&self, id: &str, patch: &EmployeePatch) -> ClientResult<Option<Employee>> {
        let id = self.read().identity(id);
        let id = id.as_str();
        let _guard = self.mark(PendingSlot::Record(id.to_string(), RecordLifecycle::PendingUpdate));
        self.api.update(id, patch).await?;

        let mut state = self.write();
        let merged = state.commit(Mutation::Updated {
            id: id.to_string(),
            patch: patch.clone(),
        });
        match &merged {
            Some(_) => tracing::info!(id = %id, "Employee updated"),
            None => tracing::warn!(id = %id, "Updated employee is no longer cached"),
        }
        Ok(merged)
    }

    /// Delete `id` on the server, then from the cache
    pub async fn remove(&self, id: &str) -> ClientResult<()> {
        let id = self.read().identity(id);
        let id = id.as_str();
        let _guard = self.mark(PendingSlot::Record(id.to_string(), RecordLifecycle::PendingDelete));
        self.api.remove(id).await?;

        let mut state = self.write();
        if state.commit(Mutation::Removed(id.to_string())).is_none() {
            tracing::debug!(id = %id, "Removed employee was not cached");
        }
        tracing::info!(id = %id, "Employee removed");
        Ok(())
    }

    // ========== Queries ==========

    /// Cached records in server order
    pub fn snapshot(&self) -> Vec<Employee> {
        self.read().records.clone()
    }

    /// Look up by identity or badge
    pub fn get(&self, id: &str) -> Option<Employee> {
        let state = self.read();
        state.position(id).map(|idx| state.records[idx].clone())
    }

    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    /// Cached records matching `query`; see [`search::filter`]
    pub fn search(&self, query: &str) -> Vec<Employee> {
        let state = self.read();
        search::filter(&state.records, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// `None` when `id` is not cached
    pub fn lifecycle(&self, id: &str) -> Option<RecordLifecycle> {
        let state = self.read();
        let idx = state.position(id)?;
        Some(
            state
                .pending
                .get(&state.records[idx].id)
                .copied()
                .unwrap_or(RecordLifecycle::Committed),
        )
    }

    /// Creates sent but not yet answered
    pub fn pending_creates(&self) -> usize {
        self.read().pending_creates
    }
}
