//! In-memory `EmployeeApi` for engine tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::models::{ContactInfo, Department, Employee, EmployeePatch, EmployeeStatus, NewEmployee};
use tokio::sync::oneshot;

use crate::error::{ClientError, ClientResult, Operation};
use crate::http::EmployeeApi;

pub(crate) fn employee(
    id: &str,
    first: &str,
    last: &str,
    department: Department,
    position: &str,
) -> Employee {
    Employee {
        id: id.into(),
        employee_id: None,
        first_name: first.into(),
        last_name: last.into(),
        department,
        position: position.into(),
        status: EmployeeStatus::Active,
        salary: 50_000,
        hire_date: "2024-01-15".into(),
        last_leave_date: None,
        leave_balance: 20,
        contact_info: ContactInfo {
            email: format!("{}@example.com", first.to_lowercase()),
            phone: "1112223333".into(),
        },
    }
}

pub(crate) fn rejected(operation: Operation, message: &str) -> ClientError {
    ClientError::Rejected {
        operation,
        status: 500,
        message: message.into(),
    }
}

pub(crate) fn unreachable(operation: Operation) -> ClientError {
    ClientError::EmptyResponse { operation }
}

enum Reply<T> {
    Ready(ClientResult<T>),
    Gated(oneshot::Receiver<ClientResult<T>>),
}

impl<T> Reply<T> {
    async fn resolve(self, operation: Operation) -> ClientResult<T> {
        match self {
            Reply::Ready(result) => result,
            Reply::Gated(rx) => rx.await.unwrap_or_else(|_| Err(unreachable(operation))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List,
    Create(NewEmployee),
    Update(String, EmployeePatch),
    Remove(String),
}

#[derive(Default)]
struct Script {
    list: VecDeque<Reply<Vec<Employee>>>,
    create: VecDeque<Reply<Employee>>,
    update: VecDeque<Reply<()>>,
    remove: VecDeque<Reply<()>>,
    calls: Vec<Call>,
    created: usize,
}

/// Replays queued answers; unscripted calls succeed
#[derive(Clone, Default)]
pub(crate) struct ScriptedApi {
    script: Arc<Mutex<Script>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn with_script<R>(&self, f: impl FnOnce(&mut Script) -> R) -> R {
        f(&mut self.script.lock().unwrap())
    }

    pub(crate) fn push_list(&self, result: ClientResult<Vec<Employee>>) {
        self.with_script(|s| s.list.push_back(Reply::Ready(result)));
    }

    pub(crate) fn gate_list(&self) -> oneshot::Sender<ClientResult<Vec<Employee>>> {
        let (tx, rx) = oneshot::channel();
        self.with_script(|s| s.list.push_back(Reply::Gated(rx)));
        tx
    }

    pub(crate) fn push_create(&self, result: ClientResult<Employee>) {
        self.with_script(|s| s.create.push_back(Reply::Ready(result)));
    }

    pub(crate) fn gate_create(&self) -> oneshot::Sender<ClientResult<Employee>> {
        let (tx, rx) = oneshot::channel();
        self.with_script(|s| s.create.push_back(Reply::Gated(rx)));
        tx
    }

    pub(crate) fn push_update(&self, result: ClientResult<()>) {
        self.with_script(|s| s.update.push_back(Reply::Ready(result)));
    }

    pub(crate) fn gate_update(&self) -> oneshot::Sender<ClientResult<()>> {
        let (tx, rx) = oneshot::channel();
        self.with_script(|s| s.update.push_back(Reply::Gated(rx)));
        tx
    }

    pub(crate) fn push_remove(&self, result: ClientResult<()>) {
        self.with_script(|s| s.remove.push_back(Reply::Ready(result)));
    }

    pub(crate) fn gate_remove(&self) -> oneshot::Sender<ClientResult<()>> {
        let (tx, rx) = oneshot::channel();
        self.with_script(|s| s.remove.push_back(Reply::Gated(rx)));
        tx
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.with_script(|s| s.calls.clone())
    }

    pub(crate) fn call_count(&self) -> usize {
        self.with_script(|s| s.calls.len())
    }
}

#[async_trait]
impl EmployeeApi for ScriptedApi {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        let reply = self.with_script(|s| {
            s.calls.push(Call::List);
            s.list.pop_front()
        });
        match reply {
            Some(reply) => reply.resolve(Operation::List).await,
            None => Ok(Vec::new()),
        }
    }

    async fn create(&self, record: &NewEmployee) -> ClientResult<Employee> {
        let (reply, n) = self.with_script(|s| {
            s.calls.push(Call::Create(record.clone()));
            s.created += 1;
            (s.create.pop_front(), s.created)
        });
        match reply {
            Some(reply) => reply.resolve(Operation::Create).await,
            None => Ok(Employee::from_new(format!("srv-{n}"), None, record.clone())),
        }
    }

    async fn update(&self, id: &str, patch: &EmployeePatch) -> ClientResult<()> {
        let reply = self.with_script(|s| {
            s.calls.push(Call::Update(id.to_string(), patch.clone()));
            s.update.pop_front()
        });
        match reply {
            Some(reply) => reply.resolve(Operation::Update).await,
            None => Ok(()),
        }
    }

    async fn remove(&self, id: &str) -> ClientResult<()> {
        let reply = self.with_script(|s| {
            s.calls.push(Call::Remove(id.to_string()));
            s.remove.pop_front()
        });
        match reply {
            Some(reply) => reply.resolve(Operation::Remove).await,
            None => Ok(()),
        }
    }
}
