//! HTTP client for the employee REST API

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use shared::client::{
    ApiErrorBody, CreateEmployeeResponse, EmployeeListResponse, LoginRequest, LoginResponse,
};
use shared::models::{
    DEFAULT_LEAVE_BALANCE, Employee, EmployeePatch, EmployeeStatus, NewEmployee,
};

use crate::auth::{StaticToken, TokenProvider};
use crate::error::{ClientError, ClientResult, Operation};
use crate::ClientConfig;

/// The four record operations the sync manager depends on
#[async_trait]
pub trait EmployeeApi: Send + Sync {
    /// Full current collection
    async fn list(&self) -> ClientResult<Vec<Employee>>;
    /// Committed record, including the server identity
    async fn create(&self, record: &NewEmployee) -> ClientResult<Employee>;
    /// Acknowledgment only; the caller reconciles the patch itself
    async fn update(&self, id: &str, patch: &EmployeePatch) -> ClientResult<()>;
    async fn remove(&self, id: &str) -> ClientResult<()>;
}

#[async_trait]
impl<T: EmployeeApi + ?Sized> EmployeeApi for Arc<T> {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        (**self).list().await
    }

    async fn create(&self, record: &NewEmployee) -> ClientResult<Employee> {
        (**self).create(record).await
    }

    async fn update(&self, id: &str, patch: &EmployeePatch) -> ClientResult<()> {
        (**self).update(id, patch).await
    }

    async fn remove(&self, id: &str) -> ClientResult<()> {
        (**self).remove(id).await
    }
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: Url,
    token: Option<Arc<dyn TokenProvider>>,
}

impl NetworkHttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        let token = config
            .token
            .clone()
            .map(|t| Arc::new(StaticToken::new(t)) as Arc<dyn TokenProvider>);

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Read bearer tokens from `provider` instead of the configured token
    pub fn with_token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.token = Some(Arc::new(provider));
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL with `segments` appended, each escaped as one path segment
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(method = %method, url = %url, "Sending request");
        let mut req = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(token) = self.token.as_ref().and_then(|p| p.token()) {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        req
    }

    /// Send and classify the answer; `None` means `204 No Content`
    async fn execute(
        &self,
        operation: Operation,
        req: RequestBuilder,
    ) -> ClientResult<Option<Vec<u8>>> {
        let response = req.send().await.inspect_err(|e| {
            tracing::warn!(%operation, error = %e, "No response from server");
        })?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.user_message().map(str::to_string))
                .unwrap_or_else(|| operation.failure_message().to_string());
            tracing::warn!(%operation, status = status.as_u16(), %message, "Request rejected");
            return Err(ClientError::Rejected {
                operation,
                status: status.as_u16(),
                message,
            });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            if status == StatusCode::NO_CONTENT {
                return Ok(None);
            }
            return Err(ClientError::EmptyResponse { operation });
        }
        Ok(Some(body))
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        req: RequestBuilder,
    ) -> ClientResult<T> {
        match self.execute(operation, req).await? {
            Some(body) => Ok(serde_json::from_slice(&body)?),
            None => Err(ClientError::EmptyResponse { operation }),
        }
    }

    /// Any 2xx (JSON body or `204`) counts as acknowledgment
    async fn execute_ack(&self, operation: Operation, req: RequestBuilder) -> ClientResult<()> {
        self.execute(operation, req).await.map(|_| ())
    }

    // ========== Auth API ==========

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let req = self.request(Method::POST, self.url(&["login"])?).json(&body);
        self.execute_json(Operation::Login, req).await
    }
}

#[async_trait]
impl EmployeeApi for NetworkHttpClient {
    async fn list(&self) -> ClientResult<Vec<Employee>> {
        let req = self.request(Method::GET, self.url(&["employees"])?);
        let resp: EmployeeListResponse = self.execute_json(Operation::List, req).await?;

        let mut employees = Vec::new();
        for (row, parsed) in resp.into_rows().into_iter().enumerate() {
            match parsed {
                Ok(emp) => employees.push(emp),
                Err(e) => tracing::warn!(row, error = %e, "Skipping unreadable employee row"),
            }
        }
        Ok(employees)
    }

    async fn create(&self, record: &NewEmployee) -> ClientResult<Employee> {
        let req = self
            .request(Method::POST, self.url(&["employees"])?)
            .json(record);
        let resp: CreateEmployeeResponse = self.execute_json(Operation::Create, req).await?;
        committed_from_create(resp, record)
    }

    async fn update(&self, id: &str, patch: &EmployeePatch) -> ClientResult<()> {
        let req = self
            .request(Method::PUT, self.url(&["employees", id])?)
            .json(patch);
        self.execute_ack(Operation::Update, req).await
    }

    async fn remove(&self, id: &str) -> ClientResult<()> {
        let req = self.request(Method::DELETE, self.url(&["employees", id])?);
        self.execute_ack(Operation::Remove, req).await
    }
}

/// Turn a create answer into the record to cache.
///
/// The identity is `id` when present, otherwise the badge `employeeID`. An
/// acknowledgment carries no record, so the server's creation defaults
/// (status `Active`, full leave balance) are applied to the submitted one.
fn committed_from_create(
    resp: CreateEmployeeResponse,
    submitted: &NewEmployee,
) -> ClientResult<Employee> {
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    match resp {
        CreateEmployeeResponse::Record(mut emp) => {
            if emp.id.trim().is_empty() {
                emp.id = non_empty(emp.employee_id.clone()).ok_or_else(missing_identity)?;
            }
            Ok(emp)
        }
        CreateEmployeeResponse::Ack(ack) => {
            let employee_id = non_empty(ack.employee_id);
            let id = non_empty(ack.id)
                .or_else(|| employee_id.clone())
                .ok_or_else(missing_identity)?;
            let mut emp = Employee::from_new(id, employee_id, submitted.clone());
            emp.status = EmployeeStatus::Active;
            emp.leave_balance = DEFAULT_LEAVE_BALANCE;
            Ok(emp)
        }
    }
}

fn missing_identity() -> ClientError {
    ClientError::InvalidResponse("create response carried no employee identity".into())
}
