use std::future::Future;

use reqwest::{header, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    ack_response::AckResponse, login_request::LoginRequest, session_response::SessionResponse,
    signup_request::SignupRequest, task::Task, task_request::TaskRequest,
    task_response::TaskResponse, tasks_response::TasksResponse, validation_error::FieldError,
};

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{msg} (HTTP {status})")]
    Rejected {
        status: u16,
        msg: String,
        errors: Vec<FieldError>,
    },
}

impl ApiClientError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiClientError::Rejected { status, .. } => Some(*status),
            ApiClientError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// The task endpoints a view needs. Implemented over HTTP by `HttpTaskApi`.
pub trait TaskApi {
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<Task>, ApiClientError>> + Send;

    fn get_task(&self, id: Uuid) -> impl Future<Output = Result<Task, ApiClientError>> + Send;

    fn create_task(
        &self,
        request: &TaskRequest,
    ) -> impl Future<Output = Result<Task, ApiClientError>> + Send;

    fn update_task(
        &self,
        id: Uuid,
        request: &TaskRequest,
    ) -> impl Future<Output = Result<Task, ApiClientError>> + Send;

    fn delete_task(&self, id: Uuid) -> impl Future<Output = Result<(), ApiClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpTaskApi {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub async fn sign_up(
        base_url: impl Into<String>,
        request: &SignupRequest,
    ) -> Result<(Self, SessionResponse), ApiClientError> {
        Self::open_session(base_url.into(), "/api/auth/signup", request).await
    }

    pub async fn log_in(
        base_url: impl Into<String>,
        request: &LoginRequest,
    ) -> Result<(Self, SessionResponse), ApiClientError> {
        Self::open_session(base_url.into(), "/api/auth/login", request).await
    }

    async fn open_session<B: Serialize>(
        base_url: String,
        path: &str,
        body: &B,
    ) -> Result<(Self, SessionResponse), ApiClientError> {
        let mut api = Self::new(base_url, "");
        let session: SessionResponse = send(api.http.post(api.url(path)).json(body)).await?;
        api.token = session.token.clone();
        Ok((api, session))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token))
    }
}

impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiClientError> {
        let builder = self.authorized(self.http.get(self.url("/api/tasks")));
        let response: TasksResponse = send(builder).await?;
        Ok(response.tasks)
    }

    async fn get_task(&self, id: Uuid) -> Result<Task, ApiClientError> {
        let builder = self.authorized(self.http.get(self.url(&format!("/api/tasks/{id}"))));
        let response: TaskResponse = send(builder).await?;
        Ok(response.task)
    }

    async fn create_task(&self, request: &TaskRequest) -> Result<Task, ApiClientError> {
        let builder = self.authorized(self.http.post(self.url("/api/tasks")).json(request));
        let response: TaskResponse = send(builder).await?;
        Ok(response.task)
    }

    async fn update_task(&self, id: Uuid, request: &TaskRequest) -> Result<Task, ApiClientError> {
        let url = self.url(&format!("/api/tasks/{id}"));
        let builder = self.authorized(self.http.put(url).json(request));
        let response: TaskResponse = send(builder).await?;
        Ok(response.task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), ApiClientError> {
        let builder = self.authorized(self.http.delete(self.url(&format!("/api/tasks/{id}"))));
        let _: AckResponse = send(builder).await?;
        Ok(())
    }
}

/// Sends the request and decodes a success envelope. Anything else becomes
/// `Rejected`, carrying the server's `msg` when the body has one.
async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiClientError> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let (msg, errors) = match response.json::<AckResponse>().await {
        Ok(ack) => (ack.msg, ack.errors),
        Err(_) => (
            status.canonical_reason().unwrap_or("Request failed").to_string(),
            Vec::new(),
        ),
    };
    Err(ApiClientError::Rejected {
        status: status.as_u16(),
        msg,
        errors,
    })
}
