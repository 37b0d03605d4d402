//! HTTP implementation of the board and login services.
//!
//! Status codes map onto [`SyncError`] as follows: 401 and 403 are
//! `Unauthorized`, 404 is `NotFound`, 409 is a version `Conflict`, anything
//! else that is not 2xx is `Http`. Transport failures are `Network` and bodies
//! that do not decode are `Decode`.

use crate::config::{ClientConfig, ConfigError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use taskboard_kanban::{
    AuthError, AuthService, BoardService, BoardSnapshot, Credentials, NewSection, NewTask,
    ProjectId, Section, SyncError, SyncResult, Task, TaskUpdate, User,
};
use tracing::{debug, instrument};
use url::Url;

const HTTP_UNAUTHORIZED: u16 = 401;
const HTTP_FORBIDDEN: u16 = 403;
const HTTP_NOT_FOUND: u16 = 404;
const HTTP_CONFLICT: u16 = 409;

/// Error body returned by the service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the Taskboard REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client from validated configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ConfigError::invalid("http", e.to_string()))?;

        Ok(Self {
            client,
            base: config.url()?,
            token: config.token.clone(),
        })
    }

    /// Use a bearer token for board requests
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace or clear the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Root URL requests are made against
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> SyncResult<Response> {
        self.authorized(request)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))
    }
}

/// Read the error message from a failed response, falling back to the status text
async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.message,
        Err(_) if !text.trim().is_empty() => text,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> SyncResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| SyncError::Network(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| SyncError::Decode(e.to_string()))
}

/// Decode a successful response or map the status to an error about `kind` `id`
async fn read_json<T: DeserializeOwned>(response: Response, kind: &str, id: &str) -> SyncResult<T> {
    let status = response.status();
    if status.is_success() {
        return decode(response).await;
    }

    debug!(status = status.as_u16(), kind, id, "request failed");
    Err(match status.as_u16() {
        HTTP_UNAUTHORIZED | HTTP_FORBIDDEN => SyncError::Unauthorized,
        HTTP_NOT_FOUND => SyncError::not_found(format!("{kind} {id}")),
        HTTP_CONFLICT => SyncError::Conflict { id: id.to_string() },
        code => SyncError::http(code, error_message(response).await),
    })
}

#[async_trait]
impl BoardService for ApiClient {
    #[instrument(skip(self))]
    async fn fetch_board(&self, project: &ProjectId) -> SyncResult<BoardSnapshot> {
        let id = project.as_str();
        let response = self
            .send(self.client.get(self.endpoint(&["api", "projects", id, "sections"])))
            .await?;
        let sections: Vec<Section> = read_json(response, "project", id).await?;

        let response = self
            .send(self.client.get(self.endpoint(&["api", "projects", id, "tasks"])))
            .await?;
        let tasks: Vec<Task> = read_json(response, "project", id).await?;

        debug!(sections = sections.len(), tasks = tasks.len(), "board fetched");
        Ok(BoardSnapshot::new(sections, tasks))
    }

    #[instrument(skip(self, update), fields(task = %update.id))]
    async fn update_task(&self, update: &TaskUpdate) -> SyncResult<Task> {
        let id = update.id.as_str();
        let request = self
            .client
            .patch(self.endpoint(&["api", "tasks", id]))
            .json(update);
        let response = self.send(request).await?;
        read_json(response, "task", id).await
    }

    #[instrument(skip(self, draft), fields(section = %draft.section))]
    async fn create_task(&self, draft: &NewTask) -> SyncResult<Task> {
        let request = self.client.post(self.endpoint(&["api", "tasks"])).json(draft);
        let response = self.send(request).await?;
        read_json(response, "section", draft.section.as_str()).await
    }

    #[instrument(skip(self, draft), fields(project = %draft.project))]
    async fn create_section(&self, draft: &NewSection) -> SyncResult<Section> {
        let id = draft.project.as_str();
        let request = self
            .client
            .post(self.endpoint(&["api", "projects", id, "sections"]))
            .json(draft);
        let response = self.send(request).await?;
        read_json(response, "project", id).await
    }
}

#[async_trait]
impl AuthService for ApiClient {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> Result<User, AuthError> {
        let response = self
            .client
            .post(self.endpoint(&["api", "users", "login"]))
            .json(credentials)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            return serde_json::from_slice(&bytes).map_err(|e| AuthError::Decode(e.to_string()));
        }

        if status.is_server_error() {
            return Err(AuthError::Network(error_message(response).await));
        }
        Err(AuthError::Rejected(error_message(response).await))
    }
}
