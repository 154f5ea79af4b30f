//! The only place the client talks to the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use taskdesk_shared::{CreateTaskRequest, Task, TaskId, TaskPage, UpdateTaskRequest};
use url::Url;

use crate::error::{FetchError, Operation};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/tasks/";

#[async_trait]
pub trait TaskApi: Send + Sync {
    /// One page of tasks. `completion` of `None` means no filter is sent.
    async fn list_tasks(&self, page: u32, completion: Option<bool>)
        -> Result<TaskPage, FetchError>;

    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, FetchError>;

    async fn update_task(&self, id: TaskId, request: UpdateTaskRequest)
        -> Result<Task, FetchError>;

    async fn delete_task(&self, id: TaskId) -> Result<(), FetchError>;
}

pub struct HttpTaskApi {
    client: Client,
    base: Url,
}

impl HttpTaskApi {
    pub fn new(mut base: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, op: Operation, path: &str) -> Result<Url, FetchError> {
        self.base.join(path).map_err(|e| FetchError::url(op, e))
    }
}

async fn send(op: Operation, request: RequestBuilder) -> Result<Response, FetchError> {
    let response = request.send().await.map_err(|e| FetchError::http(op, e))?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::status(op, status));
    }
    Ok(response)
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(
        &self,
        page: u32,
        completion: Option<bool>,
    ) -> Result<TaskPage, FetchError> {
        let op = Operation::List;
        let mut request = self
            .client
            .get(self.endpoint(op, "all/")?)
            .query(&[("page", page.to_string())]);
        if let Some(is_completed) = completion {
            request = request.query(&[("is_completed", is_completed.to_string())]);
        }
        log::debug!("GET page {page} (is_completed={completion:?})");

        send(op, request)
            .await?
            .json()
            .await
            .map_err(|e| FetchError::http(op, e))
    }

    async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, FetchError> {
        let op = Operation::Create;
        let builder = self.client.post(self.endpoint(op, "create/")?).json(&request);
        send(op, builder)
            .await?
            .json()
            .await
            .map_err(|e| FetchError::http(op, e))
    }

    async fn update_task(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> Result<Task, FetchError> {
        let op = Operation::Update;
        let builder = self
            .client
            .patch(self.endpoint(op, &format!("{id}/update/"))?)
            .json(&request);
        send(op, builder)
            .await?
            .json()
            .await
            .map_err(|e| FetchError::http(op, e))
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), FetchError> {
        let op = Operation::Delete;
        let builder = self.client.delete(self.endpoint(op, &format!("{id}/delete/"))?);
        send(op, builder).await.map(|_| ())
    }
}
