use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use super::error::ApiError;
use super::types::{ErrorBody, StartRequest, StatusRecord};
use crate::monitor::JobId;

/// Remote operations on one import job.
///
/// Implementations perform exactly one request per call and never retry;
/// retry policy belongs to the caller.
#[allow(async_fn_in_trait)]
pub trait JobApi {
    /// `GET job/{mun}/{div}?linea={cursor}`.
    async fn status(&self, job_id: &JobId, cursor: u64) -> Result<StatusRecord, ApiError>;

    /// `POST job/{mun}/{div}`: start an import.
    async fn start(&self, job_id: &JobId, req: &StartRequest) -> Result<StatusRecord, ApiError>;

    /// `PUT job/{mun}/{div}`: unlock a job held for review.
    async fn unlock(&self, job_id: &JobId) -> Result<StatusRecord, ApiError>;
}

/// Timeouts applied to every request.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(30),
        }
    }
}

pub struct JobClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl JobClient {
    /// Create a client rooted at `api_url` (the URL that `job/` hangs from).
    pub fn with_api_url(
        api_url: String,
        token: Option<String>,
        timeouts: Timeouts,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .build()?;
        let api_url = if api_url.ends_with('/') {
            api_url
        } else {
            format!("{api_url}/")
        };
        Ok(Self {
            client,
            api_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn job_url(&self, job_id: &JobId) -> String {
        format!("{}job/{}", self.api_url, job_id.path())
    }

    fn authorized(&self, req: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match &self.token {
            Some(token) => Ok(req.bearer_auth(token)),
            None => Err(ApiError::Unauthenticated),
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<StatusRecord, ApiError> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<StatusRecord>(&body).map_err(|e| ApiError::Protocol(e.to_string()))
    }
}

impl JobApi for JobClient {
    async fn status(&self, job_id: &JobId, cursor: u64) -> Result<StatusRecord, ApiError> {
        let req = self
            .client
            .get(self.job_url(job_id))
            .query(&[("linea", cursor)]);
        self.send(req).await
    }

    async fn start(&self, job_id: &JobId, body: &StartRequest) -> Result<StatusRecord, ApiError> {
        let req = self.authorized(self.client.post(self.job_url(job_id)))?.json(body);
        self.send(req).await
    }

    async fn unlock(&self, job_id: &JobId) -> Result<StatusRecord, ApiError> {
        let req = self.authorized(self.client.put(self.job_url(job_id)))?;
        self.send(req).await
    }
}
