use std::time::Duration;

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::config::join_url;
use crate::error::Result;

/// Thin reqwest wrapper bound to one API base URL.
///
/// Non-2xx statuses are returned as responses, not errors; contract checks
/// decide what a status means.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Status and raw body of one exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    pub fn is_empty_body(&self) -> bool {
        self.body.trim().is_empty()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        let url = join_url(&self.base_url, path);
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        Self::read(response).await
    }

    pub async fn post_json<T>(&self, path: &str, body: &T) -> Result<ApiResponse>
    where
        T: Serialize + ?Sized,
    {
        let url = join_url(&self.base_url, path);
        debug!("POST {}", url);
        let response = self.http.post(&url).json(body).send().await?;
        Self::read(response).await
    }

    async fn read(response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("-> {} ({} bytes)", status, body.len());
        Ok(ApiResponse { status, body })
    }
}
