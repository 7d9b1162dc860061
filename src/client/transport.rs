use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::state::Query;
use crate::config::ClientConfig;
use crate::error::FailureKind;
use crate::models::{SearchResponse, SearchResponseBody};

/// The one network call a submission makes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn search(&self, query: &Query) -> Result<SearchResponse, FailureKind>;
}

/// Posts the query as form-encoded `query` to the search endpoint.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn search(&self, query: &Query) -> Result<SearchResponse, FailureKind> {
        debug!(endpoint = %self.endpoint, "posting search");
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("query", query.as_str())])
            .send()
            .await
            .map_err(|e| FailureKind::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FailureKind::HttpStatus(status.as_u16()));
        }

        let body = response
            .json::<SearchResponseBody>()
            .await
            .map_err(|e| FailureKind::Parse(e.to_string()))?;
        Ok(body.into())
    }
}
