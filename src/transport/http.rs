use crate::error::{AppError, Result};
use crate::transport::{SearchResponse, SearchTransport};
use async_trait::async_trait;
use serde_json::Value;

/// HTTP search transport posting query documents to `<api_url><index>/_search`
#[derive(Clone)]
pub struct HttpSearchTransport {
    client: reqwest::Client,
    api_url: String,
}

impl HttpSearchTransport {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    fn endpoint(&self, index: &str) -> String {
        format!("{}{}/_search", self.api_url, index)
    }
}

#[async_trait]
impl SearchTransport for HttpSearchTransport {
    async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse> {
        let url = self.endpoint(index);
        tracing::debug!(%url, "Dispatching search request");

        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Transport(format!(
                "Search request to {} returned {}",
                url, status
            )));
        }

        Ok(response.json::<SearchResponse>().await?)
    }
}
