use crate::framework::{FrameworkError, HttpMethod, HttpRequest, HttpTransport};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// [`HttpTransport`] backed by a `reqwest::Client` bound to a base URL.
///
/// Resource URLs (`api/heroes/11`) are joined to the base with a single `/`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, FrameworkError> {
        let url = self.url_for(&request.url);
        debug!(method = %request.method, %url, "Sending request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };
        for (name, value) in &request.options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            // `.json()` would also force the content type; headers come from the options.
            let bytes = serde_json::to_vec(body).map_err(|e| FrameworkError::Decode(e.to_string()))?;
            builder = builder.body(bytes);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| FrameworkError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| FrameworkError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            return Err(FrameworkError::status(status.as_u16(), message));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| FrameworkError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let transport = ReqwestTransport::new("http://localhost:3000/");
        assert_eq!(transport.base_url(), "http://localhost:3000");
        assert_eq!(
            transport.url_for("api/heroes/11"),
            "http://localhost:3000/api/heroes/11"
        );
        assert_eq!(
            transport.url_for("/api/heroes/?name=ma"),
            "http://localhost:3000/api/heroes/?name=ma"
        );
    }
}
