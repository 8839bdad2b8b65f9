//! Common utilities for the GNS3 API client
//!
//! Provides the raw request/response exchange shared by every endpoint.

pub mod paths;

use crate::error::Gns3Error;
use crate::models::ApiResponse;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::debug;

/// HTTP client wrapper bound to one controller base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Send one request and hand back whatever status the controller returned.
    ///
    /// No retries and no status interpretation happen here. The body is
    /// serialized before anything touches the network, so an encoding failure
    /// never produces a request.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, Gns3Error> {
        let url = self.build_url(path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Accept", "application/json");

        if let Some(body) = body {
            let encoded = serde_json::to_vec(body).map_err(Gns3Error::Encoding)?;
            debug!("{} {} with body: {}", method, url, body);
            request = request
                .header("Content-Type", "application/json")
                .body(encoded);
        } else {
            debug!("{} {}", method, url);
        }

        let response = request.send().await.map_err(|e| timeout_or_http(e, &url))?;
        let status = response.status();
        let raw = response.text().await.map_err(|e| timeout_or_http(e, &url))?;

        debug!("{} {} -> {}", method, url, status);
        ApiResponse::from_parts(status, raw)
    }
}

fn timeout_or_http(e: reqwest::Error, url: &str) -> Gns3Error {
    if e.is_timeout() {
        Gns3Error::Timeout(url.to_string())
    } else {
        Gns3Error::Http(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let http = HttpClient::new(Client::new(), "http://gns3:3080/".to_string());
        assert_eq!(http.base_url(), "http://gns3:3080");
        assert_eq!(
            http.build_url("/v2/version"),
            "http://gns3:3080/v2/version"
        );
    }

    #[test]
    fn test_build_url_passes_absolute_urls_through() {
        let http = HttpClient::new(Client::new(), "http://gns3:3080".to_string());
        assert_eq!(
            http.build_url("https://other:3443/v2/version"),
            "https://other:3443/v2/version"
        );
    }
}
