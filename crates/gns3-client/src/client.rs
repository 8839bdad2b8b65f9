//! GNS3 API client
//!
//! Implements the controller REST endpoints used for topology nodes.
//! Based on the GNS3 v2 API structure: /v2/projects/{project_id}/nodes/...

use crate::common::{paths, HttpClient};
use crate::error::Gns3Error;
use crate::models::{ApiResponse, ControllerVersion};
use crate::gns3_trait::Gns3ClientTrait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// GNS3 controller API client
#[derive(Debug, Clone)]
pub struct Gns3Client {
    http: HttpClient,
}

impl Gns3Client {
    /// Create a new GNS3 client
    ///
    /// # Arguments
    /// * `base_url` - Controller base URL (e.g., "http://localhost:3080")
    /// * `timeout` - Optional per-request timeout. `None` waits indefinitely.
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self, Gns3Error> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Gns3Error::InvalidRequest(format!(
                "base URL must start with http:// or https://, got {:?}",
                base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Gns3Error::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Fetch and decode the controller version.
    ///
    /// Used as a connectivity check before any lifecycle work starts.
    ///
    /// # Returns
    /// * `Ok(ControllerVersion)` - Controller is reachable
    /// * `Err(Gns3Error)` - Controller is unreachable or answered unexpectedly
    pub async fn version(&self) -> Result<ControllerVersion, Gns3Error> {
        let response = self.get_version().await?;
        if response.status != StatusCode::OK {
            return Err(Gns3Error::InvalidRequest(format!(
                "GET /v2/version failed: {} - {}",
                response.status,
                response.body_snippet()
            )));
        }
        let body = response.body.unwrap_or(Value::Null);
        let version: ControllerVersion =
            serde_json::from_value(body).map_err(|source| Gns3Error::Decode {
                status: response.status,
                source,
                body: response.raw.chars().take(500).collect(),
            })?;
        Ok(version)
    }
}

#[async_trait::async_trait]
impl Gns3ClientTrait for Gns3Client {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn get_version(&self) -> Result<ApiResponse, Gns3Error> {
        debug!("Fetching controller version");
        self.http.send(Method::GET, &paths::version(), None).await
    }

    async fn create_node(&self, project_id: &str, body: &Value) -> Result<ApiResponse, Gns3Error> {
        debug!("Creating node in project {}", project_id);
        self.http
            .send(Method::POST, &paths::nodes(project_id), Some(body))
            .await
    }

    async fn create_node_from_template(
        &self,
        project_id: &str,
        template_id: &str,
        body: &Value,
    ) -> Result<ApiResponse, Gns3Error> {
        debug!("Creating node from template {} in project {}", template_id, project_id);
        self.http
            .send(Method::POST, &paths::template(project_id, template_id), Some(body))
            .await
    }

    async fn get_node(&self, project_id: &str, node_id: &str) -> Result<ApiResponse, Gns3Error> {
        debug!("Fetching node {} from project {}", node_id, project_id);
        self.http
            .send(Method::GET, &paths::node(project_id, node_id), None)
            .await
    }

    async fn update_node(
        &self,
        project_id: &str,
        node_id: &str,
        body: &Value,
    ) -> Result<ApiResponse, Gns3Error> {
        debug!("Updating node {} in project {}", node_id, project_id);
        self.http
            .send(Method::PUT, &paths::node(project_id, node_id), Some(body))
            .await
    }

    async fn delete_node(&self, project_id: &str, node_id: &str) -> Result<ApiResponse, Gns3Error> {
        debug!("Deleting node {} from project {}", node_id, project_id);
        self.http
            .send(Method::DELETE, &paths::node(project_id, node_id), None)
            .await
    }

    async fn start_node(&self, project_id: &str, node_id: &str) -> Result<ApiResponse, Gns3Error> {
        debug!("Starting node {} in project {}", node_id, project_id);
        self.http
            .send(Method::POST, &paths::node_start(project_id, node_id), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_non_http_url() {
        let err = Gns3Client::new("gns3:3080".to_string(), None).unwrap_err();
        assert!(matches!(err, Gns3Error::InvalidRequest(_)));
    }

    #[test]
    fn test_new_trims_base_url() {
        let client = Gns3Client::new("http://gns3:3080/".to_string(), None).unwrap();
        assert_eq!(client.base_url(), "http://gns3:3080");
    }
}
