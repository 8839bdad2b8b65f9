//! Mock Gns3Client for unit testing
//!
//! This module provides a mock implementation of Gns3ClientTrait that can be used
//! in unit tests without requiring a running GNS3 controller.
//!
//! The mock is organized into:
//! - `nodes.rs` - default controller behaviour for node and template endpoints
//! - `helpers.rs` - response builders and node merge logic

mod helpers;
mod nodes;

use crate::error::Gns3Error;
use crate::gns3_trait::Gns3ClientTrait;
use crate::models::ApiResponse;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Controller endpoint a request was routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Version,
    CreateNode,
    CreateFromTemplate,
    GetNode,
    UpdateNode,
    DeleteNode,
    StartNode,
}

/// A request as seen by the mock controller
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub endpoint: Endpoint,
    pub project_id: String,
    /// Node ID, or template ID for `CreateFromTemplate`
    pub target_id: Option<String>,
    pub body: Option<Value>,
}

/// Mock Gns3Client for testing
///
/// Stores nodes in memory and behaves like a GNS3 controller by default.
/// Responses can be scripted per endpoint to exercise failure paths.
#[derive(Debug, Clone)]
pub struct MockGns3Client {
    pub(crate) base_url: String,
    // (project_id, node_id) -> node JSON
    pub(crate) nodes: Arc<Mutex<HashMap<(String, String), Value>>>,
    // template_id -> fields every instantiated node inherits
    pub(crate) templates: Arc<Mutex<HashMap<String, Value>>>,
    pub(crate) scripted: Arc<Mutex<HashMap<Endpoint, VecDeque<ApiResponse>>>>,
    pub(crate) failures: Arc<Mutex<HashMap<Endpoint, VecDeque<Gns3Error>>>>,
    pub(crate) requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockGns3Client {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            nodes: Arc::new(Mutex::new(HashMap::new())),
            templates: Arc::new(Mutex::new(HashMap::new())),
            scripted: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a node to the mock store (for test setup). The node must carry `node_id`.
    pub fn add_node(&self, project_id: &str, node: Value) {
        let node_id = node
            .get("node_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.nodes
            .lock()
            .unwrap()
            .insert((project_id.to_string(), node_id), node);
    }

    /// Register a template that nodes can be instantiated from
    pub fn add_template(&self, template_id: &str, defaults: Value) {
        self.templates
            .lock()
            .unwrap()
            .insert(template_id.to_string(), defaults);
    }

    /// Current server-side view of a node
    pub fn node(&self, project_id: &str, node_id: &str) -> Option<Value> {
        self.nodes
            .lock()
            .unwrap()
            .get(&(project_id.to_string(), node_id.to_string()))
            .cloned()
    }

    /// Delete a node behind the client's back (simulates out-of-band drift)
    pub fn remove_node(&self, project_id: &str, node_id: &str) -> Option<Value> {
        self.nodes
            .lock()
            .unwrap()
            .remove(&(project_id.to_string(), node_id.to_string()))
    }

    /// Number of nodes currently stored
    pub fn node_count(&self) -> usize {
        self.nodes.lock().unwrap().len()
    }

    /// Queue a response for the next request to `endpoint`, bypassing the store
    pub fn push_response(&self, endpoint: Endpoint, response: ApiResponse) {
        self.scripted
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(response);
    }

    /// Fail the next request to `endpoint` with a client error (after recording it)
    pub fn push_failure(&self, endpoint: Endpoint, error: Gns3Error) {
        self.failures
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(error);
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received for one endpoint
    pub fn requests_for(&self, endpoint: Endpoint) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .cloned()
            .collect()
    }

    /// Forget recorded requests (store contents are kept)
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Record a request and return a scripted outcome if one is queued.
    /// Failures take precedence over scripted responses.
    pub(crate) fn record(
        &self,
        endpoint: Endpoint,
        project_id: &str,
        target_id: Option<&str>,
        body: Option<&Value>,
    ) -> Option<Result<ApiResponse, Gns3Error>> {
        self.requests.lock().unwrap().push(RecordedRequest {
            endpoint,
            project_id: project_id.to_string(),
            target_id: target_id.map(str::to_string),
            body: body.cloned(),
        });
        if let Some(error) = self
            .failures
            .lock()
            .unwrap()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
        {
            return Some(Err(error));
        }
        self.scripted
            .lock()
            .unwrap()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
            .map(Ok)
    }
}

#[async_trait::async_trait]
impl Gns3ClientTrait for MockGns3Client {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_version(&self) -> Result<ApiResponse, Gns3Error> {
        if let Some(scripted) = self.record(Endpoint::Version, "", None, None) {
            return scripted;
        }
        Ok(helpers::version())
    }

    // Node operations - delegated to nodes module
    async fn create_node(&self, project_id: &str, body: &Value) -> Result<ApiResponse, Gns3Error> {
        if let Some(scripted) = self.record(Endpoint::CreateNode, project_id, None, Some(body)) {
            return scripted;
        }
        Ok(nodes::create_node(self, project_id, body))
    }

    async fn create_node_from_template(
        &self,
        project_id: &str,
        template_id: &str,
        body: &Value,
    ) -> Result<ApiResponse, Gns3Error> {
        if let Some(scripted) = self.record(
            Endpoint::CreateFromTemplate,
            project_id,
            Some(template_id),
            Some(body),
        ) {
            return scripted;
        }
        Ok(nodes::create_node_from_template(self, project_id, template_id, body))
    }

    async fn get_node(&self, project_id: &str, node_id: &str) -> Result<ApiResponse, Gns3Error> {
        if let Some(scripted) = self.record(Endpoint::GetNode, project_id, Some(node_id), None) {
            return scripted;
        }
        Ok(nodes::get_node(self, project_id, node_id))
    }

    async fn update_node(
        &self,
        project_id: &str,
        node_id: &str,
        body: &Value,
    ) -> Result<ApiResponse, Gns3Error> {
        if let Some(scripted) =
            self.record(Endpoint::UpdateNode, project_id, Some(node_id), Some(body))
        {
            return scripted;
        }
        Ok(nodes::update_node(self, project_id, node_id, body))
    }

    async fn delete_node(&self, project_id: &str, node_id: &str) -> Result<ApiResponse, Gns3Error> {
        if let Some(scripted) = self.record(Endpoint::DeleteNode, project_id, Some(node_id), None) {
            return scripted;
        }
        Ok(nodes::delete_node(self, project_id, node_id))
    }

    async fn start_node(&self, project_id: &str, node_id: &str) -> Result<ApiResponse, Gns3Error> {
        if let Some(scripted) = self.record(Endpoint::StartNode, project_id, Some(node_id), None) {
            return scripted;
        }
        Ok(nodes::start_node(self, project_id, node_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let mock = MockGns3Client::new("http://test-gns3");
        let created = mock
            .create_node("p1", &json!({"name": "sw1", "node_type": "ethernet_switch"}))
            .await
            .unwrap();
        assert_eq!(created.status, StatusCode::CREATED);
        let node_id = created.str_field("node_id").unwrap().to_string();

        let fetched = mock.get_node("p1", &node_id).await.unwrap();
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(fetched.str_field("name"), Some("sw1"));
        assert_eq!(fetched.str_field("project_id"), Some("p1"));
    }

    #[tokio::test]
    async fn test_update_merges_properties() {
        let mock = MockGns3Client::new("http://test-gns3");
        mock.add_node(
            "p1",
            json!({"node_id": "n1", "name": "vm", "properties": {"ram": 256, "cpus": 1}}),
        );

        let updated = mock
            .update_node("p1", "n1", &json!({"properties": {"ram": 1024}}))
            .await
            .unwrap();
        assert_eq!(updated.status, StatusCode::OK);

        let node = mock.node("p1", "n1").unwrap();
        assert_eq!(node["properties"]["ram"], 1024);
        assert_eq!(node["properties"]["cpus"], 1);
    }

    #[tokio::test]
    async fn test_delete_missing_node_is_not_found() {
        let mock = MockGns3Client::new("http://test-gns3");
        let resp = mock.delete_node("p1", "ghost").await.unwrap();
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_template_is_not_found() {
        let mock = MockGns3Client::new("http://test-gns3");
        let resp = mock
            .create_node_from_template("p1", "missing", &json!({"name": "r1"}))
            .await
            .unwrap();
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(mock.node_count(), 0);
    }

    #[tokio::test]
    async fn test_scripted_response_wins_once() {
        let mock = MockGns3Client::new("http://test-gns3");
        mock.push_response(
            Endpoint::GetNode,
            ApiResponse::empty(StatusCode::SERVICE_UNAVAILABLE),
        );

        let first = mock.get_node("p1", "n1").await.unwrap();
        assert_eq!(first.status, StatusCode::SERVICE_UNAVAILABLE);
        let second = mock.get_node("p1", "n1").await.unwrap();
        assert_eq!(second.status, StatusCode::NOT_FOUND);
        assert_eq!(mock.requests_for(Endpoint::GetNode).len(), 2);
    }

    #[tokio::test]
    async fn test_pushed_failure_is_returned_and_recorded() {
        let mock = MockGns3Client::new("http://test-gns3");
        mock.push_failure(
            Endpoint::CreateNode,
            Gns3Error::Timeout("http://test-gns3/v2/projects/p1/nodes".to_string()),
        );

        let result = mock.create_node("p1", &json!({"name": "sw1"})).await;
        assert!(matches!(result, Err(Gns3Error::Timeout(_))));
        assert_eq!(mock.requests_for(Endpoint::CreateNode).len(), 1);
        assert_eq!(mock.node_count(), 0);
    }
}
