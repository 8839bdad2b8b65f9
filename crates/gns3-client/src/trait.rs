//! Gns3Client trait for mocking
//!
//! This trait abstracts the Gns3Client to enable mocking in unit tests.
//! The concrete Gns3Client implements this trait, and tests can use the in-memory mock.

use crate::error::Gns3Error;
use crate::models::ApiResponse;
use serde_json::Value;

/// Trait for GNS3 controller node/template operations
///
/// Every method returns the raw status with a best-effort decoded body. Callers
/// own the status-code policy, since "success" differs per operation.
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait Gns3ClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// `GET /v2/version`
    async fn get_version(&self) -> Result<ApiResponse, Gns3Error>;

    // Node Operations
    async fn create_node(&self, project_id: &str, body: &Value) -> Result<ApiResponse, Gns3Error>;
    async fn create_node_from_template(&self, project_id: &str, template_id: &str, body: &Value) -> Result<ApiResponse, Gns3Error>;
    async fn get_node(&self, project_id: &str, node_id: &str) -> Result<ApiResponse, Gns3Error>;
    async fn update_node(&self, project_id: &str, node_id: &str, body: &Value) -> Result<ApiResponse, Gns3Error>;
    async fn delete_node(&self, project_id: &str, node_id: &str) -> Result<ApiResponse, Gns3Error>;
    async fn start_node(&self, project_id: &str, node_id: &str) -> Result<ApiResponse, Gns3Error>;
}
