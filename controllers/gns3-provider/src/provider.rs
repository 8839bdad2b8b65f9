//! Provider entry point.
//!
//! Owns the shared controller client and hands out one [`Reconciler`] per
//! resource kind.

use crate::config::ProviderConfig;
use crate::error::{Operation, ProviderError};
use crate::reconcile_helpers;
use crate::reconciler::Reconciler;
use crate::schema::ResourceKind;
use gns3_client::{ControllerVersion, Gns3Client, Gns3ClientTrait, StatusCode};
use std::sync::Arc;
use tracing::info;

/// Shared controller client plus per-kind reconcilers
#[derive(Clone)]
pub struct Provider {
    client: Arc<dyn Gns3ClientTrait>,
}

impl Provider {
    /// Build the shared HTTP client from explicit configuration.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = Gns3Client::new(config.host.clone(), config.request_timeout)
            .map_err(|e| ProviderError::InvalidConfig(e.to_string()))?;
        info!(
            "GNS3 provider configured for {} (timeout: {})",
            config.host,
            config
                .request_timeout
                .map(|t| format!("{}s", t.as_secs()))
                .unwrap_or_else(|| "none".to_string())
        );
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Use an existing client, e.g. the mock controller in tests.
    pub fn with_client(client: Arc<dyn Gns3ClientTrait>) -> Self {
        Self { client }
    }

    /// Controller base URL
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Reconciler for `kind` sharing this provider's client
    pub fn reconciler(&self, kind: ResourceKind) -> Reconciler {
        Reconciler::new(Arc::clone(&self.client), kind)
    }

    /// Fetch the controller version to confirm the controller is reachable.
    pub async fn check_connectivity(&self) -> Result<ControllerVersion, ProviderError> {
        let response = self
            .client
            .get_version()
            .await
            .map_err(|e| ProviderError::from_client(Operation::Connect, e))?;
        reconcile_helpers::expect_status(Operation::Connect, &response, StatusCode::OK)?;

        let body = response.body.clone().unwrap_or_default();
        let version: ControllerVersion =
            serde_json::from_value(body).map_err(|e| ProviderError::Protocol {
                operation: Operation::Connect,
                message: format!("unexpected version response ({}): {}", e, response.body_snippet()),
            })?;
        info!(
            "Connected to GNS3 controller {} at {}",
            version.version,
            self.client.base_url()
        );
        Ok(version)
    }
}
