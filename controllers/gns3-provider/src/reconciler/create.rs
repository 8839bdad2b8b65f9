use super::Reconciler;
use crate::error::{Operation, ProviderError};
use crate::payload;
use crate::reconcile_helpers;
use crate::schema::CreateRoute;
use crate::state::ResourceData;
use gns3_client::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

impl Reconciler {
    /// Create the node and, when the kind's start flag is set, start it.
    ///
    /// Returns the assigned node ID. The start step is not transactional with
    /// creation: if it fails the instance keeps its identity and the error is
    /// [`ProviderError::PartialCreate`].
    pub async fn create<D: ResourceData + ?Sized>(&self, data: &mut D) -> Result<String, ProviderError> {
        let project_id = reconcile_helpers::project_id(self.schema, data)?;
        let body = Value::Object(payload::create_body(self.schema, data)?);

        info!(
            "Creating {} {:?} in project {}",
            self.schema.type_name,
            data.get_string("name")?.unwrap_or_default(),
            project_id
        );

        let response = match self.schema.create_route {
            CreateRoute::Nodes => self.client.create_node(&project_id, &body).await,
            CreateRoute::Template { template_field } => {
                let template_id = data.get_string(template_field)?.ok_or_else(|| {
                    ProviderError::MissingAttribute {
                        kind: self.schema.type_name.to_string(),
                        field: template_field.to_string(),
                    }
                })?;
                self.client
                    .create_node_from_template(&project_id, template_id, &body)
                    .await
            }
        }
        .map_err(|e| ProviderError::from_client(Operation::Create, e))?;

        reconcile_helpers::expect_status(Operation::Create, &response, StatusCode::CREATED)?;

        let node_id = response
            .str_field("node_id")
            .map(str::to_string)
            .ok_or_else(|| ProviderError::Protocol {
                operation: Operation::Create,
                message: format!(
                    "controller reported success but returned no node_id: {}",
                    response.body_snippet()
                ),
            })?;

        data.set_identity(node_id.clone());
        if let Some(node) = &response.body {
            payload::apply_response(self.schema, data, node);
        }
        info!("Created {} {} in project {}", self.schema.type_name, node_id, project_id);

        if self.start_requested(data)? {
            self.start_node(&project_id, &node_id)
                .await
                .map_err(|e| ProviderError::PartialCreate {
                    node_id: node_id.clone(),
                    source: Box::new(e),
                })?;
        }

        Ok(node_id)
    }

    /// Start an existing node, e.g. to retry after a partial create.
    pub async fn start<D: ResourceData + ?Sized>(&self, data: &D) -> Result<(), ProviderError> {
        let node_id = reconcile_helpers::require_identity(Operation::Start, data)?;
        let project_id = reconcile_helpers::project_id(self.schema, data)?;
        self.start_node(&project_id, &node_id).await
    }

    fn start_requested<D: ResourceData + ?Sized>(&self, data: &D) -> Result<bool, ProviderError> {
        let Some(field) = self.schema.start_field else {
            return Ok(false);
        };
        let declared = data.get_bool(field)?;
        let default = self
            .schema
            .attribute(field)
            .and_then(|spec| spec.default)
            .and_then(|d| d.to_value().as_bool());
        Ok(declared.or(default).unwrap_or(false))
    }

    async fn start_node(&self, project_id: &str, node_id: &str) -> Result<(), ProviderError> {
        debug!("Starting {} {} in project {}", self.schema.type_name, node_id, project_id);
        let response = self
            .client
            .start_node(project_id, node_id)
            .await
            .map_err(|e| ProviderError::from_client(Operation::Start, e))?;
        reconcile_helpers::expect_status(Operation::Start, &response, StatusCode::OK)?;
        info!("Started {} {}", self.schema.type_name, node_id);
        Ok(())
    }
}
