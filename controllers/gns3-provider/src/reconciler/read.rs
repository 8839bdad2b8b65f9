use super::{ReadOutcome, Reconciler};
use crate::error::{Operation, ProviderError};
use crate::payload;
use crate::reconcile_helpers;
use crate::state::ResourceData;
use gns3_client::StatusCode;
use tracing::{debug, warn};

impl Reconciler {
    /// Refresh the instance from the controller.
    ///
    /// A 404 means the node was deleted out of band: the identity is cleared
    /// and [`ReadOutcome::Absent`] returned. An instance without identity is
    /// absent already and no request is made.
    pub async fn read<D: ResourceData + ?Sized>(&self, data: &mut D) -> Result<ReadOutcome, ProviderError> {
        let Some(node_id) = data.identity().map(str::to_string) else {
            debug!("{} has no identity, nothing to read", self.schema.type_name);
            return Ok(ReadOutcome::Absent);
        };
        let project_id = reconcile_helpers::project_id(self.schema, data)?;

        let response = self
            .client
            .get_node(&project_id, &node_id)
            .await
            .map_err(|e| ProviderError::from_client(Operation::Read, e))?;

        if response.status == StatusCode::NOT_FOUND {
            warn!(
                "{} {} no longer exists in project {}, clearing identity",
                self.schema.type_name, node_id, project_id
            );
            data.clear_identity();
            return Ok(ReadOutcome::Absent);
        }
        reconcile_helpers::expect_status(Operation::Read, &response, StatusCode::OK)?;

        let node = response
            .body
            .as_ref()
            .filter(|b| b.is_object())
            .ok_or_else(|| ProviderError::Protocol {
                operation: Operation::Read,
                message: format!("expected a node object, got: {}", response.body_snippet()),
            })?;
        payload::apply_response(self.schema, data, node);
        debug!("Refreshed {} {}", self.schema.type_name, node_id);
        Ok(ReadOutcome::Found)
    }
}
