use super::{DeleteOutcome, Reconciler};
use crate::error::{Operation, ProviderError};
use crate::reconcile_helpers;
use crate::state::ResourceData;
use gns3_client::StatusCode;
use tracing::{info, warn};

impl Reconciler {
    /// Delete the node. A node that is already gone counts as deleted.
    ///
    /// The identity is cleared on both success paths and left untouched on
    /// error. Calling this on an instance without identity is a caller error.
    pub async fn delete<D: ResourceData + ?Sized>(&self, data: &mut D) -> Result<DeleteOutcome, ProviderError> {
        let node_id = reconcile_helpers::require_identity(Operation::Delete, data)?;
        let project_id = reconcile_helpers::project_id(self.schema, data)?;

        let response = self
            .client
            .delete_node(&project_id, &node_id)
            .await
            .map_err(|e| ProviderError::from_client(Operation::Delete, e))?;

        let outcome = if response.status == StatusCode::NO_CONTENT {
            info!("Deleted {} {} from project {}", self.schema.type_name, node_id, project_id);
            DeleteOutcome::Deleted
        } else if response.status == StatusCode::NOT_FOUND {
            warn!(
                "{} {} was already deleted from project {}",
                self.schema.type_name, node_id, project_id
            );
            DeleteOutcome::AlreadyAbsent
        } else {
            return Err(reconcile_helpers::rejected(Operation::Delete, &response));
        };
        data.clear_identity();
        Ok(outcome)
    }
}
