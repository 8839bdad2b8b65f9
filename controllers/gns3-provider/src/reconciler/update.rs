use super::{ReadOutcome, Reconciler, UpdateOutcome};
use crate::error::{Operation, ProviderError};
use crate::payload;
use crate::reconcile_helpers;
use crate::state::ResourceData;
use gns3_client::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

impl Reconciler {
    /// Send the changed mutable fields, then refresh with a Read.
    ///
    /// Immutable changes must already have been turned into a replacement by
    /// the caller; they are never part of the delta. Nothing is sent when no
    /// sendable field changed.
    pub async fn update<D: ResourceData + ?Sized>(&self, data: &mut D) -> Result<UpdateOutcome, ProviderError> {
        let Some(delta) = payload::update_delta(self.schema, data)? else {
            debug!("No changes for {}, skipping update", self.schema.type_name);
            return Ok(UpdateOutcome::NoChange);
        };
        let node_id = reconcile_helpers::require_identity(Operation::Update, data)?;
        let project_id = reconcile_helpers::project_id(self.schema, data)?;

        let fields: Vec<&str> = delta.keys().map(String::as_str).collect();
        info!(
            "Updating {} {} in project {} ({})",
            self.schema.type_name,
            node_id,
            project_id,
            fields.join(", ")
        );

        let response = self
            .client
            .update_node(&project_id, &node_id, &Value::Object(delta))
            .await
            .map_err(|e| ProviderError::from_client(Operation::Update, e))?;
        reconcile_helpers::expect_status(Operation::Update, &response, StatusCode::OK)?;

        if self.read(data).await? == ReadOutcome::Absent {
            warn!(
                "{} {} disappeared right after update",
                self.schema.type_name, node_id
            );
        }
        Ok(UpdateOutcome::Applied)
    }
}
