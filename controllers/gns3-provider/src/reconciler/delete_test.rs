//! Unit tests for the Delete operation

#[cfg(test)]
mod tests {
    use crate::error::{Operation, ProviderError};
    use crate::reconciler::DeleteOutcome;
    use crate::schema::ResourceKind;
    use crate::state::{ResourceData, ResourceInstance};
    use crate::test_utils::*;
    use gns3_client::{ApiResponse, Endpoint, Gns3Error, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_delete_existing_node() {
        let (mock, reconciler) = mock_reconciler(ResourceKind::Switch);
        let mut switch = create_test_switch("sw1");
        let node_id = reconciler.create(&mut switch).await.unwrap();

        let outcome = reconciler.delete(&mut switch).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(switch.identity(), None);
        assert!(mock.node(PROJECT, &node_id).is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        // Setup: two instances pointing at the same node
        let (mock, reconciler) = mock_reconciler(ResourceKind::Cloud);
        mock.add_node(PROJECT, json!({"node_id": "n1", "name": "cloud1"}));
        let mut first = ResourceInstance::new()
            .with("project_id", PROJECT)
            .with_identity("n1");
        let mut second = first.clone();

        // Execute
        let deleted = reconciler.delete(&mut first).await.unwrap();
        let already = reconciler.delete(&mut second).await.unwrap();

        // Assert: same end state either way
        assert_eq!(deleted, DeleteOutcome::Deleted);
        assert_eq!(already, DeleteOutcome::AlreadyAbsent);
        assert_eq!(first, second);
        assert_eq!(mock.requests_for(Endpoint::DeleteNode).len(), 2);
    }

    #[tokio::test]
    async fn test_delete_ok_status_is_rejected() {
        let (mock, reconciler) = mock_reconciler(ResourceKind::Switch);
        mock.push_response(Endpoint::DeleteNode, ApiResponse::empty(StatusCode::OK));
        let mut switch = ResourceInstance::new()
            .with("project_id", PROJECT)
            .with_identity("n1");

        let err = reconciler.delete(&mut switch).await.unwrap_err();

        assert!(matches!(
            err,
            ProviderError::Rejected { operation: Operation::Delete, status, .. } if status == StatusCode::OK
        ));
        assert_eq!(switch.identity(), Some("n1"));
    }

    #[tokio::test]
    async fn test_delete_transport_error_keeps_identity() {
        let (mock, reconciler) = mock_reconciler(ResourceKind::Switch);
        mock.push_failure(
            Endpoint::DeleteNode,
            Gns3Error::Timeout("http://test-gns3/v2/projects/p1/nodes/n1".to_string()),
        );
        let mut switch = ResourceInstance::new()
            .with("project_id", PROJECT)
            .with_identity("n1");

        let err = reconciler.delete(&mut switch).await.unwrap_err();

        assert!(matches!(err, ProviderError::Timeout { operation: Operation::Delete }));
        assert!(err.is_ambiguous());
        assert_eq!(switch.identity(), Some("n1"));
    }

    #[tokio::test]
    async fn test_delete_without_identity_is_precondition_error() {
        let (mock, reconciler) = mock_reconciler(ResourceKind::Switch);
        let mut switch = ResourceInstance::new().with("project_id", PROJECT);

        let err = reconciler.delete(&mut switch).await.unwrap_err();

        assert!(matches!(err, ProviderError::MissingIdentity { operation: Operation::Delete }));
        assert!(mock.requests().is_empty());
    }
}
