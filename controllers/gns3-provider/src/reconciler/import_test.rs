//! Unit tests for the Import operation

#[cfg(test)]
mod tests {
    use crate::error::ProviderError;
    use crate::reconciler::ReadOutcome;
    use crate::schema::ResourceKind;
    use crate::state::{ResourceData, ResourceInstance};
    use crate::test_utils::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_import_canonical_for_every_kind() {
        for kind in ResourceKind::ALL {
            let (mock, reconciler) = mock_reconciler(kind);

            let instance = reconciler.import_instance("proj1/node1").unwrap();

            assert_eq!(instance.get_string("project_id").unwrap(), Some("proj1"));
            assert_eq!(instance.identity(), Some("node1"));
            assert_eq!(instance.attributes.len(), 1, "{} import set extra fields", kind);
            assert!(mock.requests().is_empty());
        }
    }

    #[tokio::test]
    async fn test_import_legacy_form_only_for_qemu() {
        let (_, qemu) = mock_reconciler(ResourceKind::VirtualMachine);
        let legacy = qemu.import_instance("node1,proj1").unwrap();
        let canonical = qemu.import_instance("proj1/node1").unwrap();
        assert_eq!(legacy, canonical);

        let (_, docker) = mock_reconciler(ResourceKind::Container);
        let err = docker.import_instance("node1,proj1").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidImportId { .. }));
    }

    #[tokio::test]
    async fn test_import_invalid_key_leaves_instance_untouched() {
        let (_, reconciler) = mock_reconciler(ResourceKind::VirtualMachine);
        let mut instance = ResourceInstance::new().with("name", "vm1");
        let before = instance.clone();

        let err = reconciler.import("node1", &mut instance).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("<project_id>/<node_id> or <node_id>,<project_id>"), "{msg}");
        assert_eq!(instance, before);
    }

    #[tokio::test]
    async fn test_import_then_read_populates_attributes() {
        let (mock, reconciler) = mock_reconciler(ResourceKind::Container);
        mock.add_node(
            "proj1",
            json!({
                "node_id": "node1",
                "name": "db",
                "compute_id": "local",
                "properties": {"image": "postgres:16", "environment": "PGDATA=/data"},
            }),
        );

        let mut instance = reconciler.import_instance("proj1/node1").unwrap();
        let outcome = reconciler.read(&mut instance).await.unwrap();

        assert_eq!(outcome, ReadOutcome::Found);
        assert_eq!(instance.get_string("name").unwrap(), Some("db"));
        assert_eq!(instance.get_string("image").unwrap(), Some("postgres:16"));
        assert_eq!(instance.get_string("docker_id").unwrap(), Some("node1"));
        // environment is never read back
        assert_eq!(instance.get_declared("environment"), None);
    }
}
