//! Sequential apply driver used by the `gns3-provider` binary.
//!
//! Plays the orchestrating layer: one resource at a time, in manifest order,
//! with no dependency graph. Import, refresh, then create, replace or update;
//! destroy for entries marked `destroy` and for tracked addresses that left
//! the manifest.

use crate::error::ProviderError;
use crate::provider::Provider;
use crate::reconciler::{DeleteOutcome, UpdateOutcome};
use crate::schema::ResourceKind;
use crate::state::{ResourceData, ResourceInstance};
use crate::value::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, warn};

/// Declared resources, in apply order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Resources in apply order
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
}

impl Manifest {
    /// Parse a manifest, rejecting duplicate addresses
    pub fn from_yaml(raw: &str) -> Result<Self, ProviderError> {
        let manifest: Manifest = serde_yaml::from_str(raw)
            .map_err(|e| ProviderError::InvalidConfig(format!("invalid manifest: {}", e)))?;
        let mut seen = std::collections::BTreeSet::new();
        for spec in &manifest.resources {
            if !seen.insert(spec.address.as_str()) {
                return Err(ProviderError::InvalidConfig(format!(
                    "duplicate resource address {:?}",
                    spec.address
                )));
            }
        }
        Ok(manifest)
    }

    /// Whether `address` is declared
    pub fn contains(&self, address: &str) -> bool {
        self.resources.iter().any(|r| r.address == address)
    }
}

/// One declared resource
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSpec {
    /// Stable name of the resource in the manifest and state file
    pub address: String,
    /// Resource kind
    pub kind: ResourceKind,
    /// Declared attributes
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Import key to adopt an existing node instead of creating one
    #[serde(default)]
    pub import: Option<String>,
    /// Remove the node instead of converging it
    #[serde(default)]
    pub destroy: bool,
}

/// Persisted instance plus the kind it was created as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedResource {
    /// Kind the node was created as
    pub kind: ResourceKind,
    /// Last known instance
    #[serde(flatten)]
    pub instance: ResourceInstance,
}

/// Address to tracked resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateFile {
    /// Tracked resources by address
    #[serde(default)]
    pub resources: BTreeMap<String, TrackedResource>,
}

impl StateFile {
    /// Parse a saved state file
    pub fn from_json(raw: &str) -> Result<Self, ProviderError> {
        serde_json::from_str(raw)
            .map_err(|e| ProviderError::InvalidConfig(format!("invalid state file: {}", e)))
    }

    /// Tracked addresses that are no longer declared
    pub fn orphans(&self, manifest: &Manifest) -> Vec<String> {
        self.resources
            .keys()
            .filter(|a| !manifest.contains(a))
            .cloned()
            .collect()
    }
}

/// What happened to one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// New node created
    Created,
    /// Node destroyed and recreated
    Replaced,
    /// Node updated in place
    Updated,
    /// Node already matched
    Unchanged,
    /// Node removed
    Deleted,
    /// Nothing to do (destroy of an untracked or already absent resource)
    Skipped,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Created => "created",
            Action::Replaced => "replaced",
            Action::Updated => "updated",
            Action::Unchanged => "unchanged",
            Action::Deleted => "deleted",
            Action::Skipped => "skipped",
        };
        f.write_str(name)
    }
}

/// Applies manifest entries one at a time
pub struct Applier<'a> {
    provider: &'a Provider,
}

impl<'a> Applier<'a> {
    /// Driver over `provider`
    pub fn new(provider: &'a Provider) -> Self {
        Self { provider }
    }

    /// Converge one declared resource. `state` is updated even when an error is
    /// returned, so an identity assigned before the failure is never lost.
    pub async fn apply_resource(
        &self,
        spec: &ResourceSpec,
        state: &mut StateFile,
    ) -> Result<Action, ProviderError> {
        if spec.destroy {
            return self.destroy(&spec.address, state).await;
        }
        let reconciler = self.provider.reconciler(spec.kind);
        let schema = reconciler.schema();

        let old_kind = state
            .resources
            .get(&spec.address)
            .map(|t| t.kind)
            .filter(|kind| *kind != spec.kind);
        if let Some(old_kind) = old_kind {
            info!(
                "{} changed kind from {} to {}, destroying the old node",
                spec.address, old_kind, spec.kind
            );
            self.destroy(&spec.address, state).await?;
        }

        match &spec.import {
            Some(key) if !state.resources.contains_key(&spec.address) => {
                let instance = reconciler.import_instance(key)?;
                self.track(state, spec, instance);
            }
            _ => {}
        }

        let mut prior = state.resources.get(&spec.address).map(|t| t.instance.clone());
        if let Some(instance) = prior.as_mut() {
            let refreshed = reconciler.read(instance).await;
            self.track(state, spec, instance.clone());
            refreshed?;
        }

        let mut next = ResourceInstance::plan(schema, spec.attributes.clone(), prior.as_ref());

        if next.identity().is_none() {
            let created = reconciler.create(&mut next).await;
            self.track_if_exists(state, spec, next);
            created?;
            return Ok(Action::Created);
        }

        let replace = next.replacement_fields(schema);
        if !replace.is_empty() {
            info!("{} must be replaced ({} changed)", spec.address, replace.join(", "));
            // The old node is addressed by its old project
            let mut old = prior.unwrap_or(next);
            reconciler.delete(&mut old).await?;
            self.track_if_exists(state, spec, old);
            let mut fresh = ResourceInstance::plan(schema, spec.attributes.clone(), None);
            let created = reconciler.create(&mut fresh).await;
            self.track_if_exists(state, spec, fresh);
            created?;
            return Ok(Action::Replaced);
        }

        match reconciler.update(&mut next).await? {
            UpdateOutcome::NoChange => {
                self.track(state, spec, next);
                Ok(Action::Unchanged)
            }
            UpdateOutcome::Applied => {
                self.track(state, spec, next);
                Ok(Action::Updated)
            }
        }
    }

    /// Delete a tracked resource and stop tracking it
    pub async fn destroy(&self, address: &str, state: &mut StateFile) -> Result<Action, ProviderError> {
        let Some(tracked) = state.resources.get_mut(address) else {
            return Ok(Action::Skipped);
        };
        if tracked.instance.identity().is_none() {
            warn!("{} has no remote node, dropping it from state", address);
            state.resources.remove(address);
            return Ok(Action::Skipped);
        }
        let outcome = self
            .provider
            .reconciler(tracked.kind)
            .delete(&mut tracked.instance)
            .await?;
        state.resources.remove(address);
        Ok(match outcome {
            DeleteOutcome::Deleted => Action::Deleted,
            DeleteOutcome::AlreadyAbsent => Action::Skipped,
        })
    }

    fn track(&self, state: &mut StateFile, spec: &ResourceSpec, mut instance: ResourceInstance) {
        instance.clear_changes();
        state.resources.insert(
            spec.address.clone(),
            TrackedResource {
                kind: spec.kind,
                instance,
            },
        );
    }

    /// Track the instance while it addresses a remote node, forget it otherwise
    fn track_if_exists(&self, state: &mut StateFile, spec: &ResourceSpec, instance: ResourceInstance) {
        if instance.identity().is_some() {
            self.track(state, spec, instance);
        } else {
            state.resources.remove(&spec.address);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::PROJECT;
    use gns3_client::{ApiResponse, Endpoint, MockGns3Client, StatusCode};
    use serde_json::json;
    use std::sync::Arc;

    const MANIFEST: &str = r#"
resources:
  - address: core
    kind: switch
    attributes:
      project_id: p1
      name: core-sw
      x: 100
      y: 50
  - address: web
    kind: docker
    attributes:
      project_id: p1
      name: web
      image: "nginx:1.27"
      environment:
        MODE: prod
"#;

    fn setup() -> (MockGns3Client, Provider) {
        let mock = MockGns3Client::new("http://test-gns3");
        let provider = Provider::with_client(Arc::new(mock.clone()));
        (mock, provider)
    }

    async fn apply_all(provider: &Provider, manifest: &Manifest, state: &mut StateFile) -> Vec<Action> {
        let applier = Applier::new(provider);
        let mut actions = Vec::new();
        for spec in &manifest.resources {
            actions.push(applier.apply_resource(spec, state).await.unwrap());
        }
        for address in state.orphans(manifest) {
            actions.push(applier.destroy(&address, state).await.unwrap());
        }
        actions
    }

    #[test]
    fn test_manifest_rejects_duplicate_addresses() {
        let raw = "resources:\n  - {address: a, kind: switch}\n  - {address: a, kind: cloud}\n";
        assert!(matches!(Manifest::from_yaml(raw), Err(ProviderError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_apply_is_convergent() {
        let (mock, provider) = setup();
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let mut state = StateFile::default();

        let first = apply_all(&provider, &manifest, &mut state).await;
        assert_eq!(first, vec![Action::Created, Action::Created]);
        assert_eq!(mock.node_count(), 2);

        mock.clear_requests();
        let second = apply_all(&provider, &manifest, &mut state).await;
        assert_eq!(second, vec![Action::Unchanged, Action::Unchanged]);
        assert!(mock.requests_for(Endpoint::UpdateNode).is_empty());
        assert!(mock.requests_for(Endpoint::CreateNode).is_empty());
    }

    #[tokio::test]
    async fn test_state_survives_json_round_trip() {
        let (_, provider) = setup();
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let mut state = StateFile::default();
        apply_all(&provider, &manifest, &mut state).await;

        let saved = serde_json::to_string_pretty(&state).unwrap();
        let mut loaded = StateFile::from_json(&saved).unwrap();
        assert_eq!(loaded, state);

        let again = apply_all(&provider, &manifest, &mut loaded).await;
        assert_eq!(again, vec![Action::Unchanged, Action::Unchanged]);
    }

    #[tokio::test]
    async fn test_drift_recreates_deleted_node() {
        let (mock, provider) = setup();
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let mut state = StateFile::default();
        apply_all(&provider, &manifest, &mut state).await;

        let old_id = state.resources["core"].instance.identity().unwrap().to_string();
        mock.remove_node(PROJECT, &old_id);

        let actions = apply_all(&provider, &manifest, &mut state).await;
        assert_eq!(actions, vec![Action::Created, Action::Unchanged]);
        let new_id = state.resources["core"].instance.identity().unwrap();
        assert_ne!(new_id, old_id);
        assert_eq!(mock.node(PROJECT, new_id).unwrap()["x"], 100);
    }

    #[tokio::test]
    async fn test_mutable_change_updates_and_immutable_change_replaces() {
        let (mock, provider) = setup();
        let mut manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let mut state = StateFile::default();
        apply_all(&provider, &manifest, &mut state).await;
        let web_id = state.resources["web"].instance.identity().unwrap().to_string();

        manifest.resources[0]
            .attributes
            .insert("name".to_string(), "spine".into());
        manifest.resources[1]
            .attributes
            .insert("image".to_string(), "nginx:1.28".into());

        let actions = apply_all(&provider, &manifest, &mut state).await;
        assert_eq!(actions, vec![Action::Updated, Action::Replaced]);
        assert!(mock.node(PROJECT, &web_id).is_none());
        let new_web = state.resources["web"].instance.identity().unwrap();
        assert_eq!(mock.node(PROJECT, new_web).unwrap()["properties"]["image"], "nginx:1.28");
    }

    #[tokio::test]
    async fn test_removed_and_destroyed_resources_are_deleted() {
        let (mock, provider) = setup();
        let mut manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let mut state = StateFile::default();
        apply_all(&provider, &manifest, &mut state).await;

        manifest.resources[0].destroy = true;
        manifest.resources.truncate(1);

        let actions = apply_all(&provider, &manifest, &mut state).await;
        assert_eq!(actions, vec![Action::Deleted, Action::Deleted]);
        assert!(state.resources.is_empty());
        assert_eq!(mock.node_count(), 0);

        // Nothing left to delete
        let actions = apply_all(&provider, &manifest, &mut state).await;
        assert_eq!(actions, vec![Action::Skipped]);
    }

    #[tokio::test]
    async fn test_import_adopts_existing_node() {
        let (mock, provider) = setup();
        mock.add_node(
            PROJECT,
            json!({"node_id": "vm-7", "name": "router", "compute_id": "local", "x": 0, "y": 0,
                   "symbol": ":/symbols/classic/computer.svg",
                   "properties": {"adapter_type": "e1000", "adapters": 1, "console_type": "telnet",
                                  "cpus": 1, "ram": 256}}),
        );
        let manifest = Manifest::from_yaml(
            r#"
resources:
  - address: router
    kind: qemu
    import: "vm-7,p1"
    attributes:
      project_id: p1
      name: router
      ram: 512
"#,
        )
        .unwrap();
        let mut state = StateFile::default();

        let actions = apply_all(&provider, &manifest, &mut state).await;

        assert_eq!(actions, vec![Action::Updated]);
        assert!(mock.requests_for(Endpoint::CreateNode).is_empty());
        let update = &mock.requests_for(Endpoint::UpdateNode)[0];
        assert_eq!(update.body, Some(json!({"properties": {"ram": 512}})));
        assert_eq!(state.resources["router"].instance.identity(), Some("vm-7"));
    }

    #[tokio::test]
    async fn test_import_template_node_leaves_it_in_place() {
        let (mock, provider) = setup();
        mock.add_node(
            PROJECT,
            json!({"node_id": "pc-7", "template_id": "t1", "name": "pc", "compute_id": "local",
                   "x": 0, "y": 0}),
        );
        let manifest = Manifest::from_yaml(
            r#"
resources:
  - address: pc
    kind: template
    import: "p1/pc-7"
    attributes:
      project_id: p1
      template_id: t1
      name: pc
"#,
        )
        .unwrap();
        let mut state = StateFile::default();

        let actions = apply_all(&provider, &manifest, &mut state).await;

        assert_eq!(actions, vec![Action::Unchanged]);
        assert!(mock.requests_for(Endpoint::DeleteNode).is_empty());
        assert!(mock.requests_for(Endpoint::CreateFromTemplate).is_empty());
        assert!(mock.node(PROJECT, "pc-7").is_some());
        let tracked = &state.resources["pc"].instance;
        assert_eq!(tracked.identity(), Some("pc-7"));
        assert_eq!(tracked.get_string("template_id").unwrap(), Some("t1"));
    }

    #[tokio::test]
    async fn test_partial_create_keeps_identity_in_state() {
        let (mock, provider) = setup();
        mock.push_response(
            Endpoint::StartNode,
            ApiResponse::json(StatusCode::CONFLICT, json!({"message": "no image"})),
        );
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let mut state = StateFile::default();
        let applier = Applier::new(&provider);

        let err = applier
            .apply_resource(&manifest.resources[1], &mut state)
            .await
            .unwrap_err();

        let node_id = err.created_node_id().unwrap();
        assert_eq!(state.resources["web"].instance.identity(), Some(node_id));
    }

    #[tokio::test]
    async fn test_failed_create_is_not_tracked() {
        let (mock, provider) = setup();
        mock.push_response(
            Endpoint::CreateNode,
            ApiResponse::json(StatusCode::BAD_REQUEST, json!({"message": "bad"})),
        );
        let manifest = Manifest::from_yaml(MANIFEST).unwrap();
        let mut state = StateFile::default();

        let result = Applier::new(&provider)
            .apply_resource(&manifest.resources[0], &mut state)
            .await;

        assert!(result.is_err());
        assert!(state.resources.is_empty());
    }
}
