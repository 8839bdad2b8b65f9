//! Test utilities for unit testing reconcilers
//!
//! This module provides helpers for creating test instances and wiring a
//! reconciler to the in-memory mock controller.

use crate::reconciler::Reconciler;
use crate::schema::ResourceKind;
use crate::state::ResourceInstance;
use gns3_client::MockGns3Client;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const PROJECT: &str = "p1";

/// Reconciler for `kind` backed by a fresh mock controller
pub fn mock_reconciler(kind: ResourceKind) -> (MockGns3Client, Reconciler) {
    let mock = MockGns3Client::new("http://test-gns3");
    let reconciler = Reconciler::new(Arc::new(mock.clone()), kind);
    (mock, reconciler)
}

/// Switch instance as planned for first creation
pub fn create_test_switch(name: &str) -> ResourceInstance {
    planned(
        ResourceKind::Switch,
        ResourceInstance::new()
            .with("project_id", PROJECT)
            .with("name", name),
    )
}

/// Container instance as planned for first creation
pub fn create_test_docker(name: &str, image: &str) -> ResourceInstance {
    planned(
        ResourceKind::Container,
        ResourceInstance::new()
            .with("project_id", PROJECT)
            .with("name", name)
            .with("image", image),
    )
}

/// QEMU instance as planned for first creation
pub fn create_test_qemu(name: &str) -> ResourceInstance {
    planned(
        ResourceKind::VirtualMachine,
        ResourceInstance::new()
            .with("project_id", PROJECT)
            .with("name", name),
    )
}

/// Template-instantiated instance as planned for first creation
pub fn create_test_template_node(name: &str, template_id: &str) -> ResourceInstance {
    planned(
        ResourceKind::Template,
        ResourceInstance::new()
            .with("project_id", PROJECT)
            .with("template_id", template_id)
            .with("name", name),
    )
}

/// Re-plan `instance`'s declared fields against no prior state so every
/// declared or defaulted field is marked changed.
pub fn planned(kind: ResourceKind, instance: ResourceInstance) -> ResourceInstance {
    let declared: BTreeMap<_, _> = instance
        .declared
        .iter()
        .filter_map(|k| instance.attributes.get(k).map(|v| (k.clone(), v.clone())))
        .collect();
    ResourceInstance::plan(kind.schema(), declared, None)
}

/// Re-plan with new declared values on top of an existing instance
pub fn replanned(
    kind: ResourceKind,
    prior: &ResourceInstance,
    changes: &[(&str, crate::value::AttributeValue)],
) -> ResourceInstance {
    let mut declared: BTreeMap<String, _> = prior
        .declared
        .iter()
        .filter_map(|k| prior.attributes.get(k).map(|v| (k.clone(), v.clone())))
        .collect();
    for (field, value) in changes {
        declared.insert(field.to_string(), value.clone());
    }
    ResourceInstance::plan(kind.schema(), declared, Some(prior))
}
