//! Resource Instance and the accessor interface the reconciler works through.
//!
//! The reconciler never sees how state is persisted. It reads desired values and
//! change flags through [`ResourceData`] and reports results back through the
//! same trait. [`ResourceInstance`] is the in-process implementation used by the
//! `gns3-provider` binary and the tests.

use crate::error::ProviderError;
use crate::schema::{Mutability, ResourceSchema};
use crate::value::{AttributeType, AttributeValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Accessor interface between the reconciler and the orchestrating layer
pub trait ResourceData {
    /// Remote object ID, `None` when the object does not exist remotely
    fn identity(&self) -> Option<&str>;

    /// Declared or last-observed value of a field, `None` when not set
    fn get_declared(&self, field: &str) -> Option<&AttributeValue>;

    /// Whether the orchestrating layer marked the field as changed
    fn has_changed(&self, field: &str) -> bool;

    fn set_computed(&mut self, field: &str, value: AttributeValue);

    fn set_identity(&mut self, id: String);

    fn clear_identity(&mut self);

    fn get_string(&self, field: &str) -> Result<Option<&str>, ProviderError> {
        typed(field, AttributeType::String, self.get_declared(field), AttributeValue::as_str)
    }

    fn get_int(&self, field: &str) -> Result<Option<i64>, ProviderError> {
        typed(field, AttributeType::Int, self.get_declared(field), AttributeValue::as_int)
    }

    fn get_bool(&self, field: &str) -> Result<Option<bool>, ProviderError> {
        typed(field, AttributeType::Bool, self.get_declared(field), AttributeValue::as_bool)
    }

    fn get_list(&self, field: &str) -> Result<Option<&[String]>, ProviderError> {
        typed(field, AttributeType::StringList, self.get_declared(field), AttributeValue::as_list)
    }

    fn get_map(&self, field: &str) -> Result<Option<&BTreeMap<String, String>>, ProviderError> {
        typed(field, AttributeType::StringMap, self.get_declared(field), AttributeValue::as_map)
    }

    fn set_string(&mut self, field: &str, value: String) {
        self.set_computed(field, AttributeValue::String(value));
    }

    fn set_int(&mut self, field: &str, value: i64) {
        self.set_computed(field, AttributeValue::Int(value));
    }

    fn set_bool(&mut self, field: &str, value: bool) {
        self.set_computed(field, AttributeValue::Bool(value));
    }

    fn set_list(&mut self, field: &str, value: Vec<String>) {
        self.set_computed(field, AttributeValue::List(value));
    }

    fn set_map(&mut self, field: &str, value: BTreeMap<String, String>) {
        self.set_computed(field, AttributeValue::Map(value));
    }
}

fn typed<'a, T>(
    field: &str,
    expected: AttributeType,
    value: Option<&'a AttributeValue>,
    get: impl FnOnce(&'a AttributeValue) -> Option<T>,
) -> Result<Option<T>, ProviderError> {
    match value {
        None => Ok(None),
        Some(v) => get(v).map(Some).ok_or_else(|| ProviderError::TypeMismatch {
            field: field.to_string(),
            expected: expected.to_string(),
            found: v.attribute_type().to_string(),
        }),
    }
}

/// In-process Resource Instance.
///
/// `attributes` holds both declared and server-observed values. `declared`
/// remembers which fields the user set, so a field dropped from the
/// declaration can be detected on the next plan. Change flags are transient
/// and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceInstance {
    /// Remote node ID; `None` when the node does not exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Declared and observed values
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Fields set by the declaration
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub declared: BTreeSet<String>,
    #[serde(skip)]
    changed: BTreeSet<String>,
}

impl ResourceInstance {
    /// Empty instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: declare a field
    pub fn with(mut self, field: &str, value: impl Into<AttributeValue>) -> Self {
        self.declare(field, value.into());
        self
    }

    /// Builder: set the remote ID
    pub fn with_identity(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Set a declared field
    pub fn declare(&mut self, field: &str, value: AttributeValue) {
        self.attributes.insert(field.to_string(), value);
        self.declared.insert(field.to_string());
    }

    /// Flag a field as changed
    pub fn mark_changed(&mut self, field: &str) {
        self.changed.insert(field.to_string());
    }

    /// Fields flagged as changed
    pub fn changed_fields(&self) -> impl Iterator<Item = &str> {
        self.changed.iter().map(String::as_str)
    }

    /// Drop all change flags
    pub fn clear_changes(&mut self) {
        self.changed.clear();
    }

    /// Merge a new declaration over the prior persisted instance.
    ///
    /// Identity and observed values carry over. Every non-computed field whose
    /// desired value (declared, else default) differs from the prior value is
    /// marked changed. A field that was declared before and is neither declared
    /// now nor defaulted is removed and marked changed.
    pub fn plan(
        schema: &ResourceSchema,
        declared: BTreeMap<String, AttributeValue>,
        prior: Option<&ResourceInstance>,
    ) -> Self {
        let mut next = prior.cloned().unwrap_or_default();
        next.changed.clear();
        let prior_declared = std::mem::take(&mut next.declared);

        for spec in schema.attributes {
            if spec.mutability == Mutability::Computed {
                continue;
            }
            let desired = declared
                .get(spec.name)
                .cloned()
                .or_else(|| spec.default.map(|d| d.to_value()));
            match desired {
                Some(value) => {
                    if next.attributes.get(spec.name) != Some(&value) {
                        next.changed.insert(spec.name.to_string());
                    }
                    next.attributes.insert(spec.name.to_string(), value);
                }
                None => {
                    if prior_declared.contains(spec.name)
                        && next.attributes.remove(spec.name).is_some()
                    {
                        next.changed.insert(spec.name.to_string());
                    }
                }
            }
        }
        next.declared = declared.into_keys().collect();
        next
    }

    /// Changed fields that force destroy-and-recreate. Only meaningful when the
    /// instance already exists.
    pub fn replacement_fields(&self, schema: &ResourceSchema) -> Vec<&'static str> {
        if self.id.is_none() {
            return Vec::new();
        }
        schema
            .immutable_attributes()
            .filter(|a| self.changed.contains(a.name))
            .map(|a| a.name)
            .collect()
    }
}

impl ResourceData for ResourceInstance {
    fn identity(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    fn get_declared(&self, field: &str) -> Option<&AttributeValue> {
        self.attributes.get(field)
    }

    fn has_changed(&self, field: &str) -> bool {
        self.changed.contains(field)
    }

    fn set_computed(&mut self, field: &str, value: AttributeValue) {
        self.attributes.insert(field.to_string(), value);
    }

    fn set_identity(&mut self, id: String) {
        self.id = Some(id);
    }

    fn clear_identity(&mut self) {
        self.id = None;
    }
}
