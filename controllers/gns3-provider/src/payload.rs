//! Projection between Resource Instances and controller node payloads.
//!
//! Pure functions driven by the schema tables: no I/O, no logging.

use crate::error::ProviderError;
use crate::schema::{AttributeSpec, Mutability, ResourceSchema, Wire, WireEncoding};
use crate::state::ResourceData;
use crate::value::AttributeValue;
use serde_json::{Map, Value};

const PROPERTIES: &str = "properties";

/// Desired value of a field: declared, else the schema default
pub fn resolve<D: ResourceData + ?Sized>(
    spec: &AttributeSpec,
    data: &D,
) -> Option<AttributeValue> {
    data.get_declared(spec.name)
        .cloned()
        .or_else(|| spec.default.map(|d| d.to_value()))
}

/// Check required fields and declared types against the schema.
pub fn validate<D: ResourceData + ?Sized>(
    schema: &ResourceSchema,
    data: &D,
) -> Result<(), ProviderError> {
    for spec in schema.attributes {
        if spec.mutability == Mutability::Computed {
            continue;
        }
        match data.get_declared(spec.name) {
            Some(value) => check_type(spec, value)?,
            None if spec.required && spec.default.is_none() => {
                return Err(ProviderError::MissingAttribute {
                    kind: schema.type_name.to_string(),
                    field: spec.name.to_string(),
                });
            }
            None => {}
        }
    }
    Ok(())
}

fn check_type(spec: &AttributeSpec, value: &AttributeValue) -> Result<(), ProviderError> {
    if value.attribute_type() == spec.ty {
        Ok(())
    } else {
        Err(ProviderError::TypeMismatch {
            field: spec.name.to_string(),
            expected: spec.ty.to_string(),
            found: value.attribute_type().to_string(),
        })
    }
}

/// Top-level body plus the nested `properties` group, joined on `finish`
#[derive(Default)]
struct Body {
    top: Map<String, Value>,
    properties: Map<String, Value>,
}

impl Body {
    fn insert(&mut self, wire: Wire, value: Value) {
        match wire {
            Wire::Top(key) => {
                self.top.insert(key.to_string(), value);
            }
            Wire::Properties(key) => {
                self.properties.insert(key.to_string(), value);
            }
            Wire::Path(_) | Wire::Local => {}
        }
    }

    fn insert_field(&mut self, spec: &AttributeSpec, value: &AttributeValue) {
        self.insert(spec.wire, encode(spec, value));
        let Some((key, companion)) = spec.companion else {
            return;
        };
        if !value.is_empty() {
            let wire = match spec.wire {
                Wire::Properties(_) => Wire::Properties(key),
                _ => Wire::Top(key),
            };
            self.insert(wire, Value::from(companion));
        }
    }

    fn is_empty(&self) -> bool {
        self.top.is_empty() && self.properties.is_empty()
    }

    fn finish(mut self) -> Map<String, Value> {
        if !self.properties.is_empty() {
            self.top
                .insert(PROPERTIES.to_string(), Value::Object(self.properties));
        }
        self.top
    }
}

fn encode(spec: &AttributeSpec, value: &AttributeValue) -> Value {
    match (spec.encoding, value) {
        (WireEncoding::KeyValuePairs(sep), AttributeValue::Map(map)) => Value::from(
            map.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(sep),
        ),
        _ => value.to_json(),
    }
}

/// Body for the create request.
///
/// Carries the kind's constants and `node_type`, every declared or defaulted
/// sendable field, and omits optional fields that are not set.
pub fn create_body<D: ResourceData + ?Sized>(
    schema: &ResourceSchema,
    data: &D,
) -> Result<Map<String, Value>, ProviderError> {
    validate(schema, data)?;

    let mut body = Body::default();
    for constant in schema.constants {
        body.insert(constant.wire, Value::from(constant.value));
    }
    if let Some(node_type) = schema.node_type {
        body.insert(Wire::Top("node_type"), Value::from(node_type));
    }
    for spec in schema.attributes.iter().filter(|a| a.is_sent()) {
        if let Some(value) = resolve(spec, data) {
            body.insert_field(spec, &value);
        }
    }
    Ok(body.finish())
}

/// Minimal update body, or `None` when nothing sendable changed.
///
/// Only mutable fields flagged as changed are included. A changed field with
/// no declared value and no default is sent as its type's zero value so the
/// controller clears it.
pub fn update_delta<D: ResourceData + ?Sized>(
    schema: &ResourceSchema,
    data: &D,
) -> Result<Option<Map<String, Value>>, ProviderError> {
    let mut body = Body::default();
    for spec in schema
        .attributes
        .iter()
        .filter(|a| a.mutability == Mutability::Mutable && a.is_sent())
        .filter(|a| data.has_changed(a.name))
    {
        let value = match resolve(spec, data) {
            Some(value) => {
                check_type(spec, &value)?;
                value
            }
            None => AttributeValue::zero(spec.ty),
        };
        body.insert_field(spec, &value);
    }

    if body.is_empty() {
        Ok(None)
    } else {
        Ok(Some(body.finish()))
    }
}

/// Project a node object from a response onto the instance.
///
/// Fields missing from the response, or of an unexpected type, are left as
/// they were. Write-only fields are never overwritten.
pub fn apply_response<D: ResourceData + ?Sized>(schema: &ResourceSchema, data: &mut D, node: &Value) {
    let Some(obj) = node.as_object() else {
        return;
    };
    let properties = obj.get(PROPERTIES).and_then(Value::as_object);

    for spec in schema.attributes.iter().filter(|a| a.read_back) {
        let raw = match spec.wire {
            Wire::Top(key) => obj.get(key),
            Wire::Properties(key) => properties.and_then(|p| p.get(key)),
            Wire::Path(echo) => echo.and_then(|key| obj.get(key)),
            Wire::Local => None,
        };
        if let Some(value) = raw.and_then(|r| AttributeValue::from_json(spec.ty, r)) {
            data.set_computed(spec.name, value);
        }
    }
}
