//! Typed attribute values.
//!
//! Every declared or observed attribute is one of five type categories. A value
//! that is not in an instance's attribute map is "not set"; there is no
//! separate null.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Type category of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    /// Single string
    String,
    /// 64-bit integer
    Int,
    /// Boolean
    Bool,
    /// Ordered list of strings
    StringList,
    /// String to string map
    StringMap,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::String => "string",
            AttributeType::Int => "integer",
            AttributeType::Bool => "boolean",
            AttributeType::StringList => "list of strings",
            AttributeType::StringMap => "map of strings",
        };
        f.write_str(name)
    }
}

/// A single attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// String value
    String(String),
    /// List of strings
    List(Vec<String>),
    /// Map of strings
    Map(BTreeMap<String, String>),
}

impl AttributeValue {
    /// Type category of this value
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::Bool(_) => AttributeType::Bool,
            AttributeValue::Int(_) => AttributeType::Int,
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::List(_) => AttributeType::StringList,
            AttributeValue::Map(_) => AttributeType::StringMap,
        }
    }

    /// The value a cleared field is sent as
    pub fn zero(ty: AttributeType) -> Self {
        match ty {
            AttributeType::String => AttributeValue::String(String::new()),
            AttributeType::Int => AttributeValue::Int(0),
            AttributeType::Bool => AttributeValue::Bool(false),
            AttributeType::StringList => AttributeValue::List(Vec::new()),
            AttributeType::StringMap => AttributeValue::Map(BTreeMap::new()),
        }
    }

    /// String contents, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer contents, if this is an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Boolean contents, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// List contents, if this is a list
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::List(l) => Some(l),
            _ => None,
        }
    }

    /// Map contents, if this is a map
    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            AttributeValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// JSON form sent on the wire
    pub fn to_json(&self) -> Value {
        match self {
            AttributeValue::Bool(b) => Value::from(*b),
            AttributeValue::Int(i) => Value::from(*i),
            AttributeValue::String(s) => Value::from(s.as_str()),
            AttributeValue::List(l) => Value::from(l.clone()),
            AttributeValue::Map(m) => Value::Object(
                m.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
                    .collect(),
            ),
        }
    }

    /// Convert a response value into `ty`, or `None` if it does not fit.
    ///
    /// JSON numbers with a fractional part are truncated; the controller
    /// reports some integer fields as floats.
    pub fn from_json(ty: AttributeType, value: &Value) -> Option<Self> {
        match ty {
            AttributeType::String => value.as_str().map(|s| AttributeValue::String(s.to_string())),
            AttributeType::Int => value
                .as_i64()
                .or_else(|| value.as_f64().map(|f| f as i64))
                .map(AttributeValue::Int),
            AttributeType::Bool => value.as_bool().map(AttributeValue::Bool),
            AttributeType::StringList => value.as_array().and_then(|items| {
                items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .map(AttributeValue::List)
            }),
            AttributeType::StringMap => value.as_object().and_then(|obj| {
                obj.iter()
                    .map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect::<Option<BTreeMap<_, _>>>()
                    .map(AttributeValue::Map)
            }),
        }
    }

    /// True for empty strings, lists and maps
    pub fn is_empty(&self) -> bool {
        match self {
            AttributeValue::String(s) => s.is_empty(),
            AttributeValue::List(l) => l.is_empty(),
            AttributeValue::Map(m) => m.is_empty(),
            AttributeValue::Bool(_) | AttributeValue::Int(_) => false,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Int(i)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(l: Vec<String>) -> Self {
        AttributeValue::List(l)
    }
}

impl From<BTreeMap<String, String>> for AttributeValue {
    fn from(m: BTreeMap<String, String>) -> Self {
        AttributeValue::Map(m)
    }
}
