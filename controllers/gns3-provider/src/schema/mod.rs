//! Attribute schema tables.
//!
//! Each resource kind is described by a static [`ResourceSchema`]: its fields,
//! their types, defaults, mutability and where they go on the wire. The
//! reconciler is generic; everything that differs between kinds lives here as
//! data.
//!
//! - `kinds`: the five per-kind tables

mod kinds;

use crate::value::{AttributeType, AttributeValue};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use kinds::{CLOUD, CONTAINER, SWITCH, TEMPLATE, VIRTUAL_MACHINE};

/// Field holding the owning project ID in every kind
pub const PROJECT_FIELD: &str = "project_id";

/// Resource kinds managed by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// `gns3_cloud`
    Cloud,
    /// `gns3_switch`
    Switch,
    /// `gns3_template`
    Template,
    /// `gns3_docker`
    #[serde(alias = "docker")]
    Container,
    /// `gns3_qemu_node`
    #[serde(alias = "qemu")]
    VirtualMachine,
}

impl ResourceKind {
    /// Every kind, in declaration order
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Cloud,
        ResourceKind::Switch,
        ResourceKind::Template,
        ResourceKind::Container,
        ResourceKind::VirtualMachine,
    ];

    /// Static schema table of this kind
    pub fn schema(self) -> &'static ResourceSchema {
        match self {
            ResourceKind::Cloud => &CLOUD,
            ResourceKind::Switch => &SWITCH,
            ResourceKind::Template => &TEMPLATE,
            ResourceKind::Container => &CONTAINER,
            ResourceKind::VirtualMachine => &VIRTUAL_MACHINE,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema().type_name)
    }
}

/// How an attribute may change after the node exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// Any change means destroy and recreate
    Immutable,
    /// Sent in a partial update
    Mutable,
    /// Only ever populated from responses
    Computed,
}

/// Where an attribute lives in requests and responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    /// Top-level key of the node object
    Top(&'static str),
    /// Key inside the nested `properties` object
    Properties(&'static str),
    /// Part of the request path, never in a body. Responses echo it under the
    /// given top-level key, if any.
    Path(Option<&'static str>),
    /// Provider-side only, never sent
    Local,
}

/// How a value is rendered for the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEncoding {
    /// Sent as the JSON form of its type
    Native,
    /// String map sent as sorted `KEY=VALUE` pairs joined by the separator
    KeyValuePairs(&'static str),
}

/// Compile-time default value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// String default
    Str(&'static str),
    /// Integer default
    Int(i64),
    /// Boolean default
    Bool(bool),
}

impl DefaultValue {
    /// Runtime value of this default
    pub fn to_value(self) -> AttributeValue {
        match self {
            DefaultValue::Str(s) => AttributeValue::from(s),
            DefaultValue::Int(i) => AttributeValue::Int(i),
            DefaultValue::Bool(b) => AttributeValue::Bool(b),
        }
    }
}

/// Declaration of one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Attribute name
    pub name: &'static str,
    /// Type category
    pub ty: AttributeType,
    /// Must be declared on create
    pub required: bool,
    /// Applied when not declared
    pub default: Option<DefaultValue>,
    /// How the attribute may change
    pub mutability: Mutability,
    /// Location in requests and responses
    pub wire: Wire,
    /// Rendering on the wire
    pub encoding: WireEncoding,
    /// Whether responses are projected back onto this attribute
    pub read_back: bool,
    /// Extra key/value sent in the same group whenever this field is sent non-empty
    pub companion: Option<(&'static str, &'static str)>,
}

impl AttributeSpec {
    /// Optional, mutable, top-level attribute keyed by its own name
    pub const fn new(name: &'static str, ty: AttributeType) -> Self {
        Self {
            name,
            ty,
            required: false,
            default: None,
            mutability: Mutability::Mutable,
            wire: Wire::Top(name),
            encoding: WireEncoding::Native,
            read_back: true,
            companion: None,
        }
    }

    /// Must be declared
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// String default
    pub const fn default_str(mut self, value: &'static str) -> Self {
        self.default = Some(DefaultValue::Str(value));
        self
    }

    /// Integer default
    pub const fn default_int(mut self, value: i64) -> Self {
        self.default = Some(DefaultValue::Int(value));
        self
    }

    /// Boolean default
    pub const fn default_bool(mut self, value: bool) -> Self {
        self.default = Some(DefaultValue::Bool(value));
        self
    }

    /// Changing it replaces the node
    pub const fn immutable(mut self) -> Self {
        self.mutability = Mutability::Immutable;
        self
    }

    /// Computed from the response key `key`
    pub const fn computed_from(mut self, key: &'static str) -> Self {
        self.mutability = Mutability::Computed;
        self.wire = Wire::Top(key);
        self
    }

    /// Lives under `properties` with the same key
    pub const fn nested(mut self) -> Self {
        self.wire = Wire::Properties(self.name);
        self
    }

    /// Routed through the request path only
    pub const fn path(mut self) -> Self {
        self.wire = Wire::Path(None);
        self.read_back = false;
        self
    }

    /// Routed through the request path and echoed back on the node object
    pub const fn path_echoed(mut self) -> Self {
        self.wire = Wire::Path(Some(self.name));
        self.read_back = true;
        self
    }

    /// Provider-side only
    pub const fn local(mut self) -> Self {
        self.wire = Wire::Local;
        self.read_back = false;
        self
    }

    /// Sent but never read back
    pub const fn write_only(mut self) -> Self {
        self.read_back = false;
        self
    }

    /// Send a string map as `KEY=VALUE` pairs joined by `separator`
    pub const fn joined(mut self, separator: &'static str) -> Self {
        self.encoding = WireEncoding::KeyValuePairs(separator);
        self
    }

    /// Send `key: value` alongside whenever this field is sent non-empty
    pub const fn with_companion(mut self, key: &'static str, value: &'static str) -> Self {
        self.companion = Some((key, value));
        self
    }

    /// True for attributes that can appear in a request body
    pub fn is_sent(&self) -> bool {
        self.mutability != Mutability::Computed
            && matches!(self.wire, Wire::Top(_) | Wire::Properties(_))
    }
}

/// Constant wire field sent on create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    /// Where the field goes
    pub wire: Wire,
    /// Value sent
    pub value: &'static str,
}

/// Which endpoint creates the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateRoute {
    /// `POST /v2/projects/{project}/nodes`
    Nodes,
    /// `POST /v2/projects/{project}/templates/{template_id}`, ID taken from the named field
    Template {
        /// Attribute holding the template ID
        template_field: &'static str,
    },
}

/// Schema of one resource kind
#[derive(Debug)]
pub struct ResourceSchema {
    /// Kind this table describes
    pub kind: ResourceKind,
    /// Name the orchestrating layer knows the kind by
    pub type_name: &'static str,
    /// `node_type` sent on create, if the route needs one
    pub node_type: Option<&'static str>,
    /// Endpoint used by create
    pub create_route: CreateRoute,
    /// Boolean attribute that requests the post-create start step
    pub start_field: Option<&'static str>,
    /// Whether the legacy `<node_id>,<project_id>` import form is accepted
    pub legacy_import: bool,
    /// Fixed fields added to every create body
    pub constants: &'static [Constant],
    /// Declared attributes
    pub attributes: &'static [AttributeSpec],
}

impl ResourceSchema {
    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&'static AttributeSpec> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Attributes whose change forces destroy-and-recreate
    pub fn immutable_attributes(&self) -> impl Iterator<Item = &'static AttributeSpec> {
        self.attributes
            .iter()
            .filter(|a| a.mutability == Mutability::Immutable)
    }

    /// Whether any attribute lives under the nested `properties` object
    pub fn has_nested_group(&self) -> bool {
        self.attributes
            .iter()
            .any(|a| matches!(a.wire, Wire::Properties(_)))
    }
}
