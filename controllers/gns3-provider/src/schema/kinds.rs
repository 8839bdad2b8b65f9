use super::{
    AttributeSpec, Constant, CreateRoute, PROJECT_FIELD, ResourceKind, ResourceSchema, Wire,
};
use crate::value::AttributeType::{Bool, Int, String as Str, StringList, StringMap};

const PROJECT_ID: AttributeSpec = AttributeSpec::new(PROJECT_FIELD, Str)
    .required()
    .immutable()
    .path();
const NAME: AttributeSpec = AttributeSpec::new("name", Str).required();
const COMPUTE_ID: AttributeSpec = AttributeSpec::new("compute_id", Str).default_str("local");
const X: AttributeSpec = AttributeSpec::new("x", Int);
const Y: AttributeSpec = AttributeSpec::new("y", Int);

/// Cloud node bridging host interfaces
pub static CLOUD: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Cloud,
    type_name: "gns3_cloud",
    node_type: Some("cloud"),
    create_route: CreateRoute::Nodes,
    start_field: None,
    legacy_import: false,
    constants: &[],
    attributes: &[
        PROJECT_ID,
        NAME,
        COMPUTE_ID,
        X,
        Y,
        AttributeSpec::new("symbol", Str).default_str(":/symbols/classic/cloud.svg"),
        AttributeSpec::new("cloud_id", Str).computed_from("node_id"),
    ],
};

/// Built-in ethernet switch
pub static SWITCH: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Switch,
    type_name: "gns3_switch",
    node_type: Some("ethernet_switch"),
    create_route: CreateRoute::Nodes,
    start_field: None,
    legacy_import: false,
    constants: &[],
    attributes: &[
        PROJECT_ID,
        NAME,
        COMPUTE_ID,
        X,
        Y,
        AttributeSpec::new("symbol", Str).default_str(":/symbols/classic/ethernet_switch.svg"),
        AttributeSpec::new("switch_id", Str).computed_from("node_id"),
    ],
};

/// Node instantiated from a controller template
pub static TEMPLATE: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Template,
    type_name: "gns3_template",
    node_type: None,
    create_route: CreateRoute::Template {
        template_field: "template_id",
    },
    start_field: Some("start"),
    legacy_import: false,
    constants: &[],
    attributes: &[
        PROJECT_ID,
        AttributeSpec::new("template_id", Str)
            .required()
            .immutable()
            .path_echoed(),
        NAME,
        COMPUTE_ID,
        X.default_int(0),
        Y.default_int(0),
        AttributeSpec::new("start", Bool).default_bool(false).local(),
    ],
};

/// Docker container node
pub static CONTAINER: ResourceSchema = ResourceSchema {
    kind: ResourceKind::Container,
    type_name: "gns3_docker",
    node_type: Some("docker"),
    create_route: CreateRoute::Nodes,
    start_field: Some("start"),
    legacy_import: false,
    constants: &[Constant {
        wire: Wire::Properties("console_type"),
        value: "none",
    }],
    attributes: &[
        PROJECT_ID,
        NAME,
        COMPUTE_ID,
        AttributeSpec::new("image", Str).required().immutable().nested(),
        AttributeSpec::new("environment", StringMap)
            .nested()
            .joined(",")
            .write_only(),
        X,
        Y,
        AttributeSpec::new("extra_volumes", StringList).nested(),
        AttributeSpec::new("start_command", Str).nested(),
        AttributeSpec::new("docker_id", Str).computed_from("node_id"),
        AttributeSpec::new("start", Bool).default_bool(true).local(),
    ],
};

/// Qemu virtual machine node
pub static VIRTUAL_MACHINE: ResourceSchema = ResourceSchema {
    kind: ResourceKind::VirtualMachine,
    type_name: "gns3_qemu_node",
    node_type: Some("qemu"),
    create_route: CreateRoute::Nodes,
    start_field: Some("start_vm"),
    legacy_import: true,
    constants: &[],
    attributes: &[
        PROJECT_ID,
        NAME,
        COMPUTE_ID,
        AttributeSpec::new("adapter_type", Str).default_str("e1000").nested(),
        AttributeSpec::new("adapters", Int).default_int(1).nested(),
        AttributeSpec::new("bios_image", Str).nested(),
        AttributeSpec::new("cdrom_image", Str).nested(),
        AttributeSpec::new("console", Int).nested(),
        AttributeSpec::new("console_type", Str).default_str("telnet").nested(),
        AttributeSpec::new("cpus", Int).default_int(1).nested(),
        AttributeSpec::new("ram", Int).default_int(256).nested(),
        AttributeSpec::new("mac_address", Str).nested(),
        AttributeSpec::new("options", Str).nested(),
        AttributeSpec::new("platform", Str).nested(),
        AttributeSpec::new("hda_disk_image", Str)
            .nested()
            .with_companion("hda_disk_interface", "virtio"),
        X.default_int(0),
        Y.default_int(0),
        AttributeSpec::new("symbol", Str).default_str(":/symbols/classic/computer.svg"),
        AttributeSpec::new("start_vm", Bool).default_bool(false).local(),
    ],
};
