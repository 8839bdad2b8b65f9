//! Node and template operations for MockGns3Client
//!
//! Status codes follow the controller: 201 on create, 200 on read/update/start,
//! 204 on delete, 404 for unknown nodes or templates.

use super::{helpers, MockGns3Client};
use crate::models::ApiResponse;
use reqwest::StatusCode;
use serde_json::{Map, Value};

fn new_node(project_id: &str, body: &Value) -> Value {
    let mut node = Map::new();
    node.insert("x".to_string(), Value::from(0));
    node.insert("y".to_string(), Value::from(0));
    node.insert("compute_id".to_string(), Value::from("local"));
    node.insert("status".to_string(), Value::from("stopped"));
    node.insert("properties".to_string(), Value::Object(Map::new()));

    let mut node = Value::Object(node);
    helpers::merge_node(&mut node, body);

    if let Some(obj) = node.as_object_mut() {
        obj.insert(
            "node_id".to_string(),
            Value::from(uuid::Uuid::new_v4().to_string()),
        );
        obj.insert("project_id".to_string(), Value::from(project_id));
    }
    node
}

fn store(client: &MockGns3Client, project_id: &str, node: &Value) {
    let node_id = node
        .get("node_id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    client
        .nodes
        .lock()
        .unwrap()
        .insert((project_id.to_string(), node_id), node.clone());
}

pub fn create_node(client: &MockGns3Client, project_id: &str, body: &Value) -> ApiResponse {
    if body.get("name").and_then(Value::as_str).is_none() {
        return helpers::error(StatusCode::BAD_REQUEST, "'name' is a required property");
    }
    if body.get("node_type").and_then(Value::as_str).is_none() {
        return helpers::error(StatusCode::BAD_REQUEST, "'node_type' is a required property");
    }

    let node = new_node(project_id, body);
    store(client, project_id, &node);
    ApiResponse::json(StatusCode::CREATED, node)
}

pub fn create_node_from_template(
    client: &MockGns3Client,
    project_id: &str,
    template_id: &str,
    body: &Value,
) -> ApiResponse {
    let Some(defaults) = client.templates.lock().unwrap().get(template_id).cloned() else {
        return helpers::not_found("Template", template_id);
    };

    let mut node = new_node(project_id, &defaults);
    helpers::merge_node(&mut node, body);
    if let Some(obj) = node.as_object_mut() {
        obj.insert("template_id".to_string(), Value::from(template_id));
    }
    store(client, project_id, &node);
    ApiResponse::json(StatusCode::CREATED, node)
}

pub fn get_node(client: &MockGns3Client, project_id: &str, node_id: &str) -> ApiResponse {
    match client.node(project_id, node_id) {
        Some(node) => ApiResponse::json(StatusCode::OK, node),
        None => helpers::not_found("Node", node_id),
    }
}

pub fn update_node(
    client: &MockGns3Client,
    project_id: &str,
    node_id: &str,
    body: &Value,
) -> ApiResponse {
    let mut nodes = client.nodes.lock().unwrap();
    let Some(node) = nodes.get_mut(&(project_id.to_string(), node_id.to_string())) else {
        return helpers::not_found("Node", node_id);
    };
    helpers::merge_node(node, body);
    ApiResponse::json(StatusCode::OK, node.clone())
}

pub fn delete_node(client: &MockGns3Client, project_id: &str, node_id: &str) -> ApiResponse {
    match client.remove_node(project_id, node_id) {
        Some(_) => ApiResponse::empty(StatusCode::NO_CONTENT),
        None => helpers::not_found("Node", node_id),
    }
}

pub fn start_node(client: &MockGns3Client, project_id: &str, node_id: &str) -> ApiResponse {
    let mut nodes = client.nodes.lock().unwrap();
    let Some(node) = nodes.get_mut(&(project_id.to_string(), node_id.to_string())) else {
        return helpers::not_found("Node", node_id);
    };
    if let Some(obj) = node.as_object_mut() {
        obj.insert("status".to_string(), Value::from("started"));
    }
    ApiResponse::json(StatusCode::OK, node.clone())
}
