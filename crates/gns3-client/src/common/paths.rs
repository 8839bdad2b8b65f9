//! Controller endpoint paths
//!
//! Project, node and template IDs are percent-encoded as single path segments.

use urlencoding::encode;

/// `GET /v2/version`
pub fn version() -> String {
    "/v2/version".to_string()
}

/// `POST /v2/projects/{project}/nodes`
pub fn nodes(project_id: &str) -> String {
    format!("/v2/projects/{}/nodes", encode(project_id))
}

/// `GET|PUT|DELETE /v2/projects/{project}/nodes/{id}`
pub fn node(project_id: &str, node_id: &str) -> String {
    format!("{}/{}", nodes(project_id), encode(node_id))
}

/// `POST /v2/projects/{project}/nodes/{id}/start`
pub fn node_start(project_id: &str, node_id: &str) -> String {
    format!("{}/start", node(project_id, node_id))
}

/// `POST /v2/projects/{project}/templates/{template_id}`
pub fn template(project_id: &str, template_id: &str) -> String {
    format!(
        "/v2/projects/{}/templates/{}",
        encode(project_id),
        encode(template_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_paths() {
        assert_eq!(nodes("p1"), "/v2/projects/p1/nodes");
        assert_eq!(node("p1", "n1"), "/v2/projects/p1/nodes/n1");
        assert_eq!(node_start("p1", "n1"), "/v2/projects/p1/nodes/n1/start");
        assert_eq!(template("p1", "t1"), "/v2/projects/p1/templates/t1");
    }

    #[test]
    fn test_segments_are_encoded() {
        assert_eq!(node("a/b", "c d"), "/v2/projects/a%2Fb/nodes/c%20d");
    }
}
