//! Import key codec.
//!
//! The canonical form is `<project_id>/<node_id>`. Kinds that predate it also
//! accept `<node_id>,<project_id>`. Decoding never guesses: a key that matches
//! neither accepted form is rejected.

use crate::error::ProviderError;
use std::fmt;

/// Canonical separator
pub const SEPARATOR: char = '/';
/// Separator of the legacy node-first form
pub const LEGACY_SEPARATOR: char = ',';

const CANONICAL_FORMAT: &str = "<project_id>/<node_id>";
const LEGACY_FORMAT: &str = "<node_id>,<project_id>";

/// Project and node ID pair used to adopt an existing node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportKey {
    /// Owning project
    pub project_id: String,
    /// Node ID
    pub node_id: String,
}

impl ImportKey {
    /// Key for `node_id` in `project_id`
    pub fn new(project_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            node_id: node_id.into(),
        }
    }

    /// Decode a raw key. `accept_legacy` enables the comma form.
    pub fn parse(raw: &str, accept_legacy: bool) -> Result<Self, ProviderError> {
        let parsed = if accept_legacy && raw.contains(LEGACY_SEPARATOR) {
            if raw.contains(SEPARATOR) {
                None
            } else {
                split_pair(raw, LEGACY_SEPARATOR).map(|(node, project)| Self::new(project, node))
            }
        } else {
            split_pair(raw, SEPARATOR).map(|(project, node)| Self::new(project, node))
        };

        parsed.ok_or_else(|| ProviderError::InvalidImportId {
            raw: raw.to_string(),
            expected: expected_formats(accept_legacy),
        })
    }
}

impl fmt::Display for ImportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.project_id, SEPARATOR, self.node_id)
    }
}

/// Exactly two non-empty parts around a single separator
fn split_pair(raw: &str, sep: char) -> Option<(&str, &str)> {
    let (left, right) = raw.split_once(sep)?;
    if left.is_empty() || right.is_empty() || right.contains(sep) {
        return None;
    }
    Some((left, right))
}

fn expected_formats(accept_legacy: bool) -> String {
    if accept_legacy {
        format!("{} or {}", CANONICAL_FORMAT, LEGACY_FORMAT)
    } else {
        CANONICAL_FORMAT.to_string()
    }
}
