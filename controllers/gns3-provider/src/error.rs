//! Provider error types.
//!
//! One variant per failure class a lifecycle operation can end in. Absence
//! (404 on Read or Delete) is an outcome, not an error, and never shows up here.

use gns3_client::{Gns3Error, StatusCode};
use std::fmt;
use thiserror::Error;

/// Lifecycle operation an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Controller reachability check
    Connect,
    /// Node creation
    Create,
    /// Node refresh
    Read,
    /// Partial node update
    Update,
    /// Node removal
    Delete,
    /// Post-create start step
    Start,
    /// Adoption of an existing node
    Import,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Connect => "connect",
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Start => "start",
            Operation::Import => "import",
        };
        f.write_str(name)
    }
}

/// Errors returned by the reconciler to the orchestrating layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Payload could not be encoded; nothing reached the network
    #[error("{operation}: failed to encode request: {source}")]
    Encoding {
        /// Failed operation
        operation: Operation,
        /// Underlying client error
        #[source]
        source: Gns3Error,
    },

    /// Request not sent or response not read; remote state is unknown
    #[error("{operation}: transport error: {source}")]
    Transport {
        /// Failed operation
        operation: Operation,
        /// Underlying client error
        #[source]
        source: Gns3Error,
    },

    /// Timed out waiting for the controller; the request may or may not have been applied
    #[error("{operation}: timed out waiting for the controller, remote state unknown")]
    Timeout {
        /// Operation that timed out
        operation: Operation,
    },

    /// Controller answered but broke the expected contract
    #[error("{operation}: protocol error: {message}")]
    Protocol {
        /// Failed operation
        operation: Operation,
        /// What the response got wrong
        message: String,
    },

    /// Controller rejected the request with a non-success status
    #[error("{operation}: controller returned {status}: {body}")]
    Rejected {
        /// Failed operation
        operation: Operation,
        /// Status the controller returned
        status: StatusCode,
        /// Response body snippet
        body: String,
    },

    /// Node was created but the follow-up start request failed. The node exists.
    #[error("node {node_id} was created but could not be started: {source}")]
    PartialCreate {
        /// ID assigned to the created node
        node_id: String,
        /// Why the start step failed
        #[source]
        source: Box<ProviderError>,
    },

    /// Import key did not match any accepted format
    #[error("invalid import ID {raw:?}: expected {expected}")]
    InvalidImportId {
        /// Key as supplied
        raw: String,
        /// Accepted formats
        expected: String,
    },

    /// Required attribute was not declared
    #[error("{kind}: required attribute {field:?} is not set")]
    MissingAttribute {
        /// Resource kind
        kind: String,
        /// Missing attribute
        field: String,
    },

    /// Declared value does not have the schema type
    #[error("attribute {field:?}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Attribute name
        field: String,
        /// Type the schema declares
        expected: String,
        /// Type that was supplied
        found: String,
    },

    /// Operation needs a remote identity and the instance has none
    #[error("{operation}: resource has no identity; it does not exist remotely")]
    MissingIdentity {
        /// Operation that needed the identity
        operation: Operation,
    },

    /// Invalid provider configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ProviderError {
    /// Classify a client-side failure for the given operation.
    pub fn from_client(operation: Operation, err: Gns3Error) -> Self {
        match err {
            Gns3Error::Encoding(_) => ProviderError::Encoding { operation, source: err },
            Gns3Error::Timeout(_) => ProviderError::Timeout { operation },
            Gns3Error::Decode { status, source, body } => ProviderError::Protocol {
                operation,
                message: format!("undecodable {} response body ({}): {}", status, source, body),
            },
            Gns3Error::Http(_) | Gns3Error::InvalidRequest(_) => {
                ProviderError::Transport { operation, source: err }
            }
        }
    }

    /// True when the remote object's existence is unknown after this error.
    pub fn is_ambiguous(&self) -> bool {
        match self {
            ProviderError::Timeout { .. } | ProviderError::Transport { .. } => true,
            ProviderError::PartialCreate { source, .. } => source.is_ambiguous(),
            _ => false,
        }
    }

    /// Identity assigned before the failure, if the object is known to exist.
    pub fn created_node_id(&self) -> Option<&str> {
        match self {
            ProviderError::PartialCreate { node_id, .. } => Some(node_id),
            _ => None,
        }
    }
}
