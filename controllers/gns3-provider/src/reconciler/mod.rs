//! Generic lifecycle reconciliation for GNS3 nodes.
//!
//! One [`Reconciler`] drives a single resource kind; the kind's behaviour comes
//! entirely from its [`ResourceSchema`]. The module is organized by operation:
//! - `create`: create the node, then the optional start step
//! - `read`: refresh from the controller, detect out-of-band deletion
//! - `update`: minimal delta, then refresh
//! - `delete`: idempotent removal
//! - `import`: adopt an existing node from an import key

mod create;
mod delete;
mod import;
mod read;
mod update;

#[cfg(test)]
mod delete_test;
#[cfg(test)]
mod import_test;

use crate::schema::{ResourceKind, ResourceSchema};
use gns3_client::Gns3ClientTrait;
use std::sync::Arc;

/// Outcome of a successful Read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Node exists and its fields were projected onto the instance
    Found,
    /// Node does not exist; identity is cleared
    Absent,
}

/// Outcome of a successful Update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No sendable field changed; nothing was sent
    NoChange,
    /// Delta sent and the instance refreshed
    Applied,
}

/// Outcome of a successful Delete. Both clear the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Node was removed
    Deleted,
    /// Node was already gone
    AlreadyAbsent,
}

/// Drives resource instances of one kind through their lifecycle.
#[derive(Clone)]
pub struct Reconciler {
    pub(crate) client: Arc<dyn Gns3ClientTrait>,
    pub(crate) schema: &'static ResourceSchema,
}

impl Reconciler {
    /// Reconciler for `kind` over a shared client
    pub fn new(client: Arc<dyn Gns3ClientTrait>, kind: ResourceKind) -> Self {
        Self {
            client,
            schema: kind.schema(),
        }
    }

    /// Kind this reconciler drives
    pub fn kind(&self) -> ResourceKind {
        self.schema.kind
    }

    /// Schema table of the kind
    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("kind", &self.schema.kind)
            .field("base_url", &self.client.base_url())
            .finish()
    }
}
