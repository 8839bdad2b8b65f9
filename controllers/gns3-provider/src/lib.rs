//! GNS3 Provider
//!
//! Lifecycle reconciliation for GNS3 topology nodes: cloud, switch,
//! template-instantiated, docker and qemu nodes. One generic [`Reconciler`]
//! drives Create/Read/Update/Delete/Import for every kind; what differs between
//! kinds lives in the static schema tables.
//!
//! # Example
//!
//! ```no_run
//! use gns3_provider::{Provider, ProviderConfig, ResourceInstance, ResourceKind};
//!
//! # async fn example() -> Result<(), gns3_provider::ProviderError> {
//! let config = ProviderConfig::new("http://localhost:3080")?;
//! let provider = Provider::new(&config)?;
//! let switches = provider.reconciler(ResourceKind::Switch);
//!
//! let mut switch = ResourceInstance::new()
//!     .with("project_id", "8c6d1e3a-0000-0000-0000-000000000000")
//!     .with("name", "core-sw");
//! let node_id = switches.create(&mut switch).await?;
//! println!("created {}", node_id);
//! # Ok(())
//! # }
//! ```

pub mod apply;
pub mod config;
pub mod error;
pub mod import_id;
pub mod payload;
pub mod provider;
pub mod reconcile_helpers;
pub mod reconciler;
pub mod schema;
pub mod state;
pub mod value;

#[cfg(test)]
mod test_utils;

pub use config::ProviderConfig;
pub use error::{Operation, ProviderError};
pub use import_id::ImportKey;
pub use provider::Provider;
pub use reconciler::{DeleteOutcome, ReadOutcome, Reconciler, UpdateOutcome};
pub use schema::{ResourceKind, ResourceSchema};
pub use state::{ResourceData, ResourceInstance};
pub use value::{AttributeType, AttributeValue};
