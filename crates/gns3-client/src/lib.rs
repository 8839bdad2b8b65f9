//! GNS3 REST API Client
//!
//! A Rust client library for the node and template endpoints of a GNS3
//! controller. Every call returns the raw status code together with a
//! best-effort decoded JSON body; deciding which status means success is left
//! to the caller.
//!
//! # Example
//!
//! ```no_run
//! use gns3_client::{Gns3Client, Gns3ClientTrait, StatusCode};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Gns3Client::new("http://localhost:3080".to_string(), None)?;
//!
//! let version = client.version().await?;
//! println!("controller {}", version.version);
//!
//! let response = client
//!     .create_node("my-project", &json!({"name": "sw1", "node_type": "ethernet_switch"}))
//!     .await?;
//! if response.status == StatusCode::CREATED {
//!     println!("node_id = {:?}", response.str_field("node_id"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod gns3_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::Gns3Client;
pub use common::HttpClient;
pub use error::Gns3Error;
pub use models::*;
pub use gns3_trait::Gns3ClientTrait;
#[cfg(feature = "test-util")]
pub use mock::{Endpoint, MockGns3Client, RecordedRequest};

pub use reqwest::StatusCode;
