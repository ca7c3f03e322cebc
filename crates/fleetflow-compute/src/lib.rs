//! FleetFlow Compute
//!
//! This crate provides the compute driver abstraction for FleetFlow: one
//! canonical node model and one operation contract over provider command APIs
//! that all shape their requests and replies differently.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                    caller                        │
//! └─────────────────┬────────────────────────────────┘
//!                   │ list / create / destroy / reboot / resize
//! ┌─────────────────▼────────────────────────────────┐
//! │               fleetflow-compute                  │
//! │  ┌───────────────────────────────────────────┐   │
//! │  │  trait ComputeDriver { ... }              │   │
//! │  └───────────────────────────────────────────┘   │
//! │  ┌────────────┐ ┌────────────┐ ┌─────────────┐   │
//! │  │  Envelope  │ │  FieldMap  │ │ Classifier  │   │
//! │  └────────────┘ └────────────┘ └─────────────┘   │
//! └─────────────────┬────────────────────────────────┘
//!                   │ Command
//! ┌─────────────────▼────────────────────────────────┐
//! │  trait CommandTransport (HTTP / scripted)        │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! The scripted transport used by driver tests lives in [`testing`] behind
//! the `testing` feature.

pub mod classify;
pub mod connection;
pub mod driver;
pub mod envelope;
pub mod error;
pub mod mapper;
pub mod model;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transport;

// Re-exports
pub use classify::{ErrorClassifier, FailureKind};
pub use connection::Connection;
pub use driver::{AuthStatus, ComputeDriver, CreateNodeRequest};
pub use envelope::Envelope;
pub use error::{ComputeError, MappingError, Result};
pub use mapper::{FieldMap, FieldTarget};
pub use model::{Extra, ExtraKey, Location, Node, NodeImage, NodeSize, NodeState};
pub use transport::{Command, CommandTransport};
