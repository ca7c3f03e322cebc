//! DreamHost private-server driver for FleetFlow
//!
//! This crate implements the ComputeDriver trait for DreamHost private
//! servers (PS).
//!
//! # Features
//!
//! - Private server management (list, create, remove, reboot, resize)
//! - Image listing (`web`, `mysql`)
//! - Fixed size catalog, see [`sizes`]
//!
//! Locations are not supported by the API.
//!
//! # Requirements
//!
//! - A DreamHost API key with the `dreamhost_ps-*` commands enabled
//! - `DREAMHOST_API_KEY` env var when using [`DreamhostDriver::from_env`]
//!
//! # Example
//!
//! ```ignore
//! use fleetflow_compute::{ComputeDriver, CreateNodeRequest};
//! use fleetflow_compute_dreamhost::DreamhostDriver;
//!
//! let driver = DreamhostDriver::from_env()?;
//!
//! let image = driver.list_images().await?.remove(0);
//! let size = driver.list_sizes().await?.remove(0);
//! let node = driver
//!     .create_node(CreateNodeRequest::new(image, size).with_param("movedata", "no"))
//!     .await?;
//!
//! if !driver.reboot_node(&node).await? {
//!     eprintln!("reboot of {} was not accepted", node.id);
//! }
//! ```

pub mod api;
pub mod config;
pub mod driver;
pub mod http;
pub mod sizes;

pub use config::DreamhostConfig;
pub use driver::DreamhostDriver;
pub use http::DreamhostHttp;
