//! Nimbus Console UI Library
//!
//! This crate provides the Nimbus cloud console user interface - list and
//! search views over provisioned networking resources, and provisioning
//! forms for load balancers and firewall rules.
//!
//! # Modules
//!
//! - [`app`]: Root application component and routing
//! - [`client`]: Console API client
//! - [`components`]: UI components (lists, forms, dialogs, layout)
//! - [`search`]: Query-string search filter synchronization
//! - [`state`]: Global state management

pub mod app;
pub mod client;
pub mod components;
pub mod search;
pub mod state;

pub use app::App;
