//! UI Components
//!
//! Organized by console section:
//! - [`layout`]: app shell and header navigation
//! - [`common`]: dialog, cards and page chrome shared across sections
//! - [`resource`]: list/search views over provisioned resources
//! - [`apply`]: service-request provisioning forms

pub mod apply;
pub mod common;
pub mod layout;
pub mod resource;
