//! Console API Client
//!
//! Typed access to the console's REST API. The [`ConsoleApi`] trait is the
//! seam between views and transport, so list views can be driven by fakes;
//! [`RestClient`] is the real implementation rooted at the window origin.

mod rest;
mod types;

pub use rest::RestClient;
pub use types::ApplyReceipt;

use async_trait::async_trait;
use nimbus_shared::{Eip, FirewallRule, LoadBalancer, LoadBalancerApplication, SpecOption};

/// Error types for console API operations
#[derive(Debug, thiserror::Error)]
pub enum ConsoleApiError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No window origin available")]
    NoOrigin,
}

/// Trait for console API implementations
#[allow(dead_code)]
#[async_trait(?Send)]
pub trait ConsoleApi {
    /// List provisioned load balancers visible to the operator
    async fn list_load_balancers(&self) -> Result<Vec<LoadBalancer>, ConsoleApiError>;

    /// List VPC firewall rules
    async fn list_firewall_rules(&self) -> Result<Vec<FirewallRule>, ConsoleApiError>;

    /// Create or update a firewall rule
    async fn save_firewall_rule(&self, rule: &FirewallRule) -> Result<(), ConsoleApiError>;

    /// List elastic IPs available for binding
    async fn list_eips(&self) -> Result<Vec<Eip>, ConsoleApiError>;

    /// List performance-capacity specs offered for load balancers
    async fn list_spec_options(&self) -> Result<Vec<SpecOption>, ConsoleApiError>;

    /// Submit a load balancer application
    async fn apply_load_balancer(
        &self,
        application: &LoadBalancerApplication,
    ) -> Result<ApplyReceipt, ConsoleApiError>;
}
