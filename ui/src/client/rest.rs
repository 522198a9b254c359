//! REST Console Client
//!
//! Talks to the console API served under the same origin as the UI.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use nimbus_shared::{
    Eip, FirewallRule, ListResult, LoadBalancer, LoadBalancerApplication, SpecOption,
};

use super::{ApplyReceipt, ConsoleApi, ConsoleApiError};

/// REST client for the console API
#[derive(Debug, Clone)]
pub struct RestClient {
    /// API base URL, without a trailing slash
    base_url: String,
}

impl RestClient {
    /// Create a client for an explicit base URL.
    pub fn new(url: &str) -> Self {
        let base_url = url.trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Create a client rooted at the current window origin.
    pub fn from_origin() -> Result<Self, ConsoleApiError> {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .ok_or(ConsoleApiError::NoOrigin)?;
        Ok(Self::new(&origin))
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    /// Fetch a `{ count, details }` list endpoint and unwrap the details.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ConsoleApiError> {
        let response = Request::get(&self.api_url(path))
            .send()
            .await
            .map_err(|e| ConsoleApiError::ConnectionFailed(e.to_string()))?;

        if !response.ok() {
            return Err(ConsoleApiError::RequestFailed(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            )));
        }

        let result: ListResult<T> = response
            .json()
            .await
            .map_err(|e| ConsoleApiError::InvalidResponse(e.to_string()))?;

        Ok(result.details)
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ConsoleApiError> {
        let response = Request::post(&self.api_url(path))
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| ConsoleApiError::RequestFailed(e.to_string()))?
            .send()
            .await
            .map_err(|e| ConsoleApiError::ConnectionFailed(e.to_string()))?;

        if !response.ok() {
            return Err(ConsoleApiError::RequestFailed(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ConsoleApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl ConsoleApi for RestClient {
    async fn list_load_balancers(&self) -> Result<Vec<LoadBalancer>, ConsoleApiError> {
        self.get_list("load_balancers").await
    }

    async fn list_firewall_rules(&self) -> Result<Vec<FirewallRule>, ConsoleApiError> {
        self.get_list("vendors/gcp/firewalls/rules").await
    }

    async fn save_firewall_rule(&self, rule: &FirewallRule) -> Result<(), ConsoleApiError> {
        let _: serde_json::Value = self.post_json("vendors/gcp/firewalls/rules", rule).await?;
        Ok(())
    }

    async fn list_eips(&self) -> Result<Vec<Eip>, ConsoleApiError> {
        self.get_list("eips").await
    }

    async fn list_spec_options(&self) -> Result<Vec<SpecOption>, ConsoleApiError> {
        self.get_list("load_balancers/specs").await
    }

    async fn apply_load_balancer(
        &self,
        application: &LoadBalancerApplication,
    ) -> Result<ApplyReceipt, ConsoleApiError> {
        self.post_json("applications/load_balancers", application)
            .await
    }
}
