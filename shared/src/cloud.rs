//! Cloud resource records and provisioning payloads
//!
//! These types mirror the console API: list endpoints return
//! `{ count, details }` envelopes, provisioning endpoints accept the
//! application payloads built by the apply forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Vendor;

/// Generic list response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub count: u64,
    pub details: Vec<T>,
}

/// Load balancer network scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[default]
    Public,
    Intra,
}

/// IP stack of a public load balancer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpVersion {
    #[default]
    Ipv4,
    Ipv6,
    Ipv6Nat64,
}

/// Availability zone placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    #[default]
    Single,
    PrimaryStand,
}

/// Instance billing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceChargeType {
    #[default]
    Prepaid,
    PostpaidByHour,
}

impl InstanceChargeType {
    pub fn label(&self) -> &'static str {
        match self {
            InstanceChargeType::Prepaid => "Monthly subscription",
            InstanceChargeType::PostpaidByHour => "Pay as you go (hourly)",
        }
    }
}

/// Network billing mode for public load balancers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkChargeType {
    #[default]
    Monthly,
    Hourly,
    Traffic,
    BandwidthPackage,
}

/// Purchase duration unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseUnit {
    #[default]
    Month,
    Year,
}

impl PurchaseUnit {
    /// Longest purchasable duration in this unit.
    pub fn max_duration(&self) -> u32 {
        match self {
            PurchaseUnit::Month => 11,
            PurchaseUnit::Year => 5,
        }
    }
}

/// A provisioned load balancer, as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub id: String,
    pub name: String,
    pub vendor: Vendor,
    pub region: String,
    #[serde(default)]
    pub zones: Vec<String>,
    pub net_type: NetworkType,
    pub ip_version: IpVersion,
    pub cloud_vpc_id: String,
    pub bandwidth: u64,
    pub created_at: DateTime<Utc>,
}

/// Elastic IP available for binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eip {
    pub id: String,
    pub name: String,
    pub public_ip: String,
}

/// Performance-capacity spec offered for public load balancers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecOption {
    pub model: String,
    pub max_concurrent_connections: u64,
    pub new_connections_per_second: u64,
    pub queries_per_second: u64,
    pub bandwidth_limit: u64,
}

/// Payload submitted by the load balancer application form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadBalancerApplication {
    pub biz_id: i64,
    pub account_id: String,
    pub vendor: Option<Vendor>,
    pub region: String,
    #[serde(default)]
    pub resource_group: Option<String>,
    pub net_type: NetworkType,
    pub ip_version: IpVersion,
    pub zone_type: ZoneType,
    #[serde(default)]
    pub zones: Vec<String>,
    pub cloud_vpc_id: String,
    #[serde(default)]
    pub cloud_subnet_id: Option<String>,
    /// Empty means the shared spec; otherwise a [`SpecOption::model`].
    #[serde(default)]
    pub spec_type: String,
    pub carrier_type: String,
    #[serde(default)]
    pub eip_id: Option<String>,
    pub instance_charge_type: InstanceChargeType,
    pub network_charge_type: NetworkChargeType,
    pub bandwidth: u32,
    pub quantity: u32,
    pub duration: u32,
    pub unit: PurchaseUnit,
    pub auto_renewal: bool,
    pub name: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub remark: String,
}

impl LoadBalancerApplication {
    /// Billing mode implied by network scope and IP stack: intranet and
    /// IPv6 instances only sell as pay-as-you-go.
    pub fn derived_charge_type(net_type: NetworkType, ip_version: IpVersion) -> InstanceChargeType {
        if net_type == NetworkType::Intra || ip_version != IpVersion::Ipv4 {
            InstanceChargeType::PostpaidByHour
        } else {
            InstanceChargeType::Prepaid
        }
    }
}

/// Traffic direction of a firewall rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleDirection {
    Ingress,
    #[default]
    Egress,
}

/// What the rule does with matching traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    #[default]
    Allowed,
    Denied,
}

/// Which field a rule's target filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[default]
    TargetTags,
    TargetServiceAccounts,
}

impl TargetKind {
    pub const ALL: [TargetKind; 2] = [TargetKind::TargetTags, TargetKind::TargetServiceAccounts];

    pub fn label(&self) -> &'static str {
        match self {
            TargetKind::TargetTags => "Target tags",
            TargetKind::TargetServiceAccounts => "Target service accounts",
        }
    }
}

/// Which field a rule's source filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    SourceTags,
    SourceRanges,
    SourceServiceAccounts,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [
        SourceKind::SourceTags,
        SourceKind::SourceRanges,
        SourceKind::SourceServiceAccounts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::SourceTags => "Source tags",
            SourceKind::SourceRanges => "Source IP ranges",
            SourceKind::SourceServiceAccounts => "Source service accounts",
        }
    }
}

/// Protocol plus the ports it applies to, inside an allow/deny list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolPorts {
    pub protocol: String,
    pub ports: Vec<String>,
}

/// A GCP-style VPC firewall rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub id: Uuid,
    pub name: String,
    pub priority: u32,
    pub direction: RuleDirection,
    pub vpc_id: String,
    #[serde(default)]
    pub target_tags: Vec<String>,
    #[serde(default)]
    pub target_service_accounts: Vec<String>,
    #[serde(default)]
    pub source_tags: Vec<String>,
    #[serde(default)]
    pub source_ranges: Vec<String>,
    #[serde(default)]
    pub source_service_accounts: Vec<String>,
    #[serde(default)]
    pub destination_ranges: Vec<String>,
    #[serde(default)]
    pub allowed: Vec<ProtocolPorts>,
    #[serde(default)]
    pub denied: Vec<ProtocolPorts>,
    pub disabled: bool,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FirewallRule {
    /// Fresh rule with a locally minted id, defaulting to an egress allow
    /// rule for TCP 443 the way the console's add dialog starts out.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            priority: 1000,
            direction: RuleDirection::default(),
            vpc_id: String::new(),
            target_tags: Vec::new(),
            target_service_accounts: Vec::new(),
            source_tags: Vec::new(),
            source_ranges: Vec::new(),
            source_service_accounts: Vec::new(),
            destination_ranges: Vec::new(),
            allowed: vec![ProtocolPorts {
                protocol: "tcp".to_string(),
                ports: vec!["443".to_string()],
            }],
            denied: Vec::new(),
            disabled: false,
            memo: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Entries for one action list.
    pub fn entries(&self, action: RuleAction) -> &[ProtocolPorts] {
        match action {
            RuleAction::Allowed => &self.allowed,
            RuleAction::Denied => &self.denied,
        }
    }

    fn entries_mut(&mut self, action: RuleAction) -> &mut Vec<ProtocolPorts> {
        match action {
            RuleAction::Allowed => &mut self.allowed,
            RuleAction::Denied => &mut self.denied,
        }
    }

    /// Ports currently recorded for a protocol under the given action.
    pub fn ports_for(&self, action: RuleAction, protocol: &str) -> Vec<String> {
        self.entries(action)
            .iter()
            .find(|e| e.protocol == protocol)
            .map(|e| e.ports.clone())
            .unwrap_or_default()
    }

    /// Record a ports edit for a protocol: inserts a new entry, replaces an
    /// existing one, or removes the entry when the port list is empty.
    pub fn set_ports(&mut self, action: RuleAction, protocol: &str, ports: Vec<String>) {
        let entries = self.entries_mut(action);
        match entries.iter_mut().find(|e| e.protocol == protocol) {
            Some(entry) => {
                if ports.is_empty() {
                    entries.retain(|e| e.protocol != protocol);
                } else {
                    entry.ports = ports;
                }
            }
            None => {
                if !ports.is_empty() {
                    entries.push(ProtocolPorts {
                        protocol: protocol.to_string(),
                        ports,
                    });
                }
            }
        }
    }

    /// Move every protocol/port entry from one action list to the other.
    /// The dialog calls this when the user flips allow/deny.
    pub fn move_entries(&mut self, from: RuleAction, to: RuleAction) {
        if from == to {
            return;
        }
        let moved = std::mem::take(self.entries_mut(from));
        *self.entries_mut(to) = moved;
    }

    /// Values for a target filter kind.
    pub fn target_values(&self, kind: TargetKind) -> &[String] {
        match kind {
            TargetKind::TargetTags => &self.target_tags,
            TargetKind::TargetServiceAccounts => &self.target_service_accounts,
        }
    }

    /// Replace the values of a target filter kind.
    pub fn set_target_values(&mut self, kind: TargetKind, values: Vec<String>) {
        match kind {
            TargetKind::TargetTags => self.target_tags = values,
            TargetKind::TargetServiceAccounts => self.target_service_accounts = values,
        }
    }

    /// Values for a source filter kind.
    pub fn source_values(&self, kind: SourceKind) -> &[String] {
        match kind {
            SourceKind::SourceTags => &self.source_tags,
            SourceKind::SourceRanges => &self.source_ranges,
            SourceKind::SourceServiceAccounts => &self.source_service_accounts,
        }
    }

    /// Replace the values of a source filter kind.
    pub fn set_source_values(&mut self, kind: SourceKind, values: Vec<String>) {
        match kind {
            SourceKind::SourceTags => self.source_tags = values,
            SourceKind::SourceRanges => self.source_ranges = values,
            SourceKind::SourceServiceAccounts => self.source_service_accounts = values,
        }
    }
}

/// Why a firewall rule name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleNameError {
    #[error("name must not be empty")]
    Empty,
    #[error("name must start with a lowercase letter")]
    BadStart,
    #[error("name may only contain lowercase letters, digits, '-' and '_'")]
    BadChar,
    #[error("name must not end with a hyphen")]
    TrailingHyphen,
    #[error("name may have at most 32 characters after the first letter")]
    TooLong,
}

/// Firewall rule naming rule: a lowercase letter followed by at most 32
/// lowercase letters, digits, hyphens or underscores, not ending with a
/// hyphen.
pub fn validate_rule_name(name: &str) -> Result<(), RuleNameError> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(RuleNameError::Empty)?;
    if !first.is_ascii_lowercase() {
        return Err(RuleNameError::BadStart);
    }
    let rest: Vec<char> = chars.collect();
    if rest.len() > 32 {
        return Err(RuleNameError::TooLong);
    }
    if rest
        .iter()
        .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
    {
        return Err(RuleNameError::BadChar);
    }
    if name.ends_with('-') {
        return Err(RuleNameError::TrailingHyphen);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_charge_type_follows_network_scope() {
        assert_eq!(
            LoadBalancerApplication::derived_charge_type(NetworkType::Public, IpVersion::Ipv4),
            InstanceChargeType::Prepaid
        );
        assert_eq!(
            LoadBalancerApplication::derived_charge_type(NetworkType::Intra, IpVersion::Ipv4),
            InstanceChargeType::PostpaidByHour
        );
        assert_eq!(
            LoadBalancerApplication::derived_charge_type(NetworkType::Public, IpVersion::Ipv6),
            InstanceChargeType::PostpaidByHour
        );
        assert_eq!(
            LoadBalancerApplication::derived_charge_type(
                NetworkType::Public,
                IpVersion::Ipv6Nat64
            ),
            InstanceChargeType::PostpaidByHour
        );
    }

    #[test]
    fn set_ports_inserts_replaces_and_removes() {
        let mut rule = FirewallRule::new("web-allow");
        assert_eq!(rule.ports_for(RuleAction::Allowed, "tcp"), vec!["443"]);

        rule.set_ports(RuleAction::Allowed, "tcp", vec!["80".into(), "443".into()]);
        assert_eq!(rule.ports_for(RuleAction::Allowed, "tcp"), vec!["80", "443"]);

        rule.set_ports(RuleAction::Allowed, "udp", vec!["53".into()]);
        assert_eq!(rule.allowed.len(), 2);

        rule.set_ports(RuleAction::Allowed, "tcp", vec![]);
        assert_eq!(rule.allowed.len(), 1);
        assert!(rule.ports_for(RuleAction::Allowed, "tcp").is_empty());

        // Committing an empty edit for an absent protocol changes nothing.
        rule.set_ports(RuleAction::Allowed, "icmp", vec![]);
        assert_eq!(rule.allowed.len(), 1);
    }

    #[test]
    fn move_entries_swaps_action_lists() {
        let mut rule = FirewallRule::new("db-deny");
        rule.move_entries(RuleAction::Allowed, RuleAction::Denied);
        assert!(rule.allowed.is_empty());
        assert_eq!(rule.denied.len(), 1);
        assert_eq!(rule.ports_for(RuleAction::Denied, "tcp"), vec!["443"]);

        // Moving onto itself is a no-op rather than a wipe.
        rule.move_entries(RuleAction::Denied, RuleAction::Denied);
        assert_eq!(rule.denied.len(), 1);
    }

    #[test]
    fn target_and_source_kind_accessors() {
        let mut rule = FirewallRule::new("tagged");
        rule.set_target_values(TargetKind::TargetTags, vec!["web".into()]);
        assert_eq!(rule.target_values(TargetKind::TargetTags), ["web"]);
        rule.set_target_values(TargetKind::TargetTags, vec![]);
        assert!(rule.target_values(TargetKind::TargetTags).is_empty());

        rule.set_source_values(SourceKind::SourceRanges, vec!["10.0.0.0/8".into()]);
        assert_eq!(rule.source_values(SourceKind::SourceRanges), ["10.0.0.0/8"]);
    }

    #[test]
    fn rule_name_validation() {
        assert_eq!(validate_rule_name("allow-https"), Ok(()));
        assert_eq!(validate_rule_name("a"), Ok(()));
        assert_eq!(validate_rule_name(""), Err(RuleNameError::Empty));
        assert_eq!(validate_rule_name("Allow"), Err(RuleNameError::BadStart));
        assert_eq!(validate_rule_name("9rule"), Err(RuleNameError::BadStart));
        assert_eq!(validate_rule_name("a b"), Err(RuleNameError::BadChar));
        assert_eq!(validate_rule_name("ab-"), Err(RuleNameError::TrailingHyphen));
        let long = format!("a{}", "b".repeat(33));
        assert_eq!(validate_rule_name(&long), Err(RuleNameError::TooLong));
    }
}
