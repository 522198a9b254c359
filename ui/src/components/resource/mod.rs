//! Resource management views: list/search pages over provisioned
//! networking resources, plus the firewall rule editor dialog.

mod firewall_rules;
mod load_balancer_list;
mod rule_dialog;

pub use firewall_rules::FirewallRules;
pub use load_balancer_list::LoadBalancerList;
pub use rule_dialog::FirewallRuleDialog;
