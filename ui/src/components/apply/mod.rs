//! Service request forms. Each apply page pairs the shared account/region
//! condition block with a resource-specific configuration form.

mod condition;
mod load_balancer;

pub use condition::{regions_for, ApplyCondition, ConditionOptions};
pub use load_balancer::ApplyLoadBalancer;
