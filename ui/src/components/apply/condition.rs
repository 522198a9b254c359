//! Apply Condition
//!
//! Account scope shared by every apply form: business, account, vendor,
//! region, and for Azure the resource group. The configuration form below
//! it only becomes submittable once the condition is complete.

use leptos::*;

use nimbus_shared::model::Vendor;

use crate::components::common::FormField;
use crate::state::{AppState, Scenario};

/// Account scope selected at the top of an apply form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyCondition {
    /// Business the resource is requested for (0 = none selected).
    pub biz_id: i64,
    pub account_id: String,
    pub vendor: Option<Vendor>,
    pub region: String,
    /// Azure only.
    pub resource_group: String,
}

impl ApplyCondition {
    /// Seed the condition from global state: business scenario forms start
    /// out scoped to the operator's current business.
    pub fn for_scenario(scenario: Scenario, biz_id: i64) -> Self {
        Self {
            biz_id: match scenario {
                Scenario::Business => biz_id,
                Scenario::Resource => 0,
            },
            ..Self::default()
        }
    }

    /// Whether the condition is still missing required selections.
    /// The business is only required outside the resource scenario, the
    /// resource group only for Azure.
    pub fn is_empty(&self, scenario: Scenario) -> bool {
        if self.account_id.is_empty() || self.vendor.is_none() || self.region.is_empty() {
            return true;
        }
        if scenario != Scenario::Resource && self.biz_id <= 0 {
            return true;
        }
        if self.vendor == Some(Vendor::Azure) && self.resource_group.is_empty() {
            return true;
        }
        false
    }
}

/// Regions offered per vendor.
pub fn regions_for(vendor: Vendor) -> &'static [&'static str] {
    match vendor {
        Vendor::Tcloud => &["ap-guangzhou", "ap-shanghai", "ap-singapore"],
        Vendor::Aws => &["us-east-1", "us-west-2", "ap-southeast-1"],
        Vendor::Azure => &["eastus", "westeurope", "southeastasia"],
        Vendor::Gcp => &["us-central1", "europe-west1", "asia-east1"],
        Vendor::Huawei => &["cn-north-4", "ap-southeast-3"],
    }
}

/// Condition selector block. Vendor changes clear the dependent region and
/// resource group selections; region changes are remembered as the sticky
/// default for the next visit.
#[component]
pub fn ConditionOptions(cond: RwSignal<ApplyCondition>) -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let scenario = app_state.scenario;

    // Restore the sticky vendor/region from the last apply.
    {
        let prefs = app_state.prefs.get_untracked();
        if let Some(vendor) = prefs.last_vendor {
            cond.update(|c| {
                c.vendor = Some(vendor);
                if regions_for(vendor).contains(&prefs.last_region.as_str()) {
                    c.region = prefs.last_region.clone();
                }
            });
        }
    }

    let remember = {
        let app_state = app_state.clone();
        move || {
            let current = cond.get_untracked();
            app_state.remember_selection(current.vendor, &current.region);
        }
    };

    view! {
        <div class="space-y-4">
            {move || {
                (scenario.get() != Scenario::Resource)
                    .then(|| {
                        view! {
                            <FormField label="Business" required=true>
                                <input
                                    type="number"
                                    class="input w-40"
                                    min="0"
                                    placeholder="Business id"
                                    prop:value=move || {
                                        let biz = cond.with(|c| c.biz_id);
                                        if biz > 0 { biz.to_string() } else { String::new() }
                                    }
                                    on:change=move |e| {
                                        let biz = event_target_value(&e).parse::<i64>().unwrap_or(0);
                                        cond.update(|c| c.biz_id = biz.max(0));
                                    }
                                />
                            </FormField>
                        }
                    })
            }}

            <FormField label="Account" required=true>
                <input
                    type="text"
                    class="input w-full max-w-md"
                    placeholder="Cloud account id"
                    prop:value=move || cond.with(|c| c.account_id.clone())
                    on:input=move |e| cond.update(|c| c.account_id = event_target_value(&e))
                />
            </FormField>

            <FormField label="Vendor" required=true>
                <select
                    class="input w-56"
                    on:change=move |e| {
                        let vendor = Vendor::parse(&event_target_value(&e));
                        cond.update(|c| {
                            if c.vendor != vendor {
                                c.vendor = vendor;
                                c.region.clear();
                                c.resource_group.clear();
                            }
                        });
                    }
                >
                    <option value="" selected=move || cond.with(|c| c.vendor.is_none())>
                        "Select vendor"
                    </option>
                    {Vendor::ALL
                        .into_iter()
                        .map(|vendor| {
                            view! {
                                <option
                                    value=vendor.as_str()
                                    selected=move || cond.with(|c| c.vendor == Some(vendor))
                                >
                                    {vendor.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </FormField>

            <FormField label="Region" required=true>
                <select
                    class="input w-56"
                    disabled=move || cond.with(|c| c.vendor.is_none())
                    on:change=move |e| {
                        cond.update(|c| c.region = event_target_value(&e));
                        remember();
                    }
                >
                    <option value="" selected=move || cond.with(|c| c.region.is_empty())>
                        "Select region"
                    </option>
                    {move || {
                        cond.with(|c| c.vendor)
                            .map(|vendor| {
                                regions_for(vendor)
                                    .iter()
                                    .map(|region| {
                                        view! {
                                            <option
                                                value=*region
                                                selected=move || {
                                                    cond.with(|c| c.region == *region)
                                                }
                                            >
                                                {*region}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            })
                    }}
                </select>
            </FormField>

            {move || {
                (cond.with(|c| c.vendor) == Some(Vendor::Azure))
                    .then(|| {
                        view! {
                            <FormField label="Resource group" required=true>
                                <input
                                    type="text"
                                    class="input w-full max-w-md"
                                    placeholder="Azure resource group"
                                    prop:value=move || cond.with(|c| c.resource_group.clone())
                                    on:input=move |e| {
                                        cond.update(|c| c.resource_group = event_target_value(&e))
                                    }
                                />
                            </FormField>
                        }
                    })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ApplyCondition {
        ApplyCondition {
            biz_id: 310,
            account_id: "acct-1".into(),
            vendor: Some(Vendor::Tcloud),
            region: "ap-singapore".into(),
            resource_group: String::new(),
        }
    }

    #[test]
    fn requires_account_vendor_and_region() {
        let scenario = Scenario::Business;
        assert!(!complete().is_empty(scenario));

        let mut cond = complete();
        cond.account_id.clear();
        assert!(cond.is_empty(scenario));

        let mut cond = complete();
        cond.vendor = None;
        assert!(cond.is_empty(scenario));

        let mut cond = complete();
        cond.region.clear();
        assert!(cond.is_empty(scenario));
    }

    #[test]
    fn business_only_required_outside_resource_scenario() {
        let mut cond = complete();
        cond.biz_id = 0;
        assert!(cond.is_empty(Scenario::Business));
        assert!(!cond.is_empty(Scenario::Resource));
    }

    #[test]
    fn azure_additionally_requires_resource_group() {
        let mut cond = complete();
        cond.vendor = Some(Vendor::Azure);
        assert!(cond.is_empty(Scenario::Business));
        cond.resource_group = "rg-prod".into();
        assert!(!cond.is_empty(Scenario::Business));
    }

    #[test]
    fn scenario_seeding_scopes_business_id() {
        assert_eq!(ApplyCondition::for_scenario(Scenario::Business, 42).biz_id, 42);
        assert_eq!(ApplyCondition::for_scenario(Scenario::Resource, 42).biz_id, 0);
    }

    #[test]
    fn every_vendor_offers_regions() {
        for vendor in Vendor::ALL {
            assert!(!regions_for(vendor).is_empty());
        }
    }
}
