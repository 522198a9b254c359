//! Load Balancer List View
//!
//! Filter state lives in the URL: search inputs write through [`SearchQs`]
//! and the table re-derives its rows from the decoded condition, so filters
//! survive navigation and can be shared as links.

use gloo_timers::callback::Timeout;
use leptos::*;
use leptos_router::use_query_map;

use nimbus_shared::model::{load_balancer_properties, Condition, FilterValue, Vendor};
use nimbus_shared::{IpVersion, LoadBalancer, NetworkType};

use crate::client::{ConsoleApi, RestClient};
use crate::components::common::PageHeader;
use crate::search::use_search_qs;

/// Keystrokes settle for this long before the URL is rewritten.
const SEARCH_DEBOUNCE_MS: u32 = 300;

async fn fetch_load_balancers() -> Result<Vec<LoadBalancer>, String> {
    let client = RestClient::from_origin().map_err(|e| e.to_string())?;
    client.list_load_balancers().await.map_err(|e| e.to_string())
}

fn net_type_label(net_type: NetworkType) -> &'static str {
    match net_type {
        NetworkType::Public => "Public",
        NetworkType::Intra => "Intranet",
    }
}

fn ip_version_label(ip_version: IpVersion) -> &'static str {
    match ip_version {
        IpVersion::Ipv4 => "IPv4",
        IpVersion::Ipv6 => "IPv6",
        IpVersion::Ipv6Nat64 => "IPv6 NAT64",
    }
}

/// Does a record match the decoded condition? Unknown or empty entries
/// never exclude a row; the filter is best-effort like the codec.
fn matches_condition(lb: &LoadBalancer, condition: &Condition) -> bool {
    condition.iter().all(|(id, value)| {
        if value.is_empty() {
            return true;
        }
        match id.as_str() {
            "name" => value
                .as_str()
                .map(|s| lb.name.to_lowercase().contains(&s.to_lowercase()))
                .unwrap_or(true),
            "vendor" => match value {
                FilterValue::String(s) => lb.vendor.as_str() == s,
                FilterValue::List(items) => {
                    items.iter().any(|v| v.as_str() == Some(lb.vendor.as_str()))
                }
                _ => true,
            },
            "region" => value.as_str().map(|s| lb.region == s).unwrap_or(true),
            "zones" => match value {
                FilterValue::String(s) => lb.zones.iter().any(|z| z == s),
                FilterValue::List(items) => items.iter().all(|wanted| {
                    wanted
                        .as_str()
                        .map(|w| lb.zones.iter().any(|z| z == w))
                        .unwrap_or(true)
                }),
                _ => true,
            },
            "net_type" => value
                .as_str()
                .map(|s| match lb.net_type {
                    NetworkType::Public => s == "public",
                    NetworkType::Intra => s == "intra",
                })
                .unwrap_or(true),
            "bandwidth" => match value {
                FilterValue::Number(min) => lb.bandwidth as f64 >= *min,
                _ => true,
            },
            _ => true,
        }
    })
}

/// Load balancer list with URL-bound search filters.
#[component]
pub fn LoadBalancerList() -> impl IntoView {
    let qs = use_search_qs(load_balancer_properties());
    let query = use_query_map();

    let (load_balancers, set_load_balancers) = create_signal(Vec::<LoadBalancer>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);

    // Fetch on mount
    create_effect(move |prev: Option<bool>| {
        if prev.is_some() {
            return true;
        }
        spawn_local(async move {
            set_loading.set(true);
            match fetch_load_balancers().await {
                Ok(list) => {
                    set_load_balancers.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
        true
    });

    // The decoded condition always mirrors the URL.
    let decoder = qs.clone();
    let condition = create_memo(move |_| decoder.get(&query.get(), &Condition::new()));

    let initial_name = condition
        .get_untracked()
        .get("name")
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    let (name_input, set_name_input) = create_signal(initial_name);
    let debounce = store_value(None::<Timeout>);

    let selected_vendor = create_memo(move |_| {
        condition
            .get()
            .get("vendor")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    });

    let filtered = move || {
        let cond = condition.get();
        load_balancers
            .get()
            .into_iter()
            .filter(|lb| matches_condition(lb, &cond))
            .collect::<Vec<_>>()
    };

    let name_writer = qs.clone();
    let vendor_writer = qs.clone();
    let clearer = qs.clone();

    view! {
        <div class="flex-1 overflow-auto p-6">
            <div class="max-w-7xl mx-auto">
                <PageHeader
                    title="Load Balancers"
                    description="Provisioned load balancers across all connected accounts"
                >
                    <a href="/service/apply/load-balancer" class="btn-primary">
                        "Apply for Load Balancer"
                    </a>
                </PageHeader>

                // Filters
                <div class="flex items-center gap-4 mb-4">
                    <input
                        type="text"
                        class="input max-w-xs"
                        placeholder="Search by name..."
                        prop:value=move || name_input.get()
                        on:input=move |e| {
                            let value = event_target_value(&e);
                            set_name_input.set(value.clone());
                            let writer = name_writer.clone();
                            let current = condition.get_untracked();
                            debounce.update_value(|slot| {
                                if let Some(timer) = slot.take() {
                                    timer.cancel();
                                }
                                *slot = Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                                    let mut next = current;
                                    if value.is_empty() {
                                        next.remove("name");
                                    } else {
                                        next.insert("name".to_string(), FilterValue::from(value));
                                    }
                                    writer.set(&next);
                                }));
                            });
                        }
                    />
                    <select
                        class="input w-48"
                        on:change=move |e| {
                            let value = event_target_value(&e);
                            let mut next = condition.get_untracked();
                            if value.is_empty() {
                                next.remove("vendor");
                            } else {
                                next.insert("vendor".to_string(), FilterValue::from(value));
                            }
                            vendor_writer.set(&next);
                        }
                    >
                        <option value="" selected=move || selected_vendor.get().is_empty()>
                            "All vendors"
                        </option>
                        {Vendor::ALL
                            .iter()
                            .map(|vendor| {
                                let value = vendor.as_str();
                                view! {
                                    <option
                                        value=value
                                        selected=move || selected_vendor.get() == value
                                    >
                                        {vendor.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <button
                        class="text-sm text-theme-secondary hover:text-theme transition-colors"
                        on:click=move |_| {
                            set_name_input.set(String::new());
                            clearer.clear();
                        }
                    >
                        "Reset filters"
                    </button>
                </div>

                // Table
                <div class="bg-theme-surface rounded-xl border border-theme-border overflow-hidden">
                    {move || {
                        if loading.get() {
                            view! {
                                <div class="p-8 text-center text-theme-secondary">
                                    "Loading load balancers..."
                                </div>
                            }
                                .into_view()
                        } else if let Some(err) = error.get() {
                            view! { <div class="p-8 text-center text-error">{err}</div> }
                                .into_view()
                        } else {
                            let rows = filtered();
                            if rows.is_empty() {
                                view! {
                                    <div class="p-8 text-center">
                                        <p class="text-theme-secondary">"No load balancers found"</p>
                                        <p class="text-sm text-theme-muted mt-1">
                                            {if condition.get().is_empty() {
                                                "Apply for your first load balancer to get started"
                                            } else {
                                                "Try adjusting your search or filters"
                                            }}
                                        </p>
                                    </div>
                                }
                                    .into_view()
                            } else {
                                view! {
                                    <table class="w-full">
                                        <thead>
                                            <tr class="border-b border-theme-border bg-theme-bg">
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"Name"</th>
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"Vendor"</th>
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"Region"</th>
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"Zones"</th>
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"Network"</th>
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"IP Version"</th>
                                                <th class="px-4 py-3 text-right text-xs font-medium text-theme-muted uppercase tracking-wider">"Bandwidth"</th>
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"Created"</th>
                                            </tr>
                                        </thead>
                                        <tbody class="divide-y divide-theme-border">
                                            {rows
                                                .into_iter()
                                                .map(|lb| {
                                                    view! {
                                                        <tr class="hover:bg-theme-surface-hover transition-colors">
                                                            <td class="px-4 py-3 text-sm text-theme font-medium">{lb.name.clone()}</td>
                                                            <td class="px-4 py-3 text-sm text-theme-secondary">{lb.vendor.label()}</td>
                                                            <td class="px-4 py-3 text-sm text-theme-secondary">{lb.region.clone()}</td>
                                                            <td class="px-4 py-3 text-sm text-theme-secondary">{lb.zones.join(", ")}</td>
                                                            <td class="px-4 py-3 text-sm text-theme-secondary">{net_type_label(lb.net_type)}</td>
                                                            <td class="px-4 py-3 text-sm text-theme-secondary">{ip_version_label(lb.ip_version)}</td>
                                                            <td class="px-4 py-3 text-sm text-theme-secondary text-right">{format!("{} Mbps", lb.bandwidth)}</td>
                                                            <td class="px-4 py-3 text-sm text-theme-muted">
                                                                {lb.created_at.format("%Y-%m-%d %H:%M").to_string()}
                                                            </td>
                                                        </tr>
                                                    }
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                }
                                    .into_view()
                            }
                        }
                    }}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use nimbus_shared::model::Vendor;

    fn sample() -> LoadBalancer {
        LoadBalancer {
            id: "lb-1".into(),
            name: "web-front".into(),
            vendor: Vendor::Tcloud,
            region: "ap-singapore".into(),
            zones: vec!["ap-singapore-1".into(), "ap-singapore-2".into()],
            net_type: NetworkType::Public,
            ip_version: IpVersion::Ipv4,
            cloud_vpc_id: "vpc-1".into(),
            bandwidth: 512,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn condition(entries: &[(&str, FilterValue)]) -> Condition {
        entries
            .iter()
            .map(|(id, v)| (id.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_condition_matches_everything() {
        assert!(matches_condition(&sample(), &Condition::new()));
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let lb = sample();
        assert!(matches_condition(&lb, &condition(&[("name", "WEB".into())])));
        assert!(!matches_condition(&lb, &condition(&[("name", "db".into())])));
    }

    #[test]
    fn vendor_accepts_scalar_or_list() {
        let lb = sample();
        assert!(matches_condition(&lb, &condition(&[("vendor", "tcloud".into())])));
        assert!(matches_condition(
            &lb,
            &condition(&[("vendor", FilterValue::from(vec!["aws", "tcloud"]))])
        ));
        assert!(!matches_condition(&lb, &condition(&[("vendor", "aws".into())])));
    }

    #[test]
    fn zone_list_requires_all_entries() {
        let lb = sample();
        assert!(matches_condition(
            &lb,
            &condition(&[("zones", FilterValue::from(vec!["ap-singapore-1"]))])
        ));
        assert!(!matches_condition(
            &lb,
            &condition(&[(
                "zones",
                FilterValue::from(vec!["ap-singapore-1", "ap-mumbai-1"])
            )])
        ));
    }

    #[test]
    fn bandwidth_filters_as_minimum() {
        let lb = sample();
        assert!(matches_condition(
            &lb,
            &condition(&[("bandwidth", FilterValue::Number(256.0))])
        ));
        assert!(!matches_condition(
            &lb,
            &condition(&[("bandwidth", FilterValue::Number(1024.0))])
        ));
    }

    #[test]
    fn empty_values_and_unknown_keys_never_exclude() {
        let lb = sample();
        assert!(matches_condition(&lb, &condition(&[("name", "".into())])));
        assert!(matches_condition(
            &lb,
            &condition(&[("zones", FilterValue::List(vec![]))])
        ));
        assert!(matches_condition(&lb, &condition(&[("owner", "alice".into())])));
    }
}
