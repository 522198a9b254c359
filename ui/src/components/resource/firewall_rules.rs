//! Firewall Rules View
//!
//! GCP VPC firewall rule list with URL-bound filters plus the add/edit
//! dialog. Saves go through the console API; the table is updated in
//! place so the edit round-trips without a refetch.

use gloo_timers::callback::Timeout;
use leptos::*;
use leptos_router::use_query_map;

use nimbus_shared::model::{firewall_rule_properties, Condition, FilterValue};
use nimbus_shared::{FirewallRule, RuleDirection};

use crate::client::{ConsoleApi, RestClient};
use crate::components::common::PageHeader;
use crate::search::use_search_qs;

use super::FirewallRuleDialog;

/// Keystrokes settle for this long before the URL is rewritten.
const SEARCH_DEBOUNCE_MS: u32 = 300;

async fn fetch_rules() -> Result<Vec<FirewallRule>, String> {
    let client = RestClient::from_origin().map_err(|e| e.to_string())?;
    client.list_firewall_rules().await.map_err(|e| e.to_string())
}

fn direction_label(direction: RuleDirection) -> &'static str {
    match direction {
        RuleDirection::Ingress => "Ingress",
        RuleDirection::Egress => "Egress",
    }
}

/// Best-effort filter: unknown keys and empty values never exclude a row.
fn matches_condition(rule: &FirewallRule, condition: &Condition) -> bool {
    condition.iter().all(|(id, value)| {
        if value.is_empty() {
            return true;
        }
        match id.as_str() {
            "name" => value
                .as_str()
                .map(|s| rule.name.to_lowercase().contains(&s.to_lowercase()))
                .unwrap_or(true),
            "direction" => value
                .as_str()
                .map(|s| match rule.direction {
                    RuleDirection::Ingress => s == "ingress",
                    RuleDirection::Egress => s == "egress",
                })
                .unwrap_or(true),
            "priority" => match value {
                FilterValue::Number(n) => rule.priority as f64 == *n,
                _ => true,
            },
            "disabled" => match value {
                FilterValue::Bool(b) => rule.disabled == *b,
                _ => true,
            },
            "vpc_id" => value.as_str().map(|s| rule.vpc_id == s).unwrap_or(true),
            _ => true,
        }
    })
}

fn summarize_entries(rule: &FirewallRule) -> String {
    let (action, entries) = if !rule.allowed.is_empty() {
        ("allow", &rule.allowed)
    } else if !rule.denied.is_empty() {
        ("deny", &rule.denied)
    } else {
        return "-".to_string();
    };
    let body = entries
        .iter()
        .map(|e| {
            if e.ports.is_empty() {
                e.protocol.clone()
            } else {
                format!("{}:{}", e.protocol, e.ports.join(","))
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{action} {body}")
}

/// Firewall rule list with URL-bound filters and the editor dialog.
#[component]
pub fn FirewallRules() -> impl IntoView {
    let qs = use_search_qs(firewall_rule_properties());
    let query = use_query_map();

    let (rules, set_rules) = create_signal(Vec::<FirewallRule>::new());
    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(Option::<String>::None);

    // Fetch on mount
    create_effect(move |prev: Option<bool>| {
        if prev.is_some() {
            return true;
        }
        spawn_local(async move {
            set_loading.set(true);
            match fetch_rules().await {
                Ok(list) => {
                    set_rules.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
        true
    });

    let decoder = qs.clone();
    let condition = create_memo(move |_| decoder.get(&query.get(), &Condition::new()));

    let selected_direction = create_memo(move |_| {
        condition
            .get()
            .get("direction")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    });
    let initial_name = condition
        .get_untracked()
        .get("name")
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    let (name_input, set_name_input) = create_signal(initial_name);
    let debounce = store_value(None::<Timeout>);

    let (dialog_open, set_dialog_open) = create_signal(false);
    let editing = create_rw_signal(Option::<FirewallRule>::None);

    let on_submit = Callback::new(move |saved: FirewallRule| {
        set_rules.update(|list| {
            match list.iter_mut().find(|r| r.id == saved.id) {
                Some(slot) => *slot = saved.clone(),
                None => list.push(saved.clone()),
            }
        });
        set_dialog_open.set(false);
        spawn_local(async move {
            let result = match RestClient::from_origin() {
                Ok(client) => client.save_firewall_rule(&saved).await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                tracing::warn!("failed to save firewall rule: {e}");
            }
        });
    });

    let filtered = move || {
        let cond = condition.get();
        rules
            .get()
            .into_iter()
            .filter(|rule| matches_condition(rule, &cond))
            .collect::<Vec<_>>()
    };

    let name_writer = qs.clone();
    let direction_writer = qs.clone();
    let clearer = qs.clone();

    view! {
        <div class="flex-1 overflow-auto p-6">
            <div class="max-w-7xl mx-auto">
                <PageHeader
                    title="Firewall Rules"
                    description="VPC firewall rules on connected GCP accounts"
                >
                    <button
                        class="btn-primary"
                        on:click=move |_| {
                            editing.set(None);
                            set_dialog_open.set(true);
                        }
                    >
                        "Add Rule"
                    </button>
                </PageHeader>

                // Filters
                <div class="flex items-center gap-4 mb-4">
                    <input
                        type="text"
                        class="input max-w-xs"
                        placeholder="Filter by name..."
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
                        class="input w-40"
                        on:change=move |e| {
                            let value = event_target_value(&e);
                            let mut next = condition.get_untracked();
                            if value.is_empty() {
                                next.remove("direction");
                            } else {
                                next.insert("direction".to_string(), FilterValue::from(value));
                            }
                            direction_writer.set(&next);
                        }
                    >
                        <option value="" selected=move || selected_direction.get().is_empty()>
                            "All directions"
                        </option>
                        <option
                            value="ingress"
                            selected=move || selected_direction.get() == "ingress"
                        >
                            "Ingress"
                        </option>
                        <option
                            value="egress"
                            selected=move || selected_direction.get() == "egress"
                        >
                            "Egress"
                        </option>
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

                <div class="bg-theme-surface rounded-xl border border-theme-border overflow-hidden">
                    {move || {
                        if loading.get() {
                            view! {
                                <div class="p-8 text-center text-theme-secondary">
                                    "Loading firewall rules..."
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
                                        <p class="text-theme-secondary">"No firewall rules found"</p>
                                    </div>
                                }
                                    .into_view()
                            } else {
                                view! {
                                    <table class="w-full">
                                        <thead>
                                            <tr class="border-b border-theme-border bg-theme-bg">
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"Name"</th>
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"VPC"</th>
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"Direction"</th>
                                                <th class="px-4 py-3 text-right text-xs font-medium text-theme-muted uppercase tracking-wider">"Priority"</th>
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"Protocols / Ports"</th>
                                                <th class="px-4 py-3 text-left text-xs font-medium text-theme-muted uppercase tracking-wider">"Status"</th>
                                                <th class="px-4 py-3"></th>
                                            </tr>
                                        </thead>
                                        <tbody class="divide-y divide-theme-border">
                                            {rows
                                                .into_iter()
                                                .map(|rule| {
                                                    let row = rule.clone();
                                                    view! {
                                                        <tr class="hover:bg-theme-surface-hover transition-colors">
                                                            <td class="px-4 py-3 text-sm text-theme font-medium">{rule.name.clone()}</td>
                                                            <td class="px-4 py-3 text-sm text-theme-secondary">{rule.vpc_id.clone()}</td>
                                                            <td class="px-4 py-3 text-sm text-theme-secondary">{direction_label(rule.direction)}</td>
                                                            <td class="px-4 py-3 text-sm text-theme-secondary text-right">{rule.priority}</td>
                                                            <td class="px-4 py-3 text-sm text-theme-secondary font-mono">{summarize_entries(&rule)}</td>
                                                            <td class="px-4 py-3 text-sm">
                                                                {if rule.disabled {
                                                                    view! { <span class="text-theme-muted">"Disabled"</span> }
                                                                } else {
                                                                    view! { <span class="text-success">"Enabled"</span> }
                                                                }}
                                                            </td>
                                                            <td class="px-4 py-3 text-right">
                                                                <button
                                                                    class="text-sm text-accent hover:underline"
                                                                    on:click=move |_| {
                                                                        editing.set(Some(row.clone()));
                                                                        set_dialog_open.set(true);
                                                                    }
                                                                >
                                                                    "Edit"
                                                                </button>
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

        <FirewallRuleDialog
            show=dialog_open
            detail=editing
            on_submit=on_submit
            on_close=move |_| set_dialog_open.set(false)
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_shared::{ProtocolPorts, RuleAction};

    fn condition(entries: &[(&str, FilterValue)]) -> Condition {
        entries
            .iter()
            .map(|(id, v)| (id.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        let rule = FirewallRule::new("allow-https");
        assert!(matches_condition(&rule, &condition(&[("name", "HTTPS".into())])));
        assert!(!matches_condition(&rule, &condition(&[("name", "deny".into())])));
        // An emptied name filter stops excluding, mirroring what the
        // debounced input writes after the field is cleared.
        assert!(matches_condition(&rule, &condition(&[("name", "".into())])));
    }

    #[test]
    fn direction_and_disabled_filters() {
        let rule = FirewallRule::new("allow-https");
        assert!(matches_condition(
            &rule,
            &condition(&[("direction", "egress".into())])
        ));
        assert!(!matches_condition(
            &rule,
            &condition(&[("direction", "ingress".into())])
        ));
        assert!(matches_condition(
            &rule,
            &condition(&[("disabled", FilterValue::Bool(false))])
        ));
        assert!(!matches_condition(
            &rule,
            &condition(&[("disabled", FilterValue::Bool(true))])
        ));
    }

    #[test]
    fn priority_filters_on_exact_number() {
        let rule = FirewallRule::new("allow-https");
        assert!(matches_condition(
            &rule,
            &condition(&[("priority", FilterValue::Number(1000.0))])
        ));
        assert!(!matches_condition(
            &rule,
            &condition(&[("priority", FilterValue::Number(100.0))])
        ));
        // A priority that decoded as a string does not exclude anything.
        assert!(matches_condition(
            &rule,
            &condition(&[("priority", FilterValue::String("1000-ish".into()))])
        ));
    }

    #[test]
    fn entry_summary_covers_both_action_lists() {
        let mut rule = FirewallRule::new("allow-https");
        assert_eq!(summarize_entries(&rule), "allow tcp:443");

        rule.move_entries(RuleAction::Allowed, RuleAction::Denied);
        rule.denied.push(ProtocolPorts {
            protocol: "icmp".into(),
            ports: vec![],
        });
        assert_eq!(summarize_entries(&rule), "deny tcp:443 icmp");

        rule.denied.clear();
        assert_eq!(summarize_entries(&rule), "-");
    }
}
