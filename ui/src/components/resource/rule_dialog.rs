//! Firewall Rule Dialog
//!
//! Add/edit editor for GCP VPC firewall rules. The dialog owns a working
//! copy of the rule; switching the action moves protocol entries between
//! the allow and deny lists, switching a filter kind clears the values
//! recorded under the previous kind.

use leptos::*;

use nimbus_shared::{
    validate_rule_name, FirewallRule, RuleAction, RuleDirection, RuleNameError, SourceKind,
    TargetKind,
};

use crate::components::common::{ConfirmDialog, FormField};

/// Protocols the port editor offers.
const PROTOCOLS: &[&str] = &["tcp", "udp", "icmp", "esp", "ah", "sctp"];

fn parse_target_kind(value: &str) -> TargetKind {
    match value {
        "target_service_accounts" => TargetKind::TargetServiceAccounts,
        _ => TargetKind::TargetTags,
    }
}

fn target_kind_value(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::TargetTags => "target_tags",
        TargetKind::TargetServiceAccounts => "target_service_accounts",
    }
}

fn parse_source_kind(value: &str) -> SourceKind {
    match value {
        "source_ranges" => SourceKind::SourceRanges,
        "source_service_accounts" => SourceKind::SourceServiceAccounts,
        _ => SourceKind::SourceTags,
    }
}

fn source_kind_value(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::SourceTags => "source_tags",
        SourceKind::SourceRanges => "source_ranges",
        SourceKind::SourceServiceAccounts => "source_service_accounts",
    }
}

/// Comma-separated input into trimmed, non-empty items.
fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Modal editor for a firewall rule. `detail` carries the rule being
/// edited; `None` opens the dialog in add mode.
#[component]
pub fn FirewallRuleDialog(
    #[prop(into)] show: Signal<bool>,
    #[prop(into)] detail: Signal<Option<FirewallRule>>,
    #[prop(into)] on_submit: Callback<FirewallRule>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let rule = create_rw_signal(FirewallRule::new(""));
    let action = create_rw_signal(RuleAction::Allowed);
    let target_kind = create_rw_signal(TargetKind::TargetTags);
    let source_kind = create_rw_signal(SourceKind::SourceTags);
    let protocol = create_rw_signal("tcp".to_string());
    let ports_input = create_rw_signal(String::new());
    let name_error = create_rw_signal(Option::<RuleNameError>::None);

    // Re-seed the working copy every time the dialog opens.
    create_effect(move |_| {
        if !show.get() {
            return;
        }
        let next = detail.get().unwrap_or_else(|| FirewallRule::new(""));
        let act = if next.allowed.is_empty() && !next.denied.is_empty() {
            RuleAction::Denied
        } else {
            RuleAction::Allowed
        };
        let proto = next
            .entries(act)
            .first()
            .map(|e| e.protocol.clone())
            .unwrap_or_else(|| "tcp".to_string());
        ports_input.set(next.ports_for(act, &proto).join(","));
        protocol.set(proto);
        action.set(act);
        target_kind.set(TargetKind::TargetTags);
        source_kind.set(SourceKind::SourceTags);
        name_error.set(None);
        rule.set(next);
    });

    let title = move || {
        if detail.get().is_some() {
            "Edit Firewall Rule"
        } else {
            "Add Firewall Rule"
        }
    };

    let submit = move |_: ()| {
        let current = rule.get_untracked();
        match validate_rule_name(&current.name) {
            Ok(()) => {
                name_error.set(None);
                on_submit.call(current);
            }
            Err(err) => name_error.set(Some(err)),
        }
    };

    view! {
        <ConfirmDialog
            title=Signal::derive(move || title().to_string())
            show=show
            on_confirm=submit
            on_close=on_close
        >
            <div class="space-y-4">
                <FormField label="Name" required=true>
                    <input
                        type="text"
                        class="input w-full"
                        placeholder="e.g. allow-https"
                        prop:value=move || rule.with(|r| r.name.clone())
                        on:input=move |e| {
                            rule.update(|r| r.name = event_target_value(&e));
                            name_error.set(None);
                        }
                    />
                    {move || name_error.get().map(|err| view! {
                        <p class="text-xs text-error mt-1">{err.to_string()}</p>
                    })}
                </FormField>

                <FormField label="Priority" required=true>
                    <input
                        type="number"
                        class="input w-40"
                        min="0"
                        max="65535"
                        prop:value=move || rule.with(|r| r.priority.to_string())
                        on:change=move |e| {
                            if let Ok(p) = event_target_value(&e).parse::<u32>() {
                                rule.update(|r| r.priority = p.min(65535));
                            }
                        }
                    />
                </FormField>

                <FormField label="VPC" required=true>
                    <input
                        type="text"
                        class="input w-full"
                        placeholder="VPC id"
                        prop:value=move || rule.with(|r| r.vpc_id.clone())
                        on:input=move |e| rule.update(|r| r.vpc_id = event_target_value(&e))
                    />
                </FormField>

                <FormField label="Direction" required=true>
                    <div class="flex gap-2">
                        {[
                            (RuleDirection::Ingress, "Ingress"),
                            (RuleDirection::Egress, "Egress"),
                        ]
                            .into_iter()
                            .map(|(dir, label)| {
                                view! {
                                    <button
                                        class=move || {
                                            if rule.with(|r| r.direction) == dir {
                                                "btn-toggle-active"
                                            } else {
                                                "btn-toggle"
                                            }
                                        }
                                        on:click=move |_| rule.update(|r| r.direction = dir)
                                    >
                                        {label}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </FormField>

                <FormField label="Targets">
                    <div class="flex gap-2">
                        <select
                            class="input w-56"
                            on:change=move |e| {
                                let next = parse_target_kind(&event_target_value(&e));
                                let prev = target_kind.get_untracked();
                                if prev != next {
                                    rule.update(|r| r.set_target_values(prev, Vec::new()));
                                    target_kind.set(next);
                                }
                            }
                        >
                            {TargetKind::ALL
                                .into_iter()
                                .map(|kind| {
                                    view! {
                                        <option
                                            value=target_kind_value(kind)
                                            selected=move || target_kind.get() == kind
                                        >
                                            {kind.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                        <input
                            type="text"
                            class="input flex-1"
                            placeholder="Comma separated values"
                            prop:value=move || {
                                rule.with(|r| r.target_values(target_kind.get()).join(","))
                            }
                            on:change=move |e| {
                                let values = split_list(&event_target_value(&e));
                                rule.update(|r| {
                                    r.set_target_values(target_kind.get_untracked(), values)
                                });
                            }
                        />
                    </div>
                </FormField>

                <FormField label="Sources">
                    <div class="flex gap-2">
                        <select
                            class="input w-56"
                            on:change=move |e| {
                                let next = parse_source_kind(&event_target_value(&e));
                                let prev = source_kind.get_untracked();
                                if prev != next {
                                    rule.update(|r| r.set_source_values(prev, Vec::new()));
                                    source_kind.set(next);
                                }
                            }
                        >
                            {SourceKind::ALL
                                .into_iter()
                                .map(|kind| {
                                    view! {
                                        <option
                                            value=source_kind_value(kind)
                                            selected=move || source_kind.get() == kind
                                        >
                                            {kind.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                        <input
                            type="text"
                            class="input flex-1"
                            placeholder="Comma separated values"
                            prop:value=move || {
                                rule.with(|r| r.source_values(source_kind.get()).join(","))
                            }
                            on:change=move |e| {
                                let values = split_list(&event_target_value(&e));
                                rule.update(|r| {
                                    r.set_source_values(source_kind.get_untracked(), values)
                                });
                            }
                        />
                    </div>
                </FormField>

                <FormField label="Action" required=true>
                    <div class="flex gap-2">
                        {[(RuleAction::Allowed, "Allow"), (RuleAction::Denied, "Deny")]
                            .into_iter()
                            .map(|(act, label)| {
                                view! {
                                    <button
                                        class=move || {
                                            if action.get() == act {
                                                "btn-toggle-active"
                                            } else {
                                                "btn-toggle"
                                            }
                                        }
                                        on:click=move |_| {
                                            let prev = action.get_untracked();
                                            if prev == act {
                                                return;
                                            }
                                            rule.update(|r| r.move_entries(prev, act));
                                            action.set(act);
                                            let proto = protocol.get_untracked();
                                            ports_input
                                                .set(
                                                    rule
                                                        .with_untracked(|r| r.ports_for(act, &proto))
                                                        .join(","),
                                                );
                                        }
                                    >
                                        {label}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </FormField>

                <FormField label="Protocols and ports">
                    <div class="flex gap-2">
                        <select
                            class="input w-32"
                            on:change=move |e| {
                                let proto = event_target_value(&e);
                                ports_input
                                    .set(
                                        rule
                                            .with_untracked(|r| {
                                                r.ports_for(action.get_untracked(), &proto)
                                            })
                                            .join(","),
                                    );
                                protocol.set(proto);
                            }
                        >
                            {PROTOCOLS
                                .iter()
                                .map(|proto| {
                                    view! {
                                        <option
                                            value=*proto
                                            selected=move || protocol.get() == *proto
                                        >
                                            {proto.to_uppercase()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                        <input
                            type="text"
                            class="input flex-1"
                            placeholder="e.g. 80,443 (empty removes the protocol)"
                            prop:value=move || ports_input.get()
                            on:change=move |e| {
                                let values = split_list(&event_target_value(&e));
                                ports_input.set(values.join(","));
                                rule.update(|r| {
                                    r.set_ports(
                                        action.get_untracked(),
                                        &protocol.get_untracked(),
                                        values,
                                    )
                                });
                            }
                        />
                    </div>
                    <p class="text-xs text-theme-muted mt-1">
                        {move || {
                            rule.with(|r| {
                                let entries = r.entries(action.get());
                                if entries.is_empty() {
                                    "No protocol entries recorded".to_string()
                                } else {
                                    entries
                                        .iter()
                                        .map(|e| {
                                            if e.ports.is_empty() {
                                                e.protocol.clone()
                                            } else {
                                                format!("{}:{}", e.protocol, e.ports.join(","))
                                            }
                                        })
                                        .collect::<Vec<_>>()
                                        .join("  ")
                                }
                            })
                        }}
                    </p>
                </FormField>

                <FormField label="Enforcement">
                    <div class="flex gap-2">
                        {[(false, "Enabled"), (true, "Disabled")]
                            .into_iter()
                            .map(|(disabled, label)| {
                                view! {
                                    <button
                                        class=move || {
                                            if rule.with(|r| r.disabled) == disabled {
                                                "btn-toggle-active"
                                            } else {
                                                "btn-toggle"
                                            }
                                        }
                                        on:click=move |_| rule.update(|r| r.disabled = disabled)
                                    >
                                        {label}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </FormField>

                <FormField label="Memo">
                    <textarea
                        class="input w-full"
                        rows="2"
                        prop:value=move || rule.with(|r| r.memo.clone())
                        on:input=move |e| rule.update(|r| r.memo = event_target_value(&e))
                    ></textarea>
                </FormField>
            </div>
        </ConfirmDialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(split_list("80, 443 ,,8080"), vec!["80", "443", "8080"]);
        assert!(split_list("  ").is_empty());
        assert!(split_list("").is_empty());
    }

    #[test]
    fn kind_values_round_trip() {
        for kind in TargetKind::ALL {
            assert_eq!(parse_target_kind(target_kind_value(kind)), kind);
        }
        for kind in SourceKind::ALL {
            assert_eq!(parse_source_kind(source_kind_value(kind)), kind);
        }
        // Unrecognized values fall back to the tag kinds.
        assert_eq!(parse_target_kind("bogus"), TargetKind::TargetTags);
        assert_eq!(parse_source_kind("bogus"), SourceKind::SourceTags);
    }
}
