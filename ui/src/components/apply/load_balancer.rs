//! Load Balancer Application Form
//!
//! Purchase form for new load balancers. Network scope drives most of the
//! form: intranet instances hide the public-network fields entirely, and
//! the instance billing mode is derived from the network scope and IP
//! stack rather than chosen directly. Dependent fields reset when their
//! parent selection changes.

use leptos::*;

use nimbus_shared::{
    Eip, InstanceChargeType, IpVersion, LoadBalancerApplication, NetworkChargeType, NetworkType,
    PurchaseUnit, SpecOption, ZoneType,
};

use crate::client::{ConsoleApi, RestClient};
use crate::components::common::{ConfirmDialog, FormCard, FormField, PageHeader};
use crate::state::AppState;

use super::{ApplyCondition, ConditionOptions};

const BANDWIDTH_STEPS: &[u32] = &[1, 10, 100, 256, 512, 1024, 2048, 5120, 10240];

async fn fetch_eips() -> Result<Vec<Eip>, String> {
    let client = RestClient::from_origin().map_err(|e| e.to_string())?;
    client.list_eips().await.map_err(|e| e.to_string())
}

async fn fetch_specs() -> Result<Vec<SpecOption>, String> {
    let client = RestClient::from_origin().map_err(|e| e.to_string())?;
    client.list_spec_options().await.map_err(|e| e.to_string())
}

/// Load balancer purchase form.
#[component]
pub fn ApplyLoadBalancer() -> impl IntoView {
    let app_state = expect_context::<AppState>();
    let scenario = app_state.scenario;

    let cond = create_rw_signal(ApplyCondition::for_scenario(
        scenario.get_untracked(),
        app_state.biz_id.get_untracked(),
    ));

    let net_type = create_rw_signal(NetworkType::Public);
    let ip_version = create_rw_signal(IpVersion::Ipv4);
    let zone_type = create_rw_signal(ZoneType::Single);
    let zones = create_rw_signal(String::new());
    let vpc_id = create_rw_signal(String::new());
    let subnet_id = create_rw_signal(String::new());
    let spec_type = create_rw_signal(String::new());
    let carrier_type = create_rw_signal("bgp".to_string());
    let eip_id = create_rw_signal(Option::<String>::None);
    let network_charge = create_rw_signal(NetworkChargeType::Monthly);
    let bandwidth = create_rw_signal(256u32);
    let quantity = create_rw_signal(1u32);
    let duration = create_rw_signal(1u32);
    let unit = create_rw_signal(PurchaseUnit::Month);
    let auto_renewal = create_rw_signal(false);
    let name = create_rw_signal(String::new());
    let remark = create_rw_signal(String::new());

    let is_public = move || net_type.get() == NetworkType::Public;
    let instance_charge =
        create_memo(move |_| {
            LoadBalancerApplication::derived_charge_type(net_type.get(), ip_version.get())
        });
    let is_prepaid = move || instance_charge.get() == InstanceChargeType::Prepaid;

    // Dependent resets: zones follow the zone type, the subnet follows the
    // VPC, the duration follows its unit.
    create_effect(move |prev: Option<ZoneType>| {
        let zt = zone_type.get();
        if let Some(prev) = prev {
            if prev != zt && zt == ZoneType::Single {
                zones.set(String::new());
            }
        }
        zt
    });
    create_effect(move |prev: Option<String>| {
        let vpc = vpc_id.get();
        if let Some(prev) = prev {
            if prev != vpc {
                subnet_id.set(String::new());
            }
        }
        vpc
    });
    create_effect(move |prev: Option<PurchaseUnit>| {
        let u = unit.get();
        if let Some(prev) = prev {
            if prev != u {
                duration.set(1);
            }
        }
        u
    });

    // EIP and spec catalogs for the picker dialogs.
    let (eips, set_eips) = create_signal(Vec::<Eip>::new());
    let (specs, set_specs) = create_signal(Vec::<SpecOption>::new());
    create_effect(move |prev: Option<bool>| {
        if prev.is_some() {
            return true;
        }
        spawn_local(async move {
            match fetch_eips().await {
                Ok(list) => set_eips.set(list),
                Err(e) => tracing::warn!("failed to load eips: {e}"),
            }
        });
        spawn_local(async move {
            match fetch_specs().await {
                Ok(list) => set_specs.set(list),
                Err(e) => tracing::warn!("failed to load spec options: {e}"),
            }
        });
        true
    });

    let (show_eip_dialog, set_show_eip_dialog) = create_signal(false);
    let (show_spec_dialog, set_show_spec_dialog) = create_signal(false);
    let pending_eip = create_rw_signal(Option::<String>::None);
    let pending_spec = create_rw_signal(String::new());

    let (submitting, set_submitting) = create_signal(false);
    let (submit_result, set_submit_result) =
        create_signal(Option::<Result<String, String>>::None);

    let condition_incomplete = move || cond.with(|c| c.is_empty(scenario.get()));

    let submit_state = app_state.clone();
    let on_submit = move |_| {
        if submitting.get_untracked() || condition_incomplete() {
            return;
        }
        let scope = cond.get_untracked();
        let public = net_type.get_untracked() == NetworkType::Public;
        let prepaid = instance_charge.get_untracked() == InstanceChargeType::Prepaid;
        let application = LoadBalancerApplication {
            biz_id: scope.biz_id,
            account_id: scope.account_id,
            vendor: scope.vendor,
            region: scope.region,
            resource_group: (!scope.resource_group.is_empty()).then(|| scope.resource_group),
            net_type: net_type.get_untracked(),
            ip_version: if public {
                ip_version.get_untracked()
            } else {
                IpVersion::Ipv4
            },
            zone_type: zone_type.get_untracked(),
            zones: zones
                .get_untracked()
                .split(',')
                .map(str::trim)
                .filter(|z| !z.is_empty())
                .map(str::to_string)
                .collect(),
            cloud_vpc_id: vpc_id.get_untracked(),
            cloud_subnet_id: {
                let subnet = subnet_id.get_untracked();
                (!subnet.is_empty()).then_some(subnet)
            },
            spec_type: if public {
                spec_type.get_untracked()
            } else {
                String::new()
            },
            carrier_type: carrier_type.get_untracked(),
            eip_id: if public { eip_id.get_untracked() } else { None },
            instance_charge_type: instance_charge.get_untracked(),
            network_charge_type: network_charge.get_untracked(),
            bandwidth: bandwidth.get_untracked(),
            quantity: quantity.get_untracked(),
            duration: if prepaid { duration.get_untracked() } else { 0 },
            unit: unit.get_untracked(),
            auto_renewal: prepaid && auto_renewal.get_untracked(),
            name: name.get_untracked(),
            memo: String::new(),
            remark: remark.get_untracked(),
        };
        submit_state.remember_selection(application.vendor, &application.region);

        set_submitting.set(true);
        set_submit_result.set(None);
        spawn_local(async move {
            let result = match RestClient::from_origin() {
                Ok(client) => client
                    .apply_load_balancer(&application)
                    .await
                    .map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            let outcome = match result {
                Ok(receipt) if receipt.success => {
                    Ok(receipt.application_id.unwrap_or_default())
                }
                Ok(receipt) => Err(receipt
                    .error
                    .unwrap_or_else(|| "application was rejected".to_string())),
                Err(e) => Err(e),
            };
            set_submit_result.set(Some(outcome));
            set_submitting.set(false);
        });
    };

    view! {
        <div class="flex-1 overflow-auto p-6">
            <div class="max-w-4xl mx-auto">
                <PageHeader
                    title="Apply for Load Balancer"
                    description="Request a new load balancer under the selected account"
                />

                <FormCard title="Account Scope">
                    <ConditionOptions cond=cond />
                </FormCard>

                <FormCard title="Network">
                    <FormField label="Network type" required=true>
                        <div class="flex gap-2">
                            {[(NetworkType::Public, "Public"), (NetworkType::Intra, "Intranet")]
                                .into_iter()
                                .map(|(nt, label)| {
                                    view! {
                                        <button
                                            class=move || {
                                                if net_type.get() == nt {
                                                    "btn-toggle-active"
                                                } else {
                                                    "btn-toggle"
                                                }
                                            }
                                            on:click=move |_| net_type.set(nt)
                                        >
                                            {label}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </FormField>

                    {move || {
                        is_public()
                            .then(|| {
                                view! {
                                    <FormField label="IP version" required=true>
                                        <div class="flex gap-2">
                                            {[
                                                (IpVersion::Ipv4, "IPv4"),
                                                (IpVersion::Ipv6, "IPv6"),
                                                (IpVersion::Ipv6Nat64, "IPv6 NAT64"),
                                            ]
                                                .into_iter()
                                                .map(|(ip, label)| {
                                                    view! {
                                                        <button
                                                            class=move || {
                                                                if ip_version.get() == ip {
                                                                    "btn-toggle-active"
                                                                } else {
                                                                    "btn-toggle"
                                                                }
                                                            }
                                                            on:click=move |_| ip_version.set(ip)
                                                        >
                                                            {label}
                                                        </button>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </FormField>
                                }
                            })
                    }}

                    <FormField label="Zone placement" required=true>
                        <div class="flex gap-2">
                            {[
                                (ZoneType::Single, "Single zone"),
                                (ZoneType::PrimaryStand, "Primary / standby"),
                            ]
                                .into_iter()
                                .map(|(zt, label)| {
                                    view! {
                                        <button
                                            class=move || {
                                                if zone_type.get() == zt {
                                                    "btn-toggle-active"
                                                } else {
                                                    "btn-toggle"
                                                }
                                            }
                                            on:click=move |_| zone_type.set(zt)
                                        >
                                            {label}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </FormField>

                    <FormField label="Zones">
                        <input
                            type="text"
                            class="input w-full"
                            placeholder=move || {
                                if zone_type.get() == ZoneType::Single {
                                    "e.g. ap-singapore-1"
                                } else {
                                    "primary,standby"
                                }
                            }
                            prop:value=move || zones.get()
                            on:change=move |e| zones.set(event_target_value(&e))
                        />
                    </FormField>

                    <FormField label="VPC" required=true>
                        <input
                            type="text"
                            class="input w-full max-w-md"
                            placeholder="VPC id"
                            prop:value=move || vpc_id.get()
                            on:change=move |e| vpc_id.set(event_target_value(&e))
                        />
                    </FormField>

                    <FormField label="Subnet">
                        <input
                            type="text"
                            class="input w-full max-w-md"
                            placeholder="Subnet id (within the VPC above)"
                            prop:value=move || subnet_id.get()
                            on:change=move |e| subnet_id.set(event_target_value(&e))
                        />
                    </FormField>
                </FormCard>

                {move || {
                    is_public()
                        .then(|| {
                            view! {
                                <FormCard title="Public Network">
                                    <FormField label="Carrier" required=true>
                                        <select
                                            class="input w-56"
                                            on:change=move |e| carrier_type.set(event_target_value(&e))
                                        >
                                            {[
                                                ("bgp", "BGP (multi-line)"),
                                                ("cmcc", "China Mobile"),
                                                ("ctcc", "China Telecom"),
                                                ("cucc", "China Unicom"),
                                            ]
                                                .into_iter()
                                                .map(|(value, label)| {
                                                    view! {
                                                        <option
                                                            value=value
                                                            selected=move || carrier_type.get() == value
                                                        >
                                                            {label}
                                                        </option>
                                                    }
                                                })
                                                .collect_view()}
                                        </select>
                                    </FormField>

                                    <FormField label="Instance spec">
                                        <div class="flex items-center gap-3">
                                            <span class="text-sm text-theme">
                                                {move || {
                                                    let spec = spec_type.get();
                                                    if spec.is_empty() { "Shared".to_string() } else { spec }
                                                }}
                                            </span>
                                            <button
                                                class="text-sm text-accent hover:underline"
                                                on:click=move |_| {
                                                    pending_spec.set(spec_type.get_untracked());
                                                    set_show_spec_dialog.set(true);
                                                }
                                            >
                                                "Change"
                                            </button>
                                        </div>
                                    </FormField>

                                    <FormField label="Elastic IP">
                                        <div class="flex items-center gap-3">
                                            <span class="text-sm text-theme">
                                                {move || eip_id.get().unwrap_or_else(|| "None".to_string())}
                                            </span>
                                            <button
                                                class="text-sm text-accent hover:underline disabled:text-theme-muted disabled:no-underline"
                                                disabled=is_prepaid
                                                on:click=move |_| {
                                                    pending_eip.set(eip_id.get_untracked());
                                                    set_show_eip_dialog.set(true);
                                                }
                                            >
                                                "Select"
                                            </button>
                                            {move || {
                                                is_prepaid()
                                                    .then(|| {
                                                        view! {
                                                            <span class="text-xs text-theme-muted">
                                                                "Not available for monthly subscription instances"
                                                            </span>
                                                        }
                                                    })
                                            }}
                                        </div>
                                    </FormField>

                                    <FormField label="Network billing" required=true>
                                        <select
                                            class="input w-56"
                                            on:change=move |e| {
                                                network_charge
                                                    .set(
                                                        match event_target_value(&e).as_str() {
                                                            "hourly" => NetworkChargeType::Hourly,
                                                            "traffic" => NetworkChargeType::Traffic,
                                                            "bandwidth_package" => NetworkChargeType::BandwidthPackage,
                                                            _ => NetworkChargeType::Monthly,
                                                        },
                                                    )
                                            }
                                        >
                                            {[
                                                (NetworkChargeType::Monthly, "monthly", "Monthly bandwidth"),
                                                (NetworkChargeType::Hourly, "hourly", "Hourly bandwidth"),
                                                (NetworkChargeType::Traffic, "traffic", "By traffic"),
                                                (
                                                    NetworkChargeType::BandwidthPackage,
                                                    "bandwidth_package",
                                                    "Bandwidth package",
                                                ),
                                            ]
                                                .into_iter()
                                                .map(|(charge, value, label)| {
                                                    view! {
                                                        <option
                                                            value=value
                                                            selected=move || network_charge.get() == charge
                                                        >
                                                            {label}
                                                        </option>
                                                    }
                                                })
                                                .collect_view()}
                                        </select>
                                    </FormField>

                                    <FormField label="Bandwidth" required=true>
                                        <select
                                            class="input w-40"
                                            on:change=move |e| {
                                                if let Ok(mbps) = event_target_value(&e).parse::<u32>() {
                                                    bandwidth.set(mbps);
                                                }
                                            }
                                        >
                                            {BANDWIDTH_STEPS
                                                .iter()
                                                .map(|mbps| {
                                                    view! {
                                                        <option
                                                            value=mbps.to_string()
                                                            selected=move || bandwidth.get() == *mbps
                                                        >
                                                            {format!("{mbps} Mbps")}
                                                        </option>
                                                    }
                                                })
                                                .collect_view()}
                                        </select>
                                    </FormField>
                                </FormCard>
                            }
                        })
                }}

                <FormCard title="Billing and Purchase">
                    <FormField label="Instance billing">
                        <span class="text-sm text-theme">
                            {move || instance_charge.get().label()}
                        </span>
                        <p class="text-xs text-theme-muted mt-1">
                            "Determined by network type and IP version"
                        </p>
                    </FormField>

                    {move || {
                        is_prepaid()
                            .then(|| {
                                view! {
                                    <FormField label="Duration" required=true>
                                        <div class="flex items-center gap-2">
                                            <select
                                                class="input w-24"
                                                on:change=move |e| {
                                                    if let Ok(d) = event_target_value(&e).parse::<u32>() {
                                                        duration.set(d);
                                                    }
                                                }
                                            >
                                                {move || {
                                                    (1..=unit.get().max_duration())
                                                        .map(|d| {
                                                            view! {
                                                                <option
                                                                    value=d.to_string()
                                                                    selected=move || duration.get() == d
                                                                >
                                                                    {d}
                                                                </option>
                                                            }
                                                        })
                                                        .collect_view()
                                                }}
                                            </select>
                                            <select
                                                class="input w-28"
                                                on:change=move |e| {
                                                    unit.set(
                                                        if event_target_value(&e) == "year" {
                                                            PurchaseUnit::Year
                                                        } else {
                                                            PurchaseUnit::Month
                                                        },
                                                    )
                                                }
                                            >
                                                <option
                                                    value="month"
                                                    selected=move || unit.get() == PurchaseUnit::Month
                                                >
                                                    "Months"
                                                </option>
                                                <option
                                                    value="year"
                                                    selected=move || unit.get() == PurchaseUnit::Year
                                                >
                                                    "Years"
                                                </option>
                                            </select>
                                            <label class="flex items-center gap-1.5 text-sm text-theme-secondary ml-2">
                                                <input
                                                    type="checkbox"
                                                    prop:checked=move || auto_renewal.get()
                                                    on:change=move |e| {
                                                        auto_renewal.set(event_target_checked(&e))
                                                    }
                                                />
                                                "Auto renew"
                                            </label>
                                        </div>
                                    </FormField>
                                }
                            })
                    }}

                    <FormField label="Quantity" required=true>
                        <input
                            type="number"
                            class="input w-24"
                            min="1"
                            max="20"
                            prop:value=move || quantity.get().to_string()
                            on:change=move |e| {
                                if let Ok(q) = event_target_value(&e).parse::<u32>() {
                                    quantity.set(q.clamp(1, 20));
                                }
                            }
                        />
                    </FormField>

                    <FormField label="Name" required=true>
                        <input
                            type="text"
                            class="input w-full max-w-md"
                            placeholder="Instance name"
                            prop:value=move || name.get()
                            on:input=move |e| name.set(event_target_value(&e))
                        />
                    </FormField>

                    <FormField label="Remark">
                        <textarea
                            class="input w-full"
                            rows="2"
                            prop:value=move || remark.get()
                            on:input=move |e| remark.set(event_target_value(&e))
                        ></textarea>
                    </FormField>
                </FormCard>

                // Submit bar
                <div class="flex items-center gap-4 py-4">
                    <button
                        class="btn-primary disabled:opacity-50"
                        disabled=move || submitting.get() || condition_incomplete()
                        on:click=on_submit
                    >
                        {move || if submitting.get() { "Submitting..." } else { "Submit application" }}
                    </button>
                    {move || {
                        condition_incomplete()
                            .then(|| {
                                view! {
                                    <span class="text-sm text-theme-muted">
                                        "Complete the account scope to submit"
                                    </span>
                                }
                            })
                    }}
                    {move || {
                        submit_result
                            .get()
                            .map(|outcome| match outcome {
                                Ok(id) => view! {
                                    <span class="text-sm text-success">
                                        {format!("Application {id} submitted")}
                                    </span>
                                },
                                Err(err) => view! {
                                    <span class="text-sm text-error">{err}</span>
                                },
                            })
                    }}
                </div>
            </div>
        </div>

        // EIP picker
        <ConfirmDialog
            title="Select Elastic IP".to_string()
            show=show_eip_dialog
            on_confirm=move |_| {
                eip_id.set(pending_eip.get_untracked());
                set_show_eip_dialog.set(false);
            }
            on_close=move |_| set_show_eip_dialog.set(false)
        >
            <div class="space-y-1">
                <label class="flex items-center gap-2 p-2 rounded hover:bg-theme-surface-hover cursor-pointer">
                    <input
                        type="radio"
                        name="eip"
                        prop:checked=move || pending_eip.get().is_none()
                        on:change=move |_| pending_eip.set(None)
                    />
                    <span class="text-sm text-theme">"None (allocate automatically)"</span>
                </label>
                {move || {
                    eips.get()
                        .into_iter()
                        .map(|eip| {
                            let id = eip.id.clone();
                            let selected_id = eip.id.clone();
                            view! {
                                <label class="flex items-center gap-2 p-2 rounded hover:bg-theme-surface-hover cursor-pointer">
                                    <input
                                        type="radio"
                                        name="eip"
                                        prop:checked=move || {
                                            pending_eip.get().as_deref() == Some(id.as_str())
                                        }
                                        on:change=move |_| {
                                            pending_eip.set(Some(selected_id.clone()))
                                        }
                                    />
                                    <span class="text-sm text-theme">{eip.name.clone()}</span>
                                    <span class="text-sm text-theme-muted font-mono">
                                        {eip.public_ip.clone()}
                                    </span>
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </ConfirmDialog>

        // Spec picker
        <ConfirmDialog
            title="Select Instance Spec".to_string()
            show=show_spec_dialog
            on_confirm=move |_| {
                spec_type.set(pending_spec.get_untracked());
                set_show_spec_dialog.set(false);
            }
            on_close=move |_| set_show_spec_dialog.set(false)
        >
            <table class="w-full">
                <thead>
                    <tr class="border-b border-theme-border">
                        <th class="px-2 py-2"></th>
                        <th class="px-2 py-2 text-left text-xs font-medium text-theme-muted uppercase">"Model"</th>
                        <th class="px-2 py-2 text-right text-xs font-medium text-theme-muted uppercase">"Max conns"</th>
                        <th class="px-2 py-2 text-right text-xs font-medium text-theme-muted uppercase">"New conns/s"</th>
                        <th class="px-2 py-2 text-right text-xs font-medium text-theme-muted uppercase">"QPS"</th>
                        <th class="px-2 py-2 text-right text-xs font-medium text-theme-muted uppercase">"Bandwidth"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-theme-border">
                    <tr>
                        <td class="px-2 py-2">
                            <input
                                type="radio"
                                name="spec"
                                prop:checked=move || pending_spec.get().is_empty()
                                on:change=move |_| pending_spec.set(String::new())
                            />
                        </td>
                        <td class="px-2 py-2 text-sm text-theme" colspan="5">
                            "Shared (default)"
                        </td>
                    </tr>
                    {move || {
                        specs
                            .get()
                            .into_iter()
                            .map(|spec| {
                                let model = spec.model.clone();
                                let selected_model = spec.model.clone();
                                view! {
                                    <tr>
                                        <td class="px-2 py-2">
                                            <input
                                                type="radio"
                                                name="spec"
                                                prop:checked=move || pending_spec.get() == model
                                                on:change=move |_| {
                                                    pending_spec.set(selected_model.clone())
                                                }
                                            />
                                        </td>
                                        <td class="px-2 py-2 text-sm text-theme">{spec.model.clone()}</td>
                                        <td class="px-2 py-2 text-sm text-theme-secondary text-right">
                                            {spec.max_concurrent_connections}
                                        </td>
                                        <td class="px-2 py-2 text-sm text-theme-secondary text-right">
                                            {spec.new_connections_per_second}
                                        </td>
                                        <td class="px-2 py-2 text-sm text-theme-secondary text-right">
                                            {spec.queries_per_second}
                                        </td>
                                        <td class="px-2 py-2 text-sm text-theme-secondary text-right">
                                            {format!("{} Mbps", spec.bandwidth_limit)}
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </ConfirmDialog>
    }
}
