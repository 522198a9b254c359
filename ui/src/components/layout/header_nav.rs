//! Header Navigation
//!
//! Top-level console sections rendered as horizontal tabs, driven by a
//! static route table. Sections with sub-pages get a second tab row.

use leptos::*;
use leptos_router::*;

/// A top-level console section.
#[derive(Debug, Clone, Copy)]
pub struct HeadRoute {
    pub id: &'static str,
    pub name: &'static str,
    /// Landing page the tab navigates to.
    pub path: &'static str,
}

/// Header navigation configuration.
pub const HEAD_ROUTES: &[HeadRoute] = &[
    HeadRoute {
        id: "business",
        name: "Resource Management",
        path: "/business/load-balancers",
    },
    HeadRoute {
        id: "service",
        name: "Service Requests",
        path: "/service/apply/load-balancer",
    },
    HeadRoute {
        id: "resource",
        name: "Resource Access",
        path: "/resource/accounts",
    },
    HeadRoute {
        id: "scheme",
        name: "Resource Selection",
        path: "/scheme/recommendation",
    },
    HeadRoute {
        id: "bill",
        name: "Account Manage",
        path: "/bill/account-manage",
    },
];

/// Header with the console section tabs.
#[component]
pub fn HeaderNav() -> impl IntoView {
    let location = use_location();

    view! {
        <header class="bg-theme-surface border-b border-theme-border flex-shrink-0">
            <div class="h-14 flex items-center px-4 gap-4">
                // Logo
                <A href="/" class="flex items-center gap-2 text-theme flex-shrink-0">
                    <div class="w-8 h-8 bg-gradient-to-br from-sky-500 to-indigo-600 rounded-lg flex items-center justify-center">
                        <span class="text-white text-sm font-bold">"N"</span>
                    </div>
                    <span class="text-lg font-bold">"Nimbus"</span>
                </A>

                // Section tabs
                <nav class="flex items-center gap-1 ml-6">
                    {HEAD_ROUTES
                        .iter()
                        .map(|route| view! { <SectionTab route=*route /> })
                        .collect_view()}
                </nav>
            </div>

            // Sub-tabs for the resource management section
            {move || {
                let pathname = location.pathname.get();
                pathname.starts_with("/business").then(|| view! {
                    <div class="h-10 flex items-center px-4 gap-1 bg-theme-bg border-t border-theme-border">
                        <SubTab href="/business/load-balancers" label="Load Balancers" />
                        <SubTab href="/business/firewall-rules" label="Firewall Rules" />
                    </div>
                })
            }}
        </header>
    }
}

/// One top-level section tab. Active while the current path is anywhere
/// inside the section (first path segment matches the section id).
#[component]
fn SectionTab(route: HeadRoute) -> impl IntoView {
    let location = use_location();
    let section_prefix = format!("/{}", route.id);

    view! {
        <A
            href=route.path
            class=move || {
                let pathname = location.pathname.get();
                let is_active = pathname == section_prefix
                    || pathname.starts_with(&format!("{}/", section_prefix));

                let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if is_active {
                    format!("{} bg-accent text-white", base)
                } else {
                    format!(
                        "{} text-theme-secondary hover:text-theme hover:bg-theme-surface-hover",
                        base
                    )
                }
            }
        >
            {route.name}
        </A>
    }
}

/// Second-row tab inside a section.
#[component]
fn SubTab(href: &'static str, label: &'static str) -> impl IntoView {
    let location = use_location();

    view! {
        <A
            href=href
            class=move || {
                let is_active = location.pathname.get() == href;
                let base = "px-3 py-1.5 rounded text-xs font-medium transition-colors";
                if is_active {
                    format!("{} bg-theme-surface text-theme border border-theme-border", base)
                } else {
                    format!(
                        "{} text-theme-muted hover:text-theme hover:bg-theme-surface-hover",
                        base
                    )
                }
            }
        >
            {label}
        </A>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_table_covers_every_console_section() {
        let ids: Vec<&str> = HEAD_ROUTES.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            ["business", "service", "resource", "scheme", "bill"]
        );
    }

    #[test]
    fn every_section_lands_inside_its_own_prefix() {
        for route in HEAD_ROUTES {
            assert!(
                route.path.starts_with(&format!("/{}/", route.id)),
                "{} does not land under /{}/",
                route.path,
                route.id
            );
        }
    }
}
