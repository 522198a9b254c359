//! Application Root
//!
//! Router wiring for the console sections plus the globally shared state.

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::components::apply::ApplyLoadBalancer;
use crate::components::common::PlaceholderPage;
use crate::components::layout::AppShell;
use crate::components::resource::{FirewallRules, LoadBalancerList};
use crate::state::AppState;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(AppState::new());

    view! {
        <Title text="Nimbus Console" />
        <Router>
            <AppShell>
                <Routes>
                    <Route
                        path="/"
                        view=|| view! { <Redirect path="/business/load-balancers" /> }
                    />
                    <Route path="/business/load-balancers" view=LoadBalancerList />
                    <Route path="/business/firewall-rules" view=FirewallRules />
                    <Route path="/service/apply/load-balancer" view=ApplyLoadBalancer />
                    <Route
                        path="/resource/accounts"
                        view=|| {
                            view! {
                                <PlaceholderPage
                                    title="Resource Access"
                                    description="Connect cloud accounts to manage their resources here."
                                />
                            }
                        }
                    />
                    <Route
                        path="/scheme/recommendation"
                        view=|| {
                            view! {
                                <PlaceholderPage
                                    title="Resource Selection"
                                    description="Recommended instance types and capacity planning."
                                />
                            }
                        }
                    />
                    <Route
                        path="/bill/account-manage"
                        view=|| {
                            view! {
                                <PlaceholderPage
                                    title="Account Manage"
                                    description="Billing accounts and reconciliation."
                                />
                            }
                        }
                    />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </AppShell>
        </Router>
    }
}

/// Fallback for unknown paths.
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex-1 flex items-center justify-center p-6 h-full">
            <div class="text-center">
                <h2 class="text-xl font-semibold text-theme mb-2">"Page not found"</h2>
                <p class="text-theme-secondary mb-4">
                    "The page you are looking for does not exist."
                </p>
                <A href="/" class="btn-primary inline-block">
                    "Back to console"
                </A>
            </div>
        </div>
    }
}
