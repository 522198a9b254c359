//! App Shell Component
//!
//! Layout container combining the header navigation with the routed page
//! content.

use leptos::*;

use super::HeaderNav;

/// Main application shell layout
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    view! {
        <div class="h-screen flex flex-col bg-theme-bg text-theme overflow-hidden">
            <HeaderNav />

            <main class="flex-1 flex flex-col min-h-0 overflow-hidden">
                <div class="flex-1 overflow-auto">
                    {children()}
                </div>
            </main>
        </div>
    }
}
