//! Shared chrome: confirm dialog, form cards, page headers.

use leptos::*;

/// Modal dialog with confirm/cancel footer.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] title: MaybeSignal<String>,
    #[prop(into)] show: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    let children = store_value(children);
    let title = store_value(title);

    view! {
        {move || show.get().then(|| view! {
            <div class="fixed inset-0 z-50 flex items-center justify-center">
                <div
                    class="absolute inset-0 bg-black/50"
                    on:click=move |_| on_close.call(())
                ></div>
                <div class="relative bg-theme-surface border border-theme-border rounded-xl shadow-xl w-full max-w-2xl mx-4">
                    <div class="flex items-center justify-between px-5 py-4 border-b border-theme-border">
                        <h2 class="text-lg font-semibold text-theme">{move || title.with_value(|t| t.get())}</h2>
                        <button
                            class="text-theme-muted hover:text-theme transition-colors"
                            on:click=move |_| on_close.call(())
                        >
                            "✕"
                        </button>
                    </div>
                    <div class="p-5 max-h-[60vh] overflow-auto">
                        {children.with_value(|c| c())}
                    </div>
                    <footer class="flex justify-end gap-2 px-5 py-4 border-t border-theme-border">
                        <button class="btn-primary" on:click=move |_| on_confirm.call(())>
                            "Confirm"
                        </button>
                        <button
                            class="px-4 py-2 rounded-lg text-sm text-theme-secondary hover:text-theme hover:bg-theme-surface-hover transition-colors"
                            on:click=move |_| on_close.call(())
                        >
                            "Cancel"
                        </button>
                    </footer>
                </div>
            </div>
        })}
    }
}

/// Card grouping a titled section of a form.
#[component]
pub fn FormCard(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <section class="bg-theme-surface rounded-xl border border-theme-border mb-4">
            <h2 class="px-5 py-3 text-sm font-semibold text-theme border-b border-theme-border">
                {title}
            </h2>
            <div class="p-5 space-y-4">
                {children()}
            </div>
        </section>
    }
}

/// Labeled row inside a [`FormCard`].
#[component]
pub fn FormField(
    label: &'static str,
    #[prop(default = false)] required: bool,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="flex items-start gap-4">
            <label class="w-40 flex-shrink-0 pt-1.5 text-sm text-theme-secondary">
                {label}
                {required.then(|| view! { <span class="text-error ml-0.5">"*"</span> })}
            </label>
            <div class="flex-1 min-w-0">
                {children()}
            </div>
        </div>
    }
}

/// Page header with title, optional description and action slot.
#[component]
pub fn PageHeader(
    title: &'static str,
    #[prop(optional)] description: Option<&'static str>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between mb-6">
            <div>
                <h1 class="text-2xl font-bold text-theme">{title}</h1>
                {description.map(|d| view! {
                    <p class="text-theme-secondary mt-1">{d}</p>
                })}
            </div>
            <div class="flex items-center gap-3">
                {children.map(|c| c())}
            </div>
        </div>
    }
}

/// Placeholder for console sections that are plain navigation targets.
#[component]
pub fn PlaceholderPage(title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <div class="flex-1 flex items-center justify-center p-6 h-full">
            <div class="text-center">
                <h2 class="text-xl font-semibold text-theme mb-2">{title}</h2>
                <p class="text-theme-secondary">{description}</p>
            </div>
        </div>
    }
}
