use leptos::prelude::*;

/// Title row of a resource page with an optional action area on the right
#[component]
pub fn PageHeader(
    title: &'static str,
    #[prop(optional)] subtitle: Option<&'static str>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div>
                <h1 class="title-2xl">{title}</h1>
                {subtitle.map(|text| view! { <p class="text-muted">{text}</p> })}
            </div>
            <div class="page-actions">{children.map(|c| c())}</div>
        </div>
    }
}

#[component]
pub fn EmptyState(message: &'static str) -> impl IntoView {
    view! {
        <div class="empty-state">
            <p class="text-muted">{message}</p>
        </div>
    }
}

/// Small metric card used on the dashboard and the billing page
#[component]
pub fn StatCard(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(default = "")] accent: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("stat-card card {}", accent)>
            <span class="stat-label">{label}</span>
            <span class="stat-value">{move || value.get()}</span>
        </div>
    }
}
