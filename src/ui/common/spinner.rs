use leptos::prelude::*;

/// Centered loading indicator with a label
#[component]
pub fn LoadingSpinner(
    #[prop(default = "Loading...")] label: &'static str,
) -> impl IntoView {
    view! {
        <div class="spinner-container" role="status" aria-live="polite">
            <div class="spinner"></div>
            <span class="text-muted">{label}</span>
        </div>
    }
}

/// Full-page loading screen shown while the session is restored
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <LoadingSpinner/>
        </div>
    }
}
