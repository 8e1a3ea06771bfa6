//! Banner messages for errors and confirmations

use crate::ui::{Icon, icons};
use leptos::prelude::*;

/// Error banner, hidden while `error` is `None`.
/// Shows a dismiss button when `on_dismiss` is given.
#[component]
pub fn ErrorMessage(
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div class="alert alert-error" role="alert">
                <Icon name=icons::ALERT_CIRCLE/>
                <span class="alert-text">{move || error.get().unwrap_or_default()}</span>
                {on_dismiss.map(|dismiss| view! {
                    <button
                        type="button"
                        class="btn-icon"
                        aria-label="Dismiss"
                        on:click=move |_| dismiss.run(())
                    >
                        <Icon name=icons::X/>
                    </button>
                })}
            </div>
        </Show>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="alert alert-success" role="status">
                <span class="alert-text">{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}
