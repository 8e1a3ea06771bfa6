use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

#[cfg(not(feature = "ssr"))]
use leptos::wasm_bindgen::JsCast;

/// Base modal component with consistent structure
#[component]
pub fn BaseModal(
    /// Modal title
    #[prop(into)]
    title: Signal<String>,
    /// Whether modal is open
    #[prop(into)]
    is_open: Signal<bool>,
    /// Callback to close modal
    on_close: Callback<()>,
    /// Modal content
    children: Children,
    /// Maximum width class
    #[prop(default = "modal-md")]
    width: &'static str,
) -> impl IntoView {
    // Close on Escape key
    #[cfg(not(feature = "ssr"))]
    {
        use leptos::ev::keydown;

        let handle_keydown = window_event_listener(keydown, move |ev| {
            if ev.key() == "Escape" && is_open.get_untracked() {
                on_close.run(());
            }
        });

        on_cleanup(move || drop(handle_keydown));
    }

    view! {
        <div
            class="modal-backdrop"
            class:hidden=move || !is_open.get()
            on:click=move |e| {
                #[cfg(not(feature = "ssr"))]
                {
                    let on_backdrop = e
                        .target()
                        .and_then(|t| t.dyn_ref::<web_sys::Element>().map(|el| el.class_list()))
                        .is_some_and(|classes| classes.contains("modal-backdrop"));
                    if on_backdrop {
                        on_close.run(());
                    }
                }
                #[cfg(feature = "ssr")]
                {
                    let _ = e;
                }
            }
        >
            <div class=format!("modal card {}", width) role="dialog" aria-modal="true">
                <div class="card-header">
                    <h3 class="title-lg">{move || title.get()}</h3>
                    <button
                        class="btn-icon"
                        on:click=move |_| on_close.run(())
                        title="Close"
                        aria-label="Close dialog"
                    >
                        <Icon name=icons::X/>
                    </button>
                </div>

                <div class="card-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// Confirmation dialog modal
#[component]
pub fn ConfirmDialog(
    /// Dialog title
    title: String,
    /// Dialog message
    #[prop(into)]
    message: Signal<String>,
    /// Whether dialog is open
    #[prop(into)]
    is_open: Signal<bool>,
    /// Callback when confirmed
    on_confirm: Callback<()>,
    /// Callback when cancelled
    on_cancel: Callback<()>,
    /// Confirm button text
    #[prop(default = "Delete".to_string())]
    confirm_text: String,
) -> impl IntoView {
    view! {
        <BaseModal
            title=title
            is_open=is_open
            on_close=on_cancel
            width="modal-sm"
        >
            <p class="text-muted">{move || message.get()}</p>

            <div class="form-actions">
                <button
                    type="button"
                    class="btn-secondary"
                    on:click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </button>
                <button
                    type="button"
                    class="btn-danger"
                    on:click=move |_| {
                        on_confirm.run(());
                        on_cancel.run(());
                    }
                >
                    {confirm_text.clone()}
                </button>
            </div>
        </BaseModal>
    }
}
