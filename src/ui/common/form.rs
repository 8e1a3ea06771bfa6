use crate::core::validation::FieldErrors;
use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

/// Inline message for one field of a validated form
pub fn field_error(errors: RwSignal<FieldErrors>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || errors.with(|e| e.message(field)))
}

#[component]
fn FieldError(error: Option<Signal<Option<String>>>) -> impl IntoView {
    move || {
        error.and_then(|e| e.get()).map(|err| {
            view! {
                <div class="field-error">
                    <Icon name=icons::ALERT_CIRCLE class="icon-sm"/>
                    <span>{err}</span>
                </div>
            }
        })
    }
}

/// Labelled input bound to a string signal
#[component]
pub fn FormField(
    /// Field label text
    label: &'static str,
    /// Whether field is required (shows red asterisk)
    #[prop(default = false)]
    required: bool,
    /// Input type (text, password, email, date, ...)
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(default = "")] placeholder: &'static str,
    /// Browser autocomplete hint
    #[prop(default = "off")]
    autocomplete: &'static str,
    value: RwSignal<String>,
    #[prop(into, default = Signal::from(false))] disabled: Signal<bool>,
    /// Inline validation message
    #[prop(optional, into)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="field">
            <label class="label">
                {label}
                {required.then(|| view! { <span class="required">"*"</span> })}
            </label>
            <input
                type=input_type
                class="input"
                class:input-invalid=move || error.and_then(|e| e.get()).is_some()
                placeholder=placeholder
                autocomplete=autocomplete
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                disabled=move || disabled.get()
            />
            <FieldError error=error/>
        </div>
    }
}

/// Text area form field component
#[component]
pub fn TextAreaField(
    label: &'static str,
    #[prop(default = "")] placeholder: &'static str,
    value: RwSignal<String>,
    #[prop(default = 3)] rows: u32,
    #[prop(optional, into)] error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="field">
            <label class="label">{label}</label>
            <textarea
                class="input"
                class:input-invalid=move || error.and_then(|e| e.get()).is_some()
                placeholder=placeholder
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <FieldError error=error/>
        </div>
    }
}

/// Select/dropdown form field component
#[component]
pub fn SelectField(
    label: &'static str,
    #[prop(default = false)] required: bool,
    value: RwSignal<String>,
    /// Options as (value, display_text) pairs
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    #[prop(optional, into)] error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="field">
            <label class="label">
                {label}
                {required.then(|| view! { <span class="required">"*"</span> })}
            </label>
            <select
                class="input"
                class:input-invalid=move || error.and_then(|e| e.get()).is_some()
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {move || options.get().into_iter().map(|(val, text)| {
                    let selected = value.with_untracked(|v| *v == val);
                    view! {
                        <option value=val selected=selected>{text}</option>
                    }
                }).collect_view()}
            </select>
            <FieldError error=error/>
        </div>
    }
}
