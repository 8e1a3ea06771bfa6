use leptos::prelude::*;

use crate::core::StatusTone;

fn tone_class(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Neutral => "badge badge-default",
        StatusTone::Info => "badge badge-info",
        StatusTone::Success => "badge badge-success",
        StatusTone::Warning => "badge badge-warning",
        StatusTone::Danger => "badge badge-danger",
    }
}

/// Colored status label
#[component]
pub fn StatusBadge(
    /// Text shown in the badge
    label: String,
    tone: StatusTone,
) -> impl IntoView {
    view! { <span class=tone_class(tone)>{label}</span> }
}
