use chrono::Datelike;
use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Utc::now().year();

    view! {
        <footer class="app-footer">
            <p class="text-muted">{format!("© {} ClinicDesk. All rights reserved.", year)}</p>
        </footer>
    }
}
