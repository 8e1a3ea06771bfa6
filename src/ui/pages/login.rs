//! Login page
//!
//! Standalone page outside the app shell. Signed-in visitors are sent to
//! the dashboard by the `PublicOnly` wrapper in the router.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::core::guard::AppRoute;
use crate::ui::auth::LoginForm;
use crate::ui::{Icon, icons};

#[component]
pub fn LoginPage() -> impl IntoView {
    // A successful login always lands on the dashboard
    let on_success = move |_: ()| {
        let navigate = use_navigate();
        navigate(AppRoute::Dashboard.path(), Default::default());
    };

    view! {
        <div class="auth-page">
            <div class="auth-card card">
                <div class="auth-brand">
                    <Icon name=icons::HEART_PULSE class="icon brand-icon"/>
                    <span class="brand-name">"ClinicDesk"</span>
                </div>

                <LoginForm on_success=Callback::new(on_success)/>

                <p class="auth-switch text-muted">
                    "Don't have an account? "
                    <A href=AppRoute::Register.path() attr:class="link">"Create one"</A>
                </p>
            </div>
        </div>
    }
}
