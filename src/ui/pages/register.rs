//! Registration page

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::core::guard::AppRoute;
use crate::ui::auth::RegisterForm;
use crate::ui::{Icon, icons};

#[component]
pub fn RegisterPage() -> impl IntoView {
    // Registration signs the new user in
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

                <RegisterForm on_success=Callback::new(on_success)/>

                <p class="auth-switch text-muted">
                    "Already have an account? "
                    <A href=AppRoute::Login.path() attr:class="link">"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
