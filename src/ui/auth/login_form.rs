//! Login form component

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_session;
use crate::core::validation::{FieldErrors, LoginForm as LoginInput};
use crate::ui::common::{ErrorMessage, FormField, field_error};

/// Email and password form. Field rules run before anything is sent; the
/// backend's rejection shows as a dismissible banner.
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let session = use_session();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        session.clear_error();

        let input = LoginInput {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let request = match input.validate() {
            Ok(request) => {
                errors.set(FieldErrors::default());
                request
            }
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };

        spawn_local(async move {
            // Failures land in the session's last_error banner
            if session.login(&request.email, &request.password).await.is_ok()
                && let Some(callback) = on_success
            {
                callback.run(());
            }
        });
    };

    view! {
        <form on:submit=on_submit class="auth-form" novalidate=true>
            <div class="auth-form-header">
                <h2 class="title-xl">"Welcome Back"</h2>
                <p class="text-muted">"Sign in to the clinic dashboard"</p>
            </div>

            <ErrorMessage
                error=Signal::derive(move || session.error())
                on_dismiss=Callback::new(move |_| session.clear_error())
            />

            <FormField
                label="Email Address"
                input_type="email"
                autocomplete="email"
                placeholder="you@clinic.com"
                required=true
                value=email
                error=field_error(errors, "email")
            />
            <FormField
                label="Password"
                input_type="password"
                autocomplete="current-password"
                required=true
                value=password
                error=field_error(errors, "password")
            />

            <button
                type="submit"
                class="btn-primary btn-block"
                disabled=move || session.is_pending()
            >
                {move || if session.is_pending() { "Signing in..." } else { "Sign In" }}
            </button>
        </form>
    }
}
