//! Register form component
//!
//! Creates a staff account. A successful registration signs the user in.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_session;
use crate::core::validation::{FieldErrors, RegisterForm as RegisterInput};
use crate::ui::common::{ErrorMessage, FormField, field_error};

#[component]
pub fn RegisterForm(
    /// Callback when registration is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let session = use_session();

    let email = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        session.clear_error();

        let input = RegisterInput {
            email: email.get_untracked(),
            username: username.get_untracked(),
            full_name: full_name.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
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
            let result = session
                .register(
                    &request.email,
                    &request.username,
                    &request.full_name,
                    &request.password,
                )
                .await;
            if result.is_ok()
                && let Some(callback) = on_success
            {
                callback.run(());
            }
        });
    };

    view! {
        <form on:submit=on_submit class="auth-form" novalidate=true>
            <div class="auth-form-header">
                <h2 class="title-xl">"Create Account"</h2>
                <p class="text-muted">"Register a new staff account"</p>
            </div>

            <ErrorMessage
                error=Signal::derive(move || session.error())
                on_dismiss=Callback::new(move |_| session.clear_error())
            />

            <FormField
                label="Email Address"
                input_type="email"
                autocomplete="email"
                required=true
                value=email
                error=field_error(errors, "email")
            />
            <div class="form-grid">
                <FormField
                    label="Username"
                    autocomplete="username"
                    required=true
                    value=username
                    error=field_error(errors, "username")
                />
                <FormField
                    label="Full Name"
                    autocomplete="name"
                    required=true
                    value=full_name
                    error=field_error(errors, "full_name")
                />
            </div>
            <FormField
                label="Password"
                input_type="password"
                autocomplete="new-password"
                required=true
                value=password
                error=field_error(errors, "password")
            />
            <FormField
                label="Confirm Password"
                input_type="password"
                autocomplete="new-password"
                required=true
                value=confirm_password
                error=field_error(errors, "confirm_password")
            />

            <button
                type="submit"
                class="btn-primary btn-block"
                disabled=move || session.is_pending()
            >
                {move || if session.is_pending() { "Creating account..." } else { "Create Account" }}
            </button>
        </form>
    }
}
