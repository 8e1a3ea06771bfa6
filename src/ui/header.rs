//! Top bar with the brand link and the signed-in user's menu

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::SessionError;
use crate::core::guard::AppRoute;
use crate::ui::auth::{UserMenu, use_session};
use crate::ui::shell::use_shell_state;
use crate::ui::{Icon, icons};

#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let shell = use_shell_state();

    // Refresh the profile once on mount. A rejected token clears the
    // session and the route guard takes the user back to the login page.
    Effect::new(move |_| {
        spawn_local(async move {
            match session.fetch_current_user().await {
                Err(SessionError::Api(e)) if e.is_auth_failure() => {
                    leptos::logging::log!("Stored token was rejected, signing out");
                }
                Err(e) => leptos::logging::warn!("Failed to refresh current user: {}", e),
                Ok(_) => {}
            }
        });
    });

    view! {
        <header class="app-header">
            <div class="header-left">
                <button
                    type="button"
                    class="btn-icon"
                    title="Toggle sidebar"
                    aria-label="Toggle sidebar"
                    on:click=move |_| shell.toggle_sidebar()
                >
                    <Icon name=icons::MENU/>
                </button>
                <A href=AppRoute::Dashboard.path() attr:class="brand">
                    <Icon name=icons::HEART_PULSE class="icon brand-icon"/>
                    <span class="brand-name">"ClinicDesk"</span>
                </A>
            </div>
            <div class="header-right">
                <UserMenu/>
            </div>
        </header>
    }
}
