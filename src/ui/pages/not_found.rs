//! Not found page component
//!
//! A 404 error page displayed when a route is not found.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::guard::AppRoute;
use crate::ui::icon::{Icon, icons};

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="not-found">
                <Icon name=icons::ALERT_CIRCLE class="icon icon-xl"/>
                <h1 class="title-display">"404"</h1>
                <h2 class="title-xl">"Page Not Found"</h2>
                <p class="text-muted">
                    "The page you're looking for doesn't exist or has been moved."
                </p>
                <A href=AppRoute::Root.path() attr:class="btn-primary">"Go Home"</A>
            </div>
        </div>
    }
}
