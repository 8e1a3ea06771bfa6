//! Route wrappers that apply the authentication guard
//!
//! Nothing is decided until the session has been restored on the client.
//! The server render and the first hydrated frame show the loading screen,
//! so a stored token never causes a bounce through `/login`.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::core::guard::{AppRoute, GuardDecision, guard, landing};
use crate::ui::auth::use_session;
use crate::ui::common::LoadingScreen;
use crate::ui::shell::AppShell;

/// Render `children` inside the app shell when the guard allows `route`,
/// otherwise redirect. Re-evaluated whenever the session changes, so a
/// logout or an expired token leaves the page immediately.
#[component]
pub fn RequireAuth(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let decision = Memo::new(move |_| session.session.with(|s| guard(s, route)));

    move || {
        if !session.ready.get() {
            return view! { <LoadingScreen/> }.into_any();
        }
        match decision.get() {
            GuardDecision::Render => {
                let children = children.clone();
                view! { <AppShell>{children()}</AppShell> }.into_any()
            }
            GuardDecision::Redirect(target) => view! { <Redirect path=target.path()/> }.into_any(),
        }
    }
}

/// `/` sends visitors to the dashboard or the login page
#[component]
pub fn RootRedirect() -> impl IntoView {
    let session = use_session();

    move || {
        if !session.ready.get() {
            return view! { <LoadingScreen/> }.into_any();
        }
        let target = session.session.with(landing);
        view! { <Redirect path=target.path()/> }.into_any()
    }
}

/// Wrapper for the login and register pages: a signed-in visitor goes
/// straight to the dashboard.
#[component]
pub fn PublicOnly(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    move || {
        if session.ready.get() && session.is_authenticated() {
            view! { <Redirect path=AppRoute::Dashboard.path()/> }.into_any()
        } else {
            children().into_any()
        }
    }
}
