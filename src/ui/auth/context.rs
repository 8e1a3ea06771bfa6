//! Reactive session context
//!
//! Wraps the [`AppSessionStore`] for the component tree:
//! - mirrors every store change into a `RwSignal<Session>`
//! - restores the stored token once the app has hydrated
//! - tracks whether a login or register call is in flight
//!
//! Both the server and the first client render start logged out so the
//! hydrated markup matches. `ready` flips to `true` after the restore, and
//! route guards wait for it before redirecting.

use std::sync::Arc;

use leptos::prelude::*;

use crate::core::api::{ApiClient, HttpAuthApi};
use crate::core::{AppSessionStore, BrowserTokenStorage, Session, SessionError, User};

#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Latest snapshot of the store
    pub session: RwSignal<Session>,
    /// Set once the stored token has been read on the client
    pub ready: RwSignal<bool>,
    /// Number of login/register calls in flight
    pending: RwSignal<u32>,
    store: StoredValue<Arc<AppSessionStore>>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.session.with(|s| s.is_authenticated())
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.current_user.clone())
    }

    /// Error message from the last failed login or register
    pub fn error(&self) -> Option<String> {
        self.session.with(|s| s.last_error.clone())
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get() > 0
    }

    /// Current bearer token, read without tracking
    pub fn token(&self) -> Option<String> {
        self.store.with_value(|store| store.token())
    }

    /// API client carrying the current token
    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(self.token())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let store = self.store.get_value();
        self.pending.update(|n| *n += 1);
        let result = store.login(email, password).await;
        self.pending.update(|n| *n = n.saturating_sub(1));
        result
    }

    pub async fn register(
        &self,
        email: &str,
        username: &str,
        full_name: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let store = self.store.get_value();
        self.pending.update(|n| *n += 1);
        let result = store.register(email, username, full_name, password).await;
        self.pending.update(|n| *n = n.saturating_sub(1));
        result
    }

    pub fn logout(&self) {
        self.store.with_value(|store| store.logout());
    }

    pub async fn fetch_current_user(&self) -> Result<Option<User>, SessionError> {
        let store = self.store.get_value();
        store.fetch_current_user().await
    }

    pub fn clear_error(&self) {
        self.store.with_value(|store| store.clear_error());
    }
}

/// Build the session store and provide its context to the component tree
pub fn provide_session_context() -> SessionContext {
    let store = Arc::new(AppSessionStore::new(HttpAuthApi, BrowserTokenStorage));
    let session = RwSignal::new(store.snapshot());
    let ready = RwSignal::new(false);

    store.subscribe(move |snapshot| {
        session.try_set(snapshot.clone());
    });

    let ctx = SessionContext {
        session,
        ready,
        pending: RwSignal::new(0),
        store: StoredValue::new(store),
    };

    // Read localStorage only after hydration (client-side only)
    #[cfg(not(feature = "ssr"))]
    {
        Effect::new(move |_| {
            let restored = ctx.store.with_value(|store| store.restore());
            if restored {
                leptos::logging::log!("Restored session from storage");
            }
            ready.set(true);
        });
    }

    provide_context(ctx);
    ctx
}

/// Get the session context from the component tree
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
