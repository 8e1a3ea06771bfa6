//! Session store: who is logged in, and with which bearer token
//!
//! The store is constructed explicitly and handed to whoever needs it. It is
//! generic over the network (`AuthApi`) and durable storage (`TokenStorage`)
//! so every test can build an isolated instance.
//!
//! Every action takes a sequence number when it starts. A response is applied
//! only if its number is newer than the last applied one, so when two actions
//! overlap the one started last wins, whichever resolves first. `logout` takes
//! a number too, which discards any login or refresh still in flight.
//!
//! None of this is a security boundary: the backend authorizes every request.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::{ApiError, SessionError};
use super::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use super::storage::TokenStorage;

/// Network side of authentication
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;
    async fn current_user(&self, token: &str) -> Result<User, ApiError>;
}

/// Client-held record of the current identity and credential.
///
/// `current_user` is never set while `token` is absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub current_user: Option<User>,
    pub last_error: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

struct StoreState {
    session: Session,
    last_applied: u64,
}

type Listener = Box<dyn Fn(&Session) + Send + Sync>;

pub struct SessionStore<A, S> {
    api: A,
    storage: S,
    state: Mutex<StoreState>,
    next_seq: AtomicU64,
    listeners: Mutex<Vec<Listener>>,
}

impl<A: AuthApi, S: TokenStorage> SessionStore<A, S> {
    /// Create an empty store. Call [`SessionStore::restore`] to pick up a
    /// token left in durable storage.
    pub fn new(api: A, storage: S) -> Self {
        Self {
            api,
            storage,
            state: Mutex::new(StoreState {
                session: Session::default(),
                last_applied: 0,
            }),
            next_seq: AtomicU64::new(0),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Current state, cloned
    pub fn snapshot(&self) -> Session {
        self.with_state(|state| state.session.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.with_state(|state| state.session.is_authenticated())
    }

    pub fn token(&self) -> Option<String> {
        self.with_state(|state| state.session.token.clone())
    }

    pub fn current_user(&self) -> Option<User> {
        self.with_state(|state| state.session.current_user.clone())
    }

    /// Register a callback invoked with the new state after every change
    pub fn subscribe(&self, listener: impl Fn(&Session) + Send + Sync + 'static) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(Box::new(listener));
        }
    }

    /// Hydrate from durable storage. The cached user stays empty until
    /// [`SessionStore::fetch_current_user`] runs.
    pub fn restore(&self) -> bool {
        let Some(token) = self.storage.load() else {
            return false;
        };
        let seq = self.begin();
        self.commit(seq, |session| {
            *session = Session {
                token: Some(token),
                current_user: None,
                last_error: None,
            };
        })
    }

    /// Exchange credentials for a session
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let seq = self.begin();
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = self.api.login(&request).await;
        self.finish_auth(seq, result, "Login failed")
    }

    /// Create an account; the returned token and user count as a login
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        full_name: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let seq = self.begin();
        let request = RegisterRequest {
            email: email.to_string(),
            username: username.to_string(),
            full_name: full_name.to_string(),
            password: password.to_string(),
        };
        let result = self.api.register(&request).await;
        self.finish_auth(seq, result, "Registration failed")
    }

    /// Drop the session locally. Never fails and never touches the network.
    pub fn logout(&self) {
        let seq = self.begin();
        self.commit(seq, |session| *session = Session::default());
        self.storage.clear();
    }

    /// Load the profile behind the stored token if it is not cached yet.
    ///
    /// Without a token this does nothing. Any failure clears the whole
    /// session, so a dead token is never treated as a valid one.
    pub async fn fetch_current_user(&self) -> Result<Option<User>, SessionError> {
        let (token, cached) = self.with_state(|state| {
            (
                state.session.token.clone(),
                state.session.current_user.clone(),
            )
        });
        let Some(token) = token else {
            return Ok(None);
        };
        if cached.is_some() {
            return Ok(cached);
        }

        let seq = self.begin();
        match self.api.current_user(&token).await {
            Ok(user) => {
                let applied = self.commit(seq, |session| {
                    session.current_user = Some(user.clone());
                });
                if applied {
                    Ok(Some(user))
                } else {
                    Err(SessionError::Superseded)
                }
            }
            Err(err) => {
                let applied = self.commit(seq, |session| *session = Session::default());
                if !applied {
                    return Err(SessionError::Superseded);
                }
                self.storage.clear();
                leptos::logging::warn!("Stored session rejected, signing out: {}", err);
                Err(SessionError::Api(err))
            }
        }
    }

    /// Dismiss the last error message
    pub fn clear_error(&self) {
        let snapshot = match self.state.lock() {
            Ok(mut state) => {
                state.session.last_error = None;
                state.session.clone()
            }
            Err(_) => return,
        };
        self.notify(&snapshot);
    }

    fn finish_auth(
        &self,
        seq: u64,
        result: Result<AuthResponse, ApiError>,
        fallback: &str,
    ) -> Result<User, SessionError> {
        match result {
            Ok(AuthResponse {
                access_token, user, ..
            }) => {
                let applied = self.commit(seq, |session| {
                    self.storage.store(&access_token);
                    *session = Session {
                        token: Some(access_token.clone()),
                        current_user: Some(user.clone()),
                        last_error: None,
                    };
                });
                if applied {
                    Ok(user)
                } else {
                    leptos::logging::log!("Discarding superseded auth response");
                    Err(SessionError::Superseded)
                }
            }
            Err(err) => {
                let message = err.message_or(fallback);
                let applied = self.commit(seq, |session| session.last_error = Some(message));
                if applied {
                    Err(SessionError::Api(err))
                } else {
                    Err(SessionError::Superseded)
                }
            }
        }
    }

    fn begin(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply `update` if `seq` is newer than the last applied action, then
    /// notify listeners. Returns whether the update was applied.
    fn commit(&self, seq: u64, update: impl FnOnce(&mut Session)) -> bool {
        let snapshot = {
            let Ok(mut state) = self.state.lock() else {
                return false;
            };
            if seq <= state.last_applied {
                return false;
            }
            state.last_applied = seq;
            update(&mut state.session);
            state.session.clone()
        };
        self.notify(&snapshot);
        true
    }

    fn notify(&self, snapshot: &Session) {
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener(snapshot);
            }
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        match self.state.lock() {
            Ok(state) => f(&state),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}
