#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::pin::pin;
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;
    use futures::channel::oneshot;
    use futures::poll;

    use crate::core::{
        ApiError, AuthApi, AuthResponse, LoginRequest, MemoryTokenStorage, RegisterRequest, Role,
        SessionError, SessionStore, TokenStorage, User,
    };

    // ========================================================================
    // Fake backend
    // ========================================================================

    type Reply<T> = oneshot::Receiver<Result<T, ApiError>>;

    #[derive(Default)]
    struct FakeInner {
        login: Mutex<VecDeque<Reply<AuthResponse>>>,
        register: Mutex<VecDeque<Reply<AuthResponse>>>,
        me: Mutex<VecDeque<Reply<User>>>,
        calls: Mutex<Vec<String>>,
    }

    /// Scripted `AuthApi`: each call consumes the next queued reply
    #[derive(Clone, Default)]
    struct FakeAuthApi {
        inner: Arc<FakeInner>,
    }

    type Pending<T> = oneshot::Sender<Result<T, ApiError>>;

    impl FakeAuthApi {
        fn push<T>(queue: &Mutex<VecDeque<Reply<T>>>) -> Pending<T> {
            let (tx, rx) = oneshot::channel();
            queue.lock().unwrap().push_back(rx);
            tx
        }

        fn ready<T>(queue: &Mutex<VecDeque<Reply<T>>>, reply: Result<T, ApiError>) {
            let tx = Self::push(queue);
            tx.send(reply).ok();
        }

        fn login_replies(&self, reply: Result<AuthResponse, ApiError>) -> &Self {
            Self::ready(&self.inner.login, reply);
            self
        }

        fn defer_login(&self) -> Pending<AuthResponse> {
            Self::push(&self.inner.login)
        }

        fn register_replies(&self, reply: Result<AuthResponse, ApiError>) -> &Self {
            Self::ready(&self.inner.register, reply);
            self
        }

        fn me_replies(&self, reply: Result<User, ApiError>) -> &Self {
            Self::ready(&self.inner.me, reply);
            self
        }

        fn defer_me(&self) -> Pending<User> {
            Self::push(&self.inner.me)
        }

        fn calls(&self) -> Vec<String> {
            self.inner.calls.lock().unwrap().clone()
        }

        async fn answer<T>(&self, queue: &Mutex<VecDeque<Reply<T>>>, call: String) -> Result<T, ApiError> {
            self.inner.calls.lock().unwrap().push(call.clone());
            let reply = queue.lock().unwrap().pop_front();
            match reply {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Network("reply dropped".to_string()))),
                None => panic!("unexpected call: {}", call),
            }
        }
    }

    impl AuthApi for FakeAuthApi {
        async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
            self.answer(&self.inner.login, format!("login {}", request.email))
                .await
        }

        async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
            self.answer(&self.inner.register, format!("register {}", request.email))
                .await
        }

        async fn current_user(&self, token: &str) -> Result<User, ApiError> {
            self.answer(&self.inner.me, format!("me {}", token)).await
        }
    }

    fn user(id: i64, full_name: &str, role: Role) -> User {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        User {
            id,
            email: format!("user{}@clinic.test", id),
            username: format!("user{}", id),
            full_name: full_name.to_string(),
            role,
            is_active: true,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn auth_ok(token: &str, user: User) -> Result<AuthResponse, ApiError> {
        Ok(AuthResponse {
            access_token: token.to_string(),
            token_type: "bearer".to_string(),
            user,
        })
    }

    fn rejected(status: u16, detail: &str) -> ApiError {
        ApiError::Status {
            status,
            detail: Some(detail.to_string()),
        }
    }

    fn store_with(
        api: &FakeAuthApi,
        storage: &MemoryTokenStorage,
    ) -> SessionStore<FakeAuthApi, MemoryTokenStorage> {
        SessionStore::new(api.clone(), storage.clone())
    }

    // ========================================================================
    // Login / register
    // ========================================================================

    #[tokio::test]
    async fn test_login_success_populates_session() {
        let api = FakeAuthApi::default();
        api.login_replies(auth_ok("tok123", user(1, "Jane Doe", Role::Doctor)));
        let storage = MemoryTokenStorage::new();
        let store = store_with(&api, &storage);

        let result = store.login("a@b.com", "secret1").await;

        assert_eq!(result.unwrap().full_name, "Jane Doe");
        let session = store.snapshot();
        assert_eq!(session.token.as_deref(), Some("tok123"));
        assert_eq!(
            session.current_user.as_ref().map(|u| u.full_name.as_str()),
            Some("Jane Doe")
        );
        assert!(session.is_authenticated());
        assert!(session.last_error.is_none());
        assert_eq!(storage.load(), Some("tok123".to_string()));
        assert_eq!(api.calls(), vec!["login a@b.com"]);
    }

    #[tokio::test]
    async fn test_login_failure_from_logged_out() {
        let api = FakeAuthApi::default();
        api.login_replies(Err(rejected(401, "Incorrect email or password")));
        let storage = MemoryTokenStorage::new();
        let store = store_with(&api, &storage);

        let result = store.login("a@b.com", "wrong-pass").await;

        assert!(matches!(result, Err(SessionError::Api(_))));
        let session = store.snapshot();
        assert!(!session.is_authenticated());
        assert!(session.current_user.is_none());
        assert_eq!(
            session.last_error.as_deref(),
            Some("Incorrect email or password")
        );
        assert_eq!(storage.load(), None);
    }

    #[tokio::test]
    async fn test_login_failure_keeps_existing_session() {
        let api = FakeAuthApi::default();
        api.login_replies(auth_ok("tok-1", user(1, "Jane Doe", Role::Doctor)))
            .login_replies(Err(ApiError::Network("offline".to_string())));
        let storage = MemoryTokenStorage::new();
        let store = store_with(&api, &storage);

        store.login("a@b.com", "secret1").await.unwrap();
        let err = store.login("other@b.com", "secret2").await.unwrap_err();

        assert_eq!(err, SessionError::Api(ApiError::Network("offline".to_string())));
        let session = store.snapshot();
        assert_eq!(session.token.as_deref(), Some("tok-1"));
        assert_eq!(session.current_user.unwrap().id, 1);
        assert_eq!(session.last_error.as_deref(), Some("Login failed"));
        assert_eq!(storage.load(), Some("tok-1".to_string()));
    }

    #[tokio::test]
    async fn test_sequential_logins_keep_last_success() {
        let api = FakeAuthApi::default();
        api.login_replies(auth_ok("tok-a", user(1, "Ann", Role::Nurse)))
            .login_replies(auth_ok("tok-b", user(2, "Bob", Role::Admin)))
            .login_replies(Err(rejected(401, "Incorrect email or password")));
        let store = store_with(&api, &MemoryTokenStorage::new());

        store.login("ann@b.com", "secret1").await.unwrap();
        store.login("bob@b.com", "secret1").await.unwrap();
        assert_eq!(store.current_user().unwrap().full_name, "Bob");

        store.login("eve@b.com", "secret1").await.unwrap_err();
        assert_eq!(store.token().as_deref(), Some("tok-b"));
        assert_eq!(store.current_user().unwrap().role, Role::Admin);
    }

    #[tokio::test]
    async fn test_successful_login_clears_previous_error() {
        let api = FakeAuthApi::default();
        api.login_replies(Err(rejected(401, "Incorrect email or password")))
            .login_replies(auth_ok("tok123", user(1, "Jane Doe", Role::Doctor)));
        let store = store_with(&api, &MemoryTokenStorage::new());

        store.login("a@b.com", "typo").await.unwrap_err();
        assert!(store.snapshot().last_error.is_some());

        store.login("a@b.com", "secret1").await.unwrap();
        assert!(store.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn test_register_is_implicit_login() {
        let api = FakeAuthApi::default();
        api.register_replies(auth_ok("tok-new", user(5, "Rita Receptionist", Role::Receptionist)));
        let storage = MemoryTokenStorage::new();
        let store = store_with(&api, &storage);

        let user = store
            .register("rita@b.com", "rita", "Rita Receptionist", "secret1")
            .await
            .unwrap();

        assert_eq!(user.role, Role::Receptionist);
        assert!(store.is_authenticated());
        assert_eq!(storage.load(), Some("tok-new".to_string()));
        assert_eq!(api.calls(), vec!["register rita@b.com"]);
    }

    #[tokio::test]
    async fn test_register_failure_messages() {
        let api = FakeAuthApi::default();
        api.register_replies(Err(rejected(400, "Email already registered")))
            .register_replies(Err(ApiError::Decode("bad json".to_string())));
        let store = store_with(&api, &MemoryTokenStorage::new());

        store
            .register("dup@b.com", "dup", "Dup", "secret1")
            .await
            .unwrap_err();
        assert_eq!(
            store.snapshot().last_error.as_deref(),
            Some("Email already registered")
        );

        store
            .register("x@b.com", "xxx", "X", "secret1")
            .await
            .unwrap_err();
        assert_eq!(
            store.snapshot().last_error.as_deref(),
            Some("Registration failed")
        );
        assert!(!store.is_authenticated());
    }

    // ========================================================================
    // Logout and restore
    // ========================================================================

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let api = FakeAuthApi::default();
        api.login_replies(auth_ok("tok123", user(1, "Jane Doe", Role::Doctor)));
        let storage = MemoryTokenStorage::new();
        let store = store_with(&api, &storage);
        store.login("a@b.com", "secret1").await.unwrap();

        store.logout();

        let session = store.snapshot();
        assert!(session.token.is_none());
        assert!(session.current_user.is_none());
        assert!(!session.is_authenticated());
        assert_eq!(storage.load(), None);
    }

    #[test]
    fn test_logout_when_logged_out_is_harmless() {
        let api = FakeAuthApi::default();
        let store = store_with(&api, &MemoryTokenStorage::new());

        store.logout();
        store.logout();

        assert!(!store.is_authenticated());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_restart_restores_token_from_storage() {
        let api = FakeAuthApi::default();
        api.login_replies(auth_ok("tok123", user(1, "Jane Doe", Role::Doctor)))
            .me_replies(Ok(user(1, "Jane Doe", Role::Doctor)));
        let storage = MemoryTokenStorage::new();
        store_with(&api, &storage)
            .login("a@b.com", "secret1")
            .await
            .unwrap();

        // Simulated page reload: fresh store over the same storage
        let reloaded = store_with(&api, &storage);
        assert!(!reloaded.is_authenticated());
        assert!(reloaded.restore());

        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token().as_deref(), Some("tok123"));
        assert!(reloaded.current_user().is_none());

        let fetched = reloaded.fetch_current_user().await.unwrap();
        assert_eq!(fetched.unwrap().full_name, "Jane Doe");
        assert_eq!(api.calls(), vec!["login a@b.com", "me tok123"]);
    }

    #[test]
    fn test_restore_without_stored_token() {
        let store = store_with(&FakeAuthApi::default(), &MemoryTokenStorage::new());

        assert!(!store.restore());
        assert!(!store.is_authenticated());
    }

    // ========================================================================
    // Fetch current user
    // ========================================================================

    #[tokio::test]
    async fn test_fetch_without_token_makes_no_call() {
        let api = FakeAuthApi::default();
        let store = store_with(&api, &MemoryTokenStorage::new());
        let before = store.snapshot();

        let result = store.fetch_current_user().await;

        assert_eq!(result, Ok(None));
        assert!(api.calls().is_empty());
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_fetch_auth_failure_clears_session() {
        let api = FakeAuthApi::default();
        api.me_replies(Err(rejected(401, "Could not validate credentials")));
        let storage = MemoryTokenStorage::with_token("expired");
        let store = store_with(&api, &storage);
        store.restore();

        let result = store.fetch_current_user().await;

        assert!(matches!(result, Err(SessionError::Api(ref e)) if e.is_auth_failure()));
        assert!(store.token().is_none());
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        assert_eq!(storage.load(), None);
        // Forced logout is silent
        assert!(store.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_network_failure_also_clears_session() {
        let api = FakeAuthApi::default();
        api.me_replies(Err(ApiError::Network("offline".to_string())));
        let store = store_with(&api, &MemoryTokenStorage::with_token("tok123"));
        store.restore();

        store.fetch_current_user().await.unwrap_err();

        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_fetch_is_idempotent_once_cached() {
        let api = FakeAuthApi::default();
        api.me_replies(Ok(user(3, "Nina Nurse", Role::Nurse)));
        let store = store_with(&api, &MemoryTokenStorage::with_token("tok123"));
        store.restore();

        let first = store.fetch_current_user().await.unwrap();
        let second = store.fetch_current_user().await.unwrap();
        let third = store.fetch_current_user().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second, third);
        assert_eq!(api.calls(), vec!["me tok123"]);
    }

    // ========================================================================
    // Overlapping actions
    // ========================================================================

    #[tokio::test]
    async fn test_overlapping_logins_later_call_wins_when_resolving_first() {
        let api = FakeAuthApi::default();
        let first_reply = api.defer_login();
        let second_reply = api.defer_login();
        let storage = MemoryTokenStorage::new();
        let store = store_with(&api, &storage);

        let mut first = pin!(store.login("old@b.com", "secret1"));
        let mut second = pin!(store.login("new@b.com", "secret2"));
        assert!(poll!(first.as_mut()).is_pending());
        assert!(poll!(second.as_mut()).is_pending());

        second_reply
            .send(auth_ok("tok-new", user(2, "New User", Role::Admin)))
            .unwrap();
        assert!(second.as_mut().await.is_ok());

        first_reply
            .send(auth_ok("tok-old", user(1, "Old User", Role::Nurse)))
            .unwrap();
        assert_eq!(first.as_mut().await, Err(SessionError::Superseded));

        assert_eq!(store.token().as_deref(), Some("tok-new"));
        assert_eq!(store.current_user().unwrap().full_name, "New User");
        assert_eq!(storage.load(), Some("tok-new".to_string()));
    }

    #[tokio::test]
    async fn test_overlapping_logins_later_call_wins_when_resolving_last() {
        let api = FakeAuthApi::default();
        let first_reply = api.defer_login();
        let second_reply = api.defer_login();
        let store = store_with(&api, &MemoryTokenStorage::new());

        let mut first = pin!(store.login("old@b.com", "secret1"));
        let mut second = pin!(store.login("new@b.com", "secret2"));
        assert!(poll!(first.as_mut()).is_pending());
        assert!(poll!(second.as_mut()).is_pending());

        first_reply
            .send(auth_ok("tok-old", user(1, "Old User", Role::Nurse)))
            .unwrap();
        assert!(first.as_mut().await.is_ok());
        assert_eq!(store.token().as_deref(), Some("tok-old"));

        second_reply
            .send(auth_ok("tok-new", user(2, "New User", Role::Admin)))
            .unwrap();
        assert!(second.as_mut().await.is_ok());
        assert_eq!(store.token().as_deref(), Some("tok-new"));
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_overwrite_newer_session() {
        let api = FakeAuthApi::default();
        let first_reply = api.defer_login();
        let second_reply = api.defer_login();
        let store = store_with(&api, &MemoryTokenStorage::new());

        let mut first = pin!(store.login("typo@b.com", "secret1"));
        let mut second = pin!(store.login("a@b.com", "secret1"));
        assert!(poll!(first.as_mut()).is_pending());
        assert!(poll!(second.as_mut()).is_pending());

        second_reply
            .send(auth_ok("tok123", user(1, "Jane Doe", Role::Doctor)))
            .unwrap();
        second.as_mut().await.unwrap();
        first_reply
            .send(Err(rejected(401, "Incorrect email or password")))
            .unwrap();
        assert_eq!(first.as_mut().await, Err(SessionError::Superseded));

        assert!(store.is_authenticated());
        assert!(store.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn test_logout_discards_login_in_flight() {
        let api = FakeAuthApi::default();
        let reply = api.defer_login();
        let storage = MemoryTokenStorage::new();
        let store = store_with(&api, &storage);

        let mut login = pin!(store.login("a@b.com", "secret1"));
        assert!(poll!(login.as_mut()).is_pending());

        store.logout();
        reply
            .send(auth_ok("tok123", user(1, "Jane Doe", Role::Doctor)))
            .unwrap();

        assert_eq!(login.as_mut().await, Err(SessionError::Superseded));
        assert!(!store.is_authenticated());
        assert_eq!(storage.load(), None);
    }

    #[tokio::test]
    async fn test_logout_discards_refresh_in_flight() {
        let api = FakeAuthApi::default();
        let reply = api.defer_me();
        let store = store_with(&api, &MemoryTokenStorage::with_token("tok123"));
        store.restore();

        let mut fetch = pin!(store.fetch_current_user());
        assert!(poll!(fetch.as_mut()).is_pending());

        store.logout();
        reply.send(Ok(user(1, "Jane Doe", Role::Doctor))).unwrap();

        assert_eq!(fetch.as_mut().await, Err(SessionError::Superseded));
        assert!(store.current_user().is_none());
        assert!(!store.is_authenticated());
    }

    // ========================================================================
    // Listeners and errors
    // ========================================================================

    #[tokio::test]
    async fn test_listeners_see_every_change() {
        let api = FakeAuthApi::default();
        api.login_replies(auth_ok("tok123", user(1, "Jane Doe", Role::Doctor)));
        let store = store_with(&api, &MemoryTokenStorage::new());

        let seen = Arc::new(Mutex::new(Vec::<bool>::new()));
        let sink = seen.clone();
        store.subscribe(move |session| sink.lock().unwrap().push(session.is_authenticated()));

        store.login("a@b.com", "secret1").await.unwrap();
        store.logout();

        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[tokio::test]
    async fn test_clear_error() {
        let api = FakeAuthApi::default();
        api.login_replies(Err(rejected(401, "Incorrect email or password")));
        let store = store_with(&api, &MemoryTokenStorage::new());

        store.login("a@b.com", "nope-nope").await.unwrap_err();
        store.clear_error();

        assert!(store.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn test_clear_error_does_not_cancel_pending_login() {
        let api = FakeAuthApi::default();
        let reply = api.defer_login();
        let store = store_with(&api, &MemoryTokenStorage::new());

        let mut login = pin!(store.login("a@b.com", "secret1"));
        assert!(poll!(login.as_mut()).is_pending());

        store.clear_error();
        reply
            .send(auth_ok("tok123", user(1, "Jane Doe", Role::Doctor)))
            .unwrap();

        assert!(login.as_mut().await.is_ok());
        assert!(store.is_authenticated());
    }
}
