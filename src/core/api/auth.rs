//! Authentication endpoints

use super::ApiClient;
use crate::core::error::ApiError;
use crate::core::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::core::session::AuthApi;

/// [`AuthApi`] over HTTP
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpAuthApi;

impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        ApiClient::anonymous().post("/auth/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        ApiClient::anonymous().post("/auth/register", request).await
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        ApiClient::new(Some(token.to_string()))
            .get("/auth/me")
            .await
    }
}
