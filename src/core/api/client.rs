//! HTTP client for the backend REST API
//!
//! All requests go through [`ApiClient`], which prefixes the API base path and
//! attaches the bearer token when one is known. Non-success responses become
//! [`ApiError::Status`] carrying the backend's `detail` message.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::API_PREFIX;
use crate::core::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base: String,
    token: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl ApiClient {
    /// Client for calls made on behalf of the given token
    pub fn new(token: Option<String>) -> Self {
        Self::with_base(API_PREFIX, token)
    }

    /// Client without a credential, for login and register
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn with_base(base: &str, token: Option<String>) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Absolute request path for an endpoint such as `/patients/3`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// Value of the `Authorization` header, if a token is set
    pub fn bearer_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

#[cfg(not(feature = "ssr"))]
impl ApiClient {
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        use gloo_net::http::Request;

        let request = self
            .authorize(Request::get(&self.url(path)))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(send(request).await?).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        use gloo_net::http::Request;

        let request = self
            .authorize(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        decode(send(request).await?).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        use gloo_net::http::Request;

        let request = self
            .authorize(Request::put(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        decode(send(request).await?).await
    }

    /// DELETE; the response body is ignored
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        use gloo_net::http::Request;

        let request = self
            .authorize(Request::delete(&self.url(path)))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        send(request).await.map(|_| ())
    }

    fn authorize(
        &self,
        builder: gloo_net::http::RequestBuilder,
    ) -> gloo_net::http::RequestBuilder {
        match self.bearer_header() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }
}

#[cfg(not(feature = "ssr"))]
async fn send(request: gloo_net::http::Request) -> Result<gloo_net::http::Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_response(status, &body);
    leptos::logging::warn!("API request to {} failed: {}", response.url(), err);
    Err(err)
}

#[cfg(not(feature = "ssr"))]
async fn decode<T: DeserializeOwned>(response: gloo_net::http::Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// SSR stubs: the server renders the shell only and never calls the API
#[cfg(feature = "ssr")]
impl ApiClient {
    pub async fn get<T: DeserializeOwned>(&self, _path: &str) -> Result<T, ApiError> {
        Err(ApiError::Unavailable)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        _path: &str,
        _body: &B,
    ) -> Result<T, ApiError> {
        Err(ApiError::Unavailable)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        _path: &str,
        _body: &B,
    ) -> Result<T, ApiError> {
        Err(ApiError::Unavailable)
    }

    pub async fn delete(&self, _path: &str) -> Result<(), ApiError> {
        Err(ApiError::Unavailable)
    }
}
