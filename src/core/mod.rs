//! Core client state and API access for the clinic back office

pub mod api;
#[cfg(feature = "ssr")]
pub mod config;
mod error;
pub mod guard;
mod models;
#[cfg(feature = "ssr")]
pub mod proxy;
mod session;
mod storage;
mod summary;
pub mod validation;
#[cfg(test)]
mod tests;

pub use error::*;
pub use models::*;
pub use session::*;
pub use storage::*;
pub use summary::*;

/// Session store wired to the real backend and the browser's localStorage
pub type AppSessionStore = SessionStore<api::HttpAuthApi, BrowserTokenStorage>;
