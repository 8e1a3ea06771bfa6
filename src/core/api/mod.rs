//! Typed access to the backend REST API

mod auth;
mod client;
mod resources;

pub use auth::HttpAuthApi;
pub use client::ApiClient;
pub use resources::{
    Resource, create, delete, failure_message, item_path, list, payments_path, record_payment,
    update, update_appointment_status,
};

/// Path prefix of every backend endpoint, served same-origin through the
/// server's `/api` forwarder
pub const API_PREFIX: &str = "/api/v1";
