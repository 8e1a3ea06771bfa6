//! ClinicDesk - clinic back-office dashboard
//!
//! Staff sign in, then manage patients, doctors, appointments and billing
//! against the clinic's REST backend. Built with Leptos and WebAssembly;
//! the server renders the pages and forwards `/api` calls to the backend.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
