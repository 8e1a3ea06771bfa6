pub mod auth;
pub mod common;
pub mod footer;
pub mod guard;
pub mod header;
pub mod icon;
pub mod pages;
pub mod shell;
pub mod sidebar;

pub use icon::{Icon, icons};
pub use shell::AppShell;
