//! Common reusable UI components

pub mod badge;
pub mod form;
pub mod message;
pub mod modal;
pub mod page;
pub mod spinner;

pub use badge::StatusBadge;
pub use form::{FormField, SelectField, TextAreaField, field_error};
pub use message::{ErrorMessage, SuccessMessage};
pub use modal::{BaseModal, ConfirmDialog};
pub use page::{EmptyState, PageHeader, StatCard};
pub use spinner::{LoadingScreen, LoadingSpinner};
