//! Application pages
//!
//! - Login and register (public)
//! - Dashboard with clinic-wide counts
//! - Patients, doctors, appointments and billing
//! - 404

mod appointments;
mod billing;
mod dashboard;
mod doctors;
mod login;
mod lookup;
mod not_found;
mod patients;
mod register;

pub use appointments::AppointmentsPage;
pub use billing::BillingPage;
pub use dashboard::DashboardPage;
pub use doctors::DoctorsPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use patients::PatientsPage;
pub use register::RegisterPage;
