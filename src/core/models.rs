//! Wire models for the healthcare back-office API
//!
//! These mirror the JSON shapes owned by the backend. The client keeps cached
//! copies only; all validation of consequence happens server-side.

use chrono::{NaiveDate, NaiveDateTime};
use derive_more::Display;
use serde::{Deserialize, Serialize};

// ============================================================================
// Users and authentication
// ============================================================================

/// Staff role, fixed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[display("Administrator")]
    Admin,
    #[display("Doctor")]
    Doctor,
    #[display("Nurse")]
    Nurse,
    #[display("Receptionist")]
    Receptionist,
}

/// Authenticated staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// First letter of the display name, for the header avatar
    pub fn initial(&self) -> String {
        self.full_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
}

/// Response of both `/auth/login` and `/auth/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

// ============================================================================
// Status lookups
// ============================================================================

/// Visual tone used when rendering a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[display("Scheduled")]
    Scheduled,
    #[display("Completed")]
    Completed,
    #[display("Cancelled")]
    Cancelled,
    #[display("No Show")]
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn tone(&self) -> StatusTone {
        match self {
            AppointmentStatus::Scheduled => StatusTone::Info,
            AppointmentStatus::Completed => StatusTone::Success,
            AppointmentStatus::Cancelled => StatusTone::Danger,
            AppointmentStatus::NoShow => StatusTone::Warning,
        }
    }

    /// Wire value, as used in `<select>` options
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    #[display("Pending")]
    Pending,
    #[display("Paid")]
    Paid,
    #[display("Overdue")]
    Overdue,
    #[display("Cancelled")]
    Cancelled,
}

impl BillStatus {
    pub fn tone(&self) -> StatusTone {
        match self {
            BillStatus::Pending => StatusTone::Warning,
            BillStatus::Paid => StatusTone::Success,
            BillStatus::Overdue => StatusTone::Danger,
            BillStatus::Cancelled => StatusTone::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[display("Pending")]
    Pending,
    #[display("Completed")]
    Completed,
    #[display("Failed")]
    Failed,
    #[display("Refunded")]
    Refunded,
}

impl PaymentStatus {
    pub fn tone(&self) -> StatusTone {
        match self {
            PaymentStatus::Pending => StatusTone::Warning,
            PaymentStatus::Completed => StatusTone::Success,
            PaymentStatus::Failed => StatusTone::Danger,
            PaymentStatus::Refunded => StatusTone::Info,
        }
    }
}

// ============================================================================
// Patients
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body for creating or updating a patient
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PatientPayload {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact_phone: Option<String>,
}

// ============================================================================
// Doctors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub user_id: i64,
    pub specialization: String,
    pub license_number: String,
    pub phone: String,
    pub bio: Option<String>,
    pub office_hours: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Doctor {
    pub fn display_name(&self) -> String {
        match &self.full_name {
            Some(name) if !name.is_empty() => format!("Dr. {}", name),
            _ => format!("Doctor #{}", self.id),
        }
    }
}

/// Creating a doctor also creates the user account behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDoctor {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub specialization: String,
    pub license_number: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_hours: Option<String>,
}

// ============================================================================
// Appointments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: NaiveDateTime,
    pub reason: String,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: NaiveDateTime,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update used by the status dropdown in the appointments table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppointmentStatusUpdate {
    pub status: AppointmentStatus,
}

// ============================================================================
// Billing
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub bill_id: i64,
    pub amount: f64,
    pub payment_method: String,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub payment_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPayment {
    pub amount: f64,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub patient_id: i64,
    pub bill_number: String,
    pub amount: f64,
    #[serde(default)]
    pub tax: f64,
    pub total_amount: f64,
    pub description: Option<String>,
    pub status: BillStatus,
    pub issue_date: NaiveDateTime,
    pub due_date: NaiveDateTime,
    #[serde(default)]
    pub appointment_id: Option<i64>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Bill {
    /// Sum of the payments recorded against this bill. Payments are stored
    /// as pending and stay that way, so only failed or refunded ones are
    /// left out.
    pub fn amount_paid(&self) -> f64 {
        self.payments
            .iter()
            .filter(|p| !matches!(p.status, PaymentStatus::Failed | PaymentStatus::Refunded))
            .fold(0.0, |acc, p| acc + p.amount)
    }

    /// Amount still owed. A paid or cancelled bill owes nothing.
    pub fn balance(&self) -> f64 {
        match self.status {
            BillStatus::Paid | BillStatus::Cancelled => 0.0,
            _ => (self.total_amount - self.amount_paid()).max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBill {
    pub patient_id: i64,
    pub amount: f64,
    pub tax: f64,
    pub description: String,
    pub due_date: NaiveDateTime,
}

/// Dollar amount with two decimals, e.g. `$1234.50`
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Short dollar amount for dashboard cards, e.g. `$125.4K`
pub fn format_money_compact(amount: f64) -> String {
    if amount.abs() >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if amount.abs() >= 1_000.0 {
        format!("${:.1}K", amount / 1_000.0)
    } else {
        format!("${:.0}", amount)
    }
}
