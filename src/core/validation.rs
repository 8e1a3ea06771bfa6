//! Shallow form validation, mirroring the checks the backend performs
//!
//! Each form struct holds the raw strings typed by the user and turns them
//! into a typed request body, or into a set of per-field errors shown inline.
//! Nothing here replaces server-side validation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::models::{
    LoginRequest, NewAppointment, NewBill, NewDoctor, NewPayment, Patient, PatientPayload,
    RegisterRequest,
};

/// Minimum password length accepted by the login and register forms
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum username length accepted by the register form
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field is empty
    Required,
    /// Not shaped like an email address
    InvalidEmail,
    /// Shorter than the minimum length
    TooShort { min: usize },
    /// Confirmation does not match
    Mismatch,
    /// Not an integer id
    NotANumber,
    /// Amount is zero, negative or not a number
    NotPositive,
    /// Amount is negative or not a number
    Negative,
    /// Not a `YYYY-MM-DD` date
    InvalidDate,
    /// Not an `HH:MM` time
    InvalidTime,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Required => write!(f, "This field is required"),
            ValidationError::InvalidEmail => write!(f, "Enter a valid email address"),
            ValidationError::TooShort { min } => {
                write!(f, "Must be at least {} characters", min)
            }
            ValidationError::Mismatch => write!(f, "Passwords must match"),
            ValidationError::NotANumber => write!(f, "Must be a whole number"),
            ValidationError::NotPositive => write!(f, "Must be greater than zero"),
            ValidationError::Negative => write!(f, "Must be zero or more"),
            ValidationError::InvalidDate => write!(f, "Enter a valid date"),
            ValidationError::InvalidTime => write!(f, "Enter a valid time"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors collected while validating a form, keyed by field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, ValidationError)>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Error for `field`, if it failed
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, err)| err)
    }

    /// Message for `field`, ready to render under the input
    pub fn message(&self, field: &str) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.iter().map(|(name, _)| *name)
    }

    /// Record the outcome of one check, keeping the value on success
    fn check<T>(&mut self, field: &'static str, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push((field, err));
                None
            }
        }
    }
}

// ============================================================================
// Field rules
// ============================================================================

pub fn required(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Required and shaped like `local@domain.tld`
pub fn email(value: &str) -> Result<String, ValidationError> {
    let value = required(value)?;
    let Some((local, domain)) = value.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
    if local.is_empty() || domain.contains('@') || value.contains(char::is_whitespace) || !domain_ok
    {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(value)
}

/// Optional field that must be an email address when filled in
pub fn optional_email(value: &str) -> Result<Option<String>, ValidationError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        email(value).map(Some)
    }
}

/// Required with at least `min` characters. Passwords are not trimmed.
pub fn min_length(value: &str, min: usize) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    if value.chars().count() < min {
        return Err(ValidationError::TooShort { min });
    }
    Ok(value.to_string())
}

/// Required positive integer id
pub fn numeric_id(value: &str) -> Result<i64, ValidationError> {
    let value = required(value)?;
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::NotANumber),
    }
}

/// Required amount strictly greater than zero
pub fn positive_amount(value: &str) -> Result<f64, ValidationError> {
    let value = required(value)?;
    match value.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ValidationError::NotPositive),
    }
}

/// Amount of zero or more; an empty field counts as zero
pub fn non_negative_amount(value: &str) -> Result<f64, ValidationError> {
    if value.trim().is_empty() {
        return Ok(0.0);
    }
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(ValidationError::Negative),
    }
}

/// Required date from an `<input type="date">`
pub fn date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = required(value)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}

/// Required time from an `<input type="time">`, with or without seconds
pub fn time(value: &str) -> Result<NaiveTime, ValidationError> {
    let value = required(value)?;
    NaiveTime::parse_from_str(&value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&value, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidTime)
}

/// Trimmed value, or `None` when blank
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ============================================================================
// Forms
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        let email = errors.check("email", email(&self.email));
        let password = errors.check("password", min_length(&self.password, MIN_PASSWORD_LENGTH));

        let (Some(email), Some(password)) = (email, password) else {
            return Err(errors);
        };
        Ok(LoginRequest { email, password })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::default();
        let email = errors.check("email", email(&self.email));
        let username = errors.check(
            "username",
            min_length(self.username.trim(), MIN_USERNAME_LENGTH),
        );
        let full_name = errors.check("full_name", required(&self.full_name));
        let password = errors.check("password", min_length(&self.password, MIN_PASSWORD_LENGTH));
        let confirmed = if self.confirm_password.is_empty() {
            Err(ValidationError::Required)
        } else if self.confirm_password != self.password {
            Err(ValidationError::Mismatch)
        } else {
            Ok(())
        };
        let confirmed = errors.check("confirm_password", confirmed);

        let (Some(email), Some(username), Some(full_name), Some(password), Some(())) =
            (email, username, full_name, password, confirmed)
        else {
            return Err(errors);
        };
        Ok(RegisterRequest {
            email,
            username,
            full_name,
            password,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub blood_type: String,
    pub allergies: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
}

impl PatientForm {
    /// Prefill the edit dialog from an existing record
    pub fn from_patient(patient: &Patient) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            email: text(&patient.email),
            phone: text(&patient.phone),
            date_of_birth: patient.date_of_birth.format("%Y-%m-%d").to_string(),
            gender: patient.gender.clone(),
            address: text(&patient.address),
            city: text(&patient.city),
            state: text(&patient.state),
            zip_code: text(&patient.zip_code),
            blood_type: text(&patient.blood_type),
            allergies: text(&patient.allergies),
            emergency_contact_name: text(&patient.emergency_contact_name),
            emergency_contact_phone: text(&patient.emergency_contact_phone),
        }
    }

    pub fn validate(&self) -> Result<PatientPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        let first_name = errors.check("first_name", required(&self.first_name));
        let last_name = errors.check("last_name", required(&self.last_name));
        let email = errors.check("email", optional_email(&self.email));
        let date_of_birth = errors.check("date_of_birth", date(&self.date_of_birth));
        let gender = errors.check("gender", required(&self.gender));

        let (Some(first_name), Some(last_name), Some(email), Some(date_of_birth), Some(gender)) =
            (first_name, last_name, email, date_of_birth, gender)
        else {
            return Err(errors);
        };
        Ok(PatientPayload {
            first_name,
            last_name,
            email,
            phone: optional(&self.phone),
            date_of_birth: Some(date_of_birth),
            gender,
            address: optional(&self.address),
            city: optional(&self.city),
            state: optional(&self.state),
            zip_code: optional(&self.zip_code),
            blood_type: optional(&self.blood_type),
            allergies: optional(&self.allergies),
            emergency_contact_name: optional(&self.emergency_contact_name),
            emergency_contact_phone: optional(&self.emergency_contact_phone),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoctorForm {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub specialization: String,
    pub license_number: String,
    pub phone: String,
    pub office_hours: String,
    pub bio: String,
}

impl DoctorForm {
    pub fn validate(&self) -> Result<NewDoctor, FieldErrors> {
        let mut errors = FieldErrors::default();
        let email = errors.check("email", email(&self.email));
        let username = errors.check(
            "username",
            min_length(self.username.trim(), MIN_USERNAME_LENGTH),
        );
        let full_name = errors.check("full_name", required(&self.full_name));
        let password = errors.check("password", min_length(&self.password, MIN_PASSWORD_LENGTH));
        let specialization = errors.check("specialization", required(&self.specialization));
        let license_number = errors.check("license_number", required(&self.license_number));
        let phone = errors.check("phone", required(&self.phone));
        let office_hours = errors.check("office_hours", required(&self.office_hours));

        let (
            Some(email),
            Some(username),
            Some(full_name),
            Some(password),
            Some(specialization),
            Some(license_number),
            Some(phone),
            Some(office_hours),
        ) = (
            email,
            username,
            full_name,
            password,
            specialization,
            license_number,
            phone,
            office_hours,
        )
        else {
            return Err(errors);
        };
        Ok(NewDoctor {
            email,
            username,
            full_name,
            password,
            specialization,
            license_number,
            phone,
            bio: optional(&self.bio),
            office_hours: Some(office_hours),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentForm {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub reason: String,
    pub notes: String,
}

impl AppointmentForm {
    pub fn validate(&self) -> Result<NewAppointment, FieldErrors> {
        let mut errors = FieldErrors::default();
        let patient_id = errors.check("patient_id", numeric_id(&self.patient_id));
        let doctor_id = errors.check("doctor_id", numeric_id(&self.doctor_id));
        let day = errors.check("date", date(&self.date));
        let at = errors.check("time", time(&self.time));
        let reason = errors.check("reason", required(&self.reason));

        let (Some(patient_id), Some(doctor_id), Some(day), Some(at), Some(reason)) =
            (patient_id, doctor_id, day, at, reason)
        else {
            return Err(errors);
        };
        Ok(NewAppointment {
            patient_id,
            doctor_id,
            appointment_date: NaiveDateTime::new(day, at),
            reason,
            notes: optional(&self.notes),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillForm {
    pub patient_id: String,
    pub amount: String,
    pub tax: String,
    pub description: String,
    pub due_date: String,
}

impl BillForm {
    pub fn validate(&self) -> Result<NewBill, FieldErrors> {
        let mut errors = FieldErrors::default();
        let patient_id = errors.check("patient_id", numeric_id(&self.patient_id));
        let amount = errors.check("amount", positive_amount(&self.amount));
        let tax = errors.check("tax", non_negative_amount(&self.tax));
        let description = errors.check("description", required(&self.description));
        let due_date = errors.check("due_date", date(&self.due_date));

        let (Some(patient_id), Some(amount), Some(tax), Some(description), Some(due_date)) =
            (patient_id, amount, tax, description, due_date)
        else {
            return Err(errors);
        };
        Ok(NewBill {
            patient_id,
            amount,
            tax,
            description,
            due_date: due_date.and_time(NaiveTime::MIN),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentForm {
    pub amount: String,
    pub payment_method: String,
    pub notes: String,
}

impl PaymentForm {
    pub fn validate(&self) -> Result<NewPayment, FieldErrors> {
        let mut errors = FieldErrors::default();
        let amount = errors.check("amount", positive_amount(&self.amount));
        let payment_method = errors.check("payment_method", required(&self.payment_method));

        let (Some(amount), Some(payment_method)) = (amount, payment_method) else {
            return Err(errors);
        };
        Ok(NewPayment {
            amount,
            payment_method,
            notes: optional(&self.notes),
        })
    }
}
