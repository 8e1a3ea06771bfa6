//! Name lookups and select options shared by the pages that reference
//! patients and doctors by id

use crate::core::{Doctor, Patient};

pub fn patient_name(patients: &[Patient], id: i64) -> String {
    patients
        .iter()
        .find(|p| p.id == id)
        .map(Patient::full_name)
        .unwrap_or_else(|| format!("Patient #{}", id))
}

pub fn doctor_name(doctors: &[Doctor], id: i64) -> String {
    doctors
        .iter()
        .find(|d| d.id == id)
        .map(Doctor::display_name)
        .unwrap_or_else(|| format!("Doctor #{}", id))
}

/// `<select>` options with an empty placeholder first
pub fn patient_options(patients: &[Patient]) -> Vec<(String, String)> {
    std::iter::once((String::new(), "Select patient".to_string()))
        .chain(patients.iter().map(|p| (p.id.to_string(), p.full_name())))
        .collect()
}

pub fn doctor_options(doctors: &[Doctor]) -> Vec<(String, String)> {
    std::iter::once((String::new(), "Select doctor".to_string()))
        .chain(doctors.iter().map(|d| {
            (
                d.id.to_string(),
                format!("{} ({})", d.display_name(), d.specialization),
            )
        }))
        .collect()
}
