//! CRUD endpoints for the back-office resources

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ApiClient;
use crate::core::error::ApiError;
use crate::core::models::{
    Appointment, AppointmentStatus, AppointmentStatusUpdate, Bill, Doctor, NewAppointment,
    NewBill, NewDoctor, NewPayment, Patient, PatientPayload, Payment,
};

/// A record type with a REST collection behind it
pub trait Resource: DeserializeOwned + Clone + 'static {
    /// Collection path below the API prefix
    const PATH: &'static str;
    /// Plural noun used in error messages
    const LABEL: &'static str;
    /// Body accepted by create (and update, where supported)
    type Payload: Serialize;

    fn id(&self) -> i64;
}

impl Resource for Patient {
    const PATH: &'static str = "/patients";
    const LABEL: &'static str = "patients";
    type Payload = PatientPayload;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Doctor {
    const PATH: &'static str = "/doctors";
    const LABEL: &'static str = "doctors";
    type Payload = NewDoctor;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Appointment {
    const PATH: &'static str = "/appointments";
    const LABEL: &'static str = "appointments";
    type Payload = NewAppointment;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Bill {
    const PATH: &'static str = "/billing/bills";
    const LABEL: &'static str = "bills";
    type Payload = NewBill;

    fn id(&self) -> i64 {
        self.id
    }
}

pub fn item_path<R: Resource>(id: i64) -> String {
    format!("{}/{}", R::PATH, id)
}

/// Banner text for a failed call, e.g. "Failed to fetch patients"
pub fn failure_message<R: Resource>(action: &str, err: &ApiError) -> String {
    err.message_or(&format!("Failed to {} {}", action, R::LABEL))
}

pub async fn list<R: Resource>(client: &ApiClient) -> Result<Vec<R>, ApiError> {
    client.get(R::PATH).await
}

pub async fn create<R: Resource>(client: &ApiClient, body: &R::Payload) -> Result<R, ApiError> {
    client.post(R::PATH, body).await
}

pub async fn update<R: Resource>(
    client: &ApiClient,
    id: i64,
    body: &R::Payload,
) -> Result<R, ApiError> {
    client.put(&item_path::<R>(id), body).await
}

pub async fn delete<R: Resource>(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.delete(&item_path::<R>(id)).await
}

pub fn payments_path(bill_id: i64) -> String {
    format!("{}/payments", item_path::<Bill>(bill_id))
}

pub async fn record_payment(
    client: &ApiClient,
    bill_id: i64,
    payment: &NewPayment,
) -> Result<Payment, ApiError> {
    client.post(&payments_path(bill_id), payment).await
}

pub async fn update_appointment_status(
    client: &ApiClient,
    id: i64,
    status: AppointmentStatus,
) -> Result<Appointment, ApiError> {
    client
        .put(&item_path::<Appointment>(id), &AppointmentStatusUpdate { status })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_paths() {
        assert_eq!(item_path::<Patient>(3), "/patients/3");
        assert_eq!(item_path::<Doctor>(4), "/doctors/4");
        assert_eq!(item_path::<Appointment>(5), "/appointments/5");
        assert_eq!(item_path::<Bill>(6), "/billing/bills/6");
        assert_eq!(payments_path(6), "/billing/bills/6/payments");
    }

    #[test]
    fn test_full_urls() {
        let client = ApiClient::anonymous();
        assert_eq!(client.url(Bill::PATH), "/api/v1/billing/bills");
        assert_eq!(client.url(&item_path::<Patient>(1)), "/api/v1/patients/1");
    }

    #[test]
    fn test_failure_message() {
        let offline = ApiError::Network("offline".to_string());
        assert_eq!(
            failure_message::<Patient>("fetch", &offline),
            "Failed to fetch patients"
        );

        let rejected = ApiError::from_response(404, r#"{"detail":"Bill not found"}"#);
        assert_eq!(failure_message::<Bill>("delete", &rejected), "Bill not found");
    }

    #[test]
    fn test_status_update_body() {
        let body = AppointmentStatusUpdate {
            status: AppointmentStatus::NoShow,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":"no_show"}"#
        );
    }

    #[cfg(feature = "ssr")]
    #[tokio::test]
    async fn test_list_unavailable_on_server() {
        let result = list::<Patient>(&ApiClient::anonymous()).await;
        assert_eq!(result, Err(ApiError::Unavailable));
    }
}
