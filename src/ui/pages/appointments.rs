//! Appointments page: schedule, re-status and cancel visits

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::lookup::{doctor_name, doctor_options, patient_name, patient_options};
use crate::core::api::{create, delete, failure_message, list, update_appointment_status};
use crate::core::validation::{AppointmentForm, FieldErrors};
use crate::core::{ApiError, Appointment, AppointmentStats, AppointmentStatus, Doctor, Patient};
use crate::ui::auth::use_session;
use crate::ui::common::{
    BaseModal, ConfirmDialog, EmptyState, ErrorMessage, FormField, LoadingSpinner, PageHeader,
    SelectField, StatCard, StatusBadge, TextAreaField, field_error,
};
use crate::ui::{Icon, icons};

/// Status a row shows once an update settles: the server's answer, or the
/// previous value when the update failed
fn settled_status(
    previous: AppointmentStatus,
    result: &Result<Appointment, ApiError>,
) -> AppointmentStatus {
    match result {
        Ok(updated) => updated.status,
        Err(_) => previous,
    }
}

#[component]
pub fn AppointmentsPage() -> impl IntoView {
    let session = use_session();

    let appointments = RwSignal::new(Vec::<Appointment>::new());
    let patients = RwSignal::new(Vec::<Patient>::new());
    let doctors = RwSignal::new(Vec::<Doctor>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let show_form = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let errors = RwSignal::new(FieldErrors::default());
    let delete_target = RwSignal::new(None::<Appointment>);

    let patient_id = RwSignal::new(String::new());
    let doctor_id = RwSignal::new(String::new());
    let date = RwSignal::new(String::new());
    let time = RwSignal::new(String::new());
    let reason = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());

    let load = move || {
        let client = session.api_client();
        spawn_local(async move {
            loading.set(true);
            match list::<Appointment>(&client).await {
                Ok(items) => appointments.set(items),
                Err(e) => error.set(Some(failure_message::<Appointment>("fetch", &e))),
            }
            loading.set(false);
        });
    };

    // Patients and doctors only label rows and fill the dialog's selects,
    // so a failure here falls back to showing ids
    let load_people = move || {
        let client = session.api_client();
        spawn_local(async move {
            let (patient_result, doctor_result) =
                futures::join!(list::<Patient>(&client), list::<Doctor>(&client));
            match patient_result {
                Ok(items) => patients.set(items),
                Err(e) => leptos::logging::warn!("Failed to fetch patients: {}", e),
            }
            match doctor_result {
                Ok(items) => doctors.set(items),
                Err(e) => leptos::logging::warn!("Failed to fetch doctors: {}", e),
            }
        });
    };

    Effect::new(move |_| {
        load();
        load_people();
    });

    let stats = Memo::new(move |_| appointments.with(|a| AppointmentStats::from_appointments(a)));

    let open_create = move || {
        for field in [patient_id, doctor_id, date, time, reason, notes] {
            field.set(String::new());
        }
        errors.set(FieldErrors::default());
        show_form.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = AppointmentForm {
            patient_id: patient_id.get_untracked(),
            doctor_id: doctor_id.get_untracked(),
            date: date.get_untracked(),
            time: time.get_untracked(),
            reason: reason.get_untracked(),
            notes: notes.get_untracked(),
        };
        let new_appointment = match input.validate() {
            Ok(new_appointment) => {
                errors.set(FieldErrors::default());
                new_appointment
            }
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };

        let client = session.api_client();
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match create::<Appointment>(&client, &new_appointment).await {
                Ok(_) => {
                    show_form.set(false);
                    load();
                }
                Err(e) => error.set(Some(failure_message::<Appointment>("create", &e))),
            }
            saving.set(false);
        });
    };

    let change_status = move |id: i64,
                              previous: AppointmentStatus,
                              next: AppointmentStatus,
                              shown: RwSignal<AppointmentStatus>| {
        shown.set(next);
        let client = session.api_client();
        spawn_local(async move {
            let result = update_appointment_status(&client, id, next).await;
            shown.set(settled_status(previous, &result));
            match result {
                Ok(updated) => appointments.update(|items| {
                    if let Some(item) = items.iter_mut().find(|a| a.id == updated.id) {
                        *item = updated;
                    }
                }),
                Err(e) => error.set(Some(failure_message::<Appointment>("update", &e))),
            }
        });
    };

    let confirm_delete = move |_: ()| {
        let Some(appointment) = delete_target.get_untracked() else {
            return;
        };
        let client = session.api_client();
        spawn_local(async move {
            match delete::<Appointment>(&client, appointment.id).await {
                Ok(()) => load(),
                Err(e) => error.set(Some(failure_message::<Appointment>("delete", &e))),
            }
        });
    };

    view! {
        <div class="page">
            <PageHeader title="Appointments" subtitle="Scheduled visits and their outcome">
                <button type="button" class="btn-primary" on:click=move |_| open_create()>
                    <Icon name=icons::PLUS class="icon-sm"/>
                    "Schedule Appointment"
                </button>
            </PageHeader>

            <ErrorMessage error=error on_dismiss=Callback::new(move |_| error.set(None))/>

            <div class="stat-grid">
                <StatCard label="Scheduled" accent="accent-info"
                    value=Signal::derive(move || stats.get().scheduled.to_string())/>
                <StatCard label="Completed" accent="accent-success"
                    value=Signal::derive(move || stats.get().completed.to_string())/>
                <StatCard label="Cancelled" accent="accent-danger"
                    value=Signal::derive(move || stats.get().cancelled.to_string())/>
                <StatCard label="No Show" accent="accent-warning"
                    value=Signal::derive(move || stats.get().no_show.to_string())/>
            </div>

            {move || {
                if loading.get() && appointments.with(Vec::is_empty) {
                    view! { <LoadingSpinner label="Loading appointments..."/> }.into_any()
                } else if appointments.with(Vec::is_empty) {
                    view! { <EmptyState message="No appointments scheduled"/> }.into_any()
                } else {
                    view! {
                        <div class="card table-card">
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>"Patient"</th>
                                        <th>"Doctor"</th>
                                        <th>"Date & Time"</th>
                                        <th>"Reason"</th>
                                        <th>"Status"</th>
                                        <th class="actions">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || appointments.get()
                                        key=|a| (a.id, a.updated_at)
                                        children=move |appointment| {
                                            let id = appointment.id;
                                            let status = appointment.status;
                                            let shown = RwSignal::new(status);
                                            let patient_key = appointment.patient_id;
                                            let doctor_key = appointment.doctor_id;
                                            let for_delete = appointment.clone();
                                            view! {
                                                <tr>
                                                    <td class="cell-strong">
                                                        {move || patients.with(|p| patient_name(p, patient_key))}
                                                    </td>
                                                    <td>
                                                        {move || doctors.with(|d| doctor_name(d, doctor_key))}
                                                    </td>
                                                    <td>
                                                        {appointment.appointment_date.format("%Y-%m-%d %H:%M").to_string()}
                                                    </td>
                                                    <td>{appointment.reason.clone()}</td>
                                                    <td>
                                                        <StatusBadge label=status.to_string() tone=status.tone()/>
                                                    </td>
                                                    <td class="actions">
                                                        <select
                                                            class="input input-sm"
                                                            title="Change status"
                                                            prop:value=move || shown.get().as_str()
                                                            on:change=move |ev| {
                                                                let previous = shown.get_untracked();
                                                                if let Some(next) = AppointmentStatus::parse(&event_target_value(&ev))
                                                                    && next != previous
                                                                {
                                                                    change_status(id, previous, next, shown);
                                                                }
                                                            }
                                                        >
                                                            {AppointmentStatus::ALL
                                                                .into_iter()
                                                                .map(|option| {
                                                                    view! {
                                                                        <option value=option.as_str() selected={option == status}>
                                                                            {option.to_string()}
                                                                        </option>
                                                                    }
                                                                })
                                                                .collect_view()}
                                                        </select>
                                                        <button
                                                            type="button"
                                                            class="btn-icon btn-icon-danger"
                                                            title="Delete appointment"
                                                            on:click=move |_| delete_target.set(Some(for_delete.clone()))
                                                        >
                                                            <Icon name=icons::TRASH/>
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    }
                        .into_any()
                }
            }}

            <BaseModal
                title="Schedule Appointment".to_string()
                is_open=show_form
                on_close=Callback::new(move |_| show_form.set(false))
            >
                <form on:submit=on_submit novalidate=true>
                    <ErrorMessage error=error/>

                    <SelectField label="Patient" required=true value=patient_id
                        options=Signal::derive(move || patients.with(|p| patient_options(p)))
                        error=field_error(errors, "patient_id")/>
                    <SelectField label="Doctor" required=true value=doctor_id
                        options=Signal::derive(move || doctors.with(|d| doctor_options(d)))
                        error=field_error(errors, "doctor_id")/>
                    <div class="form-grid">
                        <FormField label="Date" required=true input_type="date" value=date
                            error=field_error(errors, "date")/>
                        <FormField label="Time" required=true input_type="time" value=time
                            error=field_error(errors, "time")/>
                    </div>
                    <FormField label="Reason" required=true value=reason
                        placeholder="Annual checkup" error=field_error(errors, "reason")/>
                    <TextAreaField label="Notes" value=notes/>

                    <div class="form-actions">
                        <button type="button" class="btn-secondary" on:click=move |_| show_form.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Scheduling..." } else { "Schedule" }}
                        </button>
                    </div>
                </form>
            </BaseModal>

            <ConfirmDialog
                title="Delete Appointment".to_string()
                message=Signal::derive(move || {
                    delete_target
                        .with(|t| {
                            t.as_ref().map(|a| a.appointment_date.format("%Y-%m-%d %H:%M").to_string())
                        })
                        .map(|when| format!("Delete the appointment on {}?", when))
                        .unwrap_or_default()
                })
                is_open=Signal::derive(move || delete_target.with(Option::is_some))
                on_confirm=Callback::new(confirm_delete)
                on_cancel=Callback::new(move |_| delete_target.set(None))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
    }

    fn appointment(status: AppointmentStatus) -> Appointment {
        Appointment {
            id: 4,
            patient_id: 1,
            doctor_id: 2,
            appointment_date: timestamp(),
            reason: "Follow-up".to_string(),
            notes: None,
            status,
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[test]
    fn test_failed_status_update_restores_previous_status() {
        let rejected = ApiError::from_response(422, r#"{"detail":"Invalid status"}"#);

        assert_eq!(
            settled_status(AppointmentStatus::Scheduled, &Err(rejected)),
            AppointmentStatus::Scheduled
        );
        assert_eq!(
            settled_status(AppointmentStatus::Scheduled, &Err(ApiError::Network("offline".into()))),
            AppointmentStatus::Scheduled
        );
    }

    #[test]
    fn test_successful_status_update_shows_server_status() {
        let updated = appointment(AppointmentStatus::Completed);

        assert_eq!(
            settled_status(AppointmentStatus::Scheduled, &Ok(updated)),
            AppointmentStatus::Completed
        );
    }
}
