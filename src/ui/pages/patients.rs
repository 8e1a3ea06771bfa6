//! Patients page: list, create, edit and delete patient records

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::Patient;
use crate::core::api::{create, delete, failure_message, list, update};
use crate::core::validation::{FieldErrors, PatientForm};
use crate::ui::auth::use_session;
use crate::ui::common::{
    BaseModal, ConfirmDialog, EmptyState, ErrorMessage, FormField, LoadingSpinner, PageHeader,
    SelectField, TextAreaField, field_error,
};
use crate::ui::{Icon, icons};

const GENDERS: [&str; 3] = ["Male", "Female", "Other"];
const BLOOD_TYPES: [&str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

fn select_options(values: &[&str], placeholder: &str) -> Vec<(String, String)> {
    std::iter::once((String::new(), placeholder.to_string()))
        .chain(values.iter().map(|v| (v.to_string(), v.to_string())))
        .collect()
}

/// Input signals backing the patient dialog
#[derive(Clone, Copy)]
struct PatientFields {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    date_of_birth: RwSignal<String>,
    gender: RwSignal<String>,
    address: RwSignal<String>,
    city: RwSignal<String>,
    state: RwSignal<String>,
    zip_code: RwSignal<String>,
    blood_type: RwSignal<String>,
    allergies: RwSignal<String>,
    emergency_contact_name: RwSignal<String>,
    emergency_contact_phone: RwSignal<String>,
}

impl PatientFields {
    fn new() -> Self {
        let empty = || RwSignal::new(String::new());
        Self {
            first_name: empty(),
            last_name: empty(),
            email: empty(),
            phone: empty(),
            date_of_birth: empty(),
            gender: empty(),
            address: empty(),
            city: empty(),
            state: empty(),
            zip_code: empty(),
            blood_type: empty(),
            allergies: empty(),
            emergency_contact_name: empty(),
            emergency_contact_phone: empty(),
        }
    }

    fn fill(&self, form: PatientForm) {
        self.first_name.set(form.first_name);
        self.last_name.set(form.last_name);
        self.email.set(form.email);
        self.phone.set(form.phone);
        self.date_of_birth.set(form.date_of_birth);
        self.gender.set(form.gender);
        self.address.set(form.address);
        self.city.set(form.city);
        self.state.set(form.state);
        self.zip_code.set(form.zip_code);
        self.blood_type.set(form.blood_type);
        self.allergies.set(form.allergies);
        self.emergency_contact_name.set(form.emergency_contact_name);
        self.emergency_contact_phone.set(form.emergency_contact_phone);
    }

    fn read(&self) -> PatientForm {
        PatientForm {
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            email: self.email.get_untracked(),
            phone: self.phone.get_untracked(),
            date_of_birth: self.date_of_birth.get_untracked(),
            gender: self.gender.get_untracked(),
            address: self.address.get_untracked(),
            city: self.city.get_untracked(),
            state: self.state.get_untracked(),
            zip_code: self.zip_code.get_untracked(),
            blood_type: self.blood_type.get_untracked(),
            allergies: self.allergies.get_untracked(),
            emergency_contact_name: self.emergency_contact_name.get_untracked(),
            emergency_contact_phone: self.emergency_contact_phone.get_untracked(),
        }
    }
}

#[component]
pub fn PatientsPage() -> impl IntoView {
    let session = use_session();

    let patients = RwSignal::new(Vec::<Patient>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    // Dialog state
    let show_form = RwSignal::new(false);
    let editing_id = RwSignal::new(None::<i64>);
    let saving = RwSignal::new(false);
    let fields = PatientFields::new();
    let errors = RwSignal::new(FieldErrors::default());
    let delete_target = RwSignal::new(None::<Patient>);

    let load = move || {
        let client = session.api_client();
        spawn_local(async move {
            loading.set(true);
            match list::<Patient>(&client).await {
                Ok(items) => patients.set(items),
                Err(e) => {
                    leptos::logging::warn!("Failed to fetch patients: {}", e);
                    error.set(Some(failure_message::<Patient>("fetch", &e)));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let open_create = move || {
        editing_id.set(None);
        fields.fill(PatientForm::default());
        errors.set(FieldErrors::default());
        show_form.set(true);
    };

    let open_edit = move |patient: Patient| {
        editing_id.set(Some(patient.id));
        fields.fill(PatientForm::from_patient(&patient));
        errors.set(FieldErrors::default());
        show_form.set(true);
    };

    let close_form = move || {
        show_form.set(false);
        editing_id.set(None);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let payload = match fields.read().validate() {
            Ok(payload) => {
                errors.set(FieldErrors::default());
                payload
            }
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };

        let client = session.api_client();
        let target = editing_id.get_untracked();
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            let (result, action) = match target {
                Some(id) => (update::<Patient>(&client, id, &payload).await, "update"),
                None => (create::<Patient>(&client, &payload).await, "create"),
            };
            match result {
                Ok(_) => {
                    close_form();
                    load();
                }
                Err(e) => error.set(Some(failure_message::<Patient>(action, &e))),
            }
            saving.set(false);
        });
    };

    let confirm_delete = move |_: ()| {
        let Some(patient) = delete_target.get_untracked() else {
            return;
        };
        let client = session.api_client();
        spawn_local(async move {
            match delete::<Patient>(&client, patient.id).await {
                Ok(()) => load(),
                Err(e) => error.set(Some(failure_message::<Patient>("delete", &e))),
            }
        });
    };

    let form_title = Signal::derive(move || {
        if editing_id.get().is_some() {
            "Edit Patient".to_string()
        } else {
            "Add Patient".to_string()
        }
    });

    view! {
        <div class="page">
            <PageHeader title="Patients" subtitle="Registered patients and their contact details">
                <button type="button" class="btn-primary" on:click=move |_| open_create()>
                    <Icon name=icons::PLUS class="icon-sm"/>
                    "Add Patient"
                </button>
            </PageHeader>

            <ErrorMessage error=error on_dismiss=Callback::new(move |_| error.set(None))/>

            {move || {
                if loading.get() && patients.with(Vec::is_empty) {
                    view! { <LoadingSpinner label="Loading patients..."/> }.into_any()
                } else if patients.with(Vec::is_empty) {
                    view! { <EmptyState message="No patients yet"/> }.into_any()
                } else {
                    view! {
                        <div class="card table-card">
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Email"</th>
                                        <th>"Phone"</th>
                                        <th>"Date of Birth"</th>
                                        <th>"Gender"</th>
                                        <th>"Blood Type"</th>
                                        <th class="actions">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || patients.get()
                                        key=|p| (p.id, p.updated_at)
                                        children=move |patient| {
                                            let for_edit = patient.clone();
                                            let for_delete = patient.clone();
                                            view! {
                                                <tr>
                                                    <td class="cell-strong">{patient.full_name()}</td>
                                                    <td>{patient.email.clone().unwrap_or_default()}</td>
                                                    <td>{patient.phone.clone().unwrap_or_default()}</td>
                                                    <td>{patient.date_of_birth.format("%Y-%m-%d").to_string()}</td>
                                                    <td>{patient.gender.clone()}</td>
                                                    <td>{patient.blood_type.clone().unwrap_or_default()}</td>
                                                    <td class="actions">
                                                        <button
                                                            type="button"
                                                            class="btn-icon"
                                                            title="Edit patient"
                                                            on:click=move |_| open_edit(for_edit.clone())
                                                        >
                                                            <Icon name=icons::EDIT/>
                                                        </button>
                                                        <button
                                                            type="button"
                                                            class="btn-icon btn-icon-danger"
                                                            title="Delete patient"
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
                title=form_title
                is_open=show_form
                on_close=Callback::new(move |_| close_form())
                width="modal-lg"
            >
                <form on:submit=on_submit novalidate=true>
                    <ErrorMessage error=error/>

                    <div class="form-grid">
                        <FormField label="First Name" required=true value=fields.first_name
                            error=field_error(errors, "first_name")/>
                        <FormField label="Last Name" required=true value=fields.last_name
                            error=field_error(errors, "last_name")/>
                        <FormField label="Email" input_type="email" value=fields.email
                            error=field_error(errors, "email")/>
                        <FormField label="Phone" input_type="tel" value=fields.phone/>
                        <FormField label="Date of Birth" required=true input_type="date"
                            value=fields.date_of_birth error=field_error(errors, "date_of_birth")/>
                        <SelectField label="Gender" required=true value=fields.gender
                            options=select_options(&GENDERS, "Select gender")
                            error=field_error(errors, "gender")/>
                        <FormField label="Address" value=fields.address/>
                        <FormField label="City" value=fields.city/>
                        <FormField label="State" value=fields.state/>
                        <FormField label="ZIP Code" value=fields.zip_code/>
                        <SelectField label="Blood Type" value=fields.blood_type
                            options=select_options(&BLOOD_TYPES, "Unknown")/>
                        <FormField label="Emergency Contact" value=fields.emergency_contact_name/>
                        <FormField label="Emergency Phone" input_type="tel"
                            value=fields.emergency_contact_phone/>
                    </div>
                    <TextAreaField label="Allergies" value=fields.allergies rows=2/>

                    <div class="form-actions">
                        <button type="button" class="btn-secondary" on:click=move |_| close_form()>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </BaseModal>

            <ConfirmDialog
                title="Delete Patient".to_string()
                message=Signal::derive(move || {
                    delete_target
                        .with(|t| t.as_ref().map(Patient::full_name))
                        .map(|name| format!("Delete {}? This cannot be undone.", name))
                        .unwrap_or_default()
                })
                is_open=Signal::derive(move || delete_target.with(Option::is_some))
                on_confirm=Callback::new(confirm_delete)
                on_cancel=Callback::new(move |_| delete_target.set(None))
            />
        </div>
    }
}
