use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::Doctor;
use crate::core::api::{create, delete, failure_message, list};
use crate::core::validation::{DoctorForm, FieldErrors};
use crate::ui::auth::use_session;
use crate::ui::common::{
    BaseModal, ConfirmDialog, EmptyState, ErrorMessage, FormField, LoadingSpinner, PageHeader,
    TextAreaField, field_error,
};
use crate::ui::{Icon, icons};

/// Doctor directory. Adding a doctor also creates their login account.
#[component]
pub fn DoctorsPage() -> impl IntoView {
    let session = use_session();

    let doctors = RwSignal::new(Vec::<Doctor>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    let show_form = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let errors = RwSignal::new(FieldErrors::default());
    let delete_target = RwSignal::new(None::<Doctor>);

    let email = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let specialization = RwSignal::new(String::new());
    let license_number = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let office_hours = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());

    let load = move || {
        let client = session.api_client();
        spawn_local(async move {
            loading.set(true);
            match list::<Doctor>(&client).await {
                Ok(items) => doctors.set(items),
                Err(e) => error.set(Some(failure_message::<Doctor>("fetch", &e))),
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let open_create = move || {
        for field in [
            email,
            username,
            full_name,
            password,
            specialization,
            license_number,
            phone,
            office_hours,
            bio,
        ] {
            field.set(String::new());
        }
        errors.set(FieldErrors::default());
        show_form.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = DoctorForm {
            email: email.get_untracked(),
            username: username.get_untracked(),
            full_name: full_name.get_untracked(),
            password: password.get_untracked(),
            specialization: specialization.get_untracked(),
            license_number: license_number.get_untracked(),
            phone: phone.get_untracked(),
            office_hours: office_hours.get_untracked(),
            bio: bio.get_untracked(),
        };
        let new_doctor = match input.validate() {
            Ok(new_doctor) => {
                errors.set(FieldErrors::default());
                new_doctor
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
            match create::<Doctor>(&client, &new_doctor).await {
                Ok(_) => {
                    show_form.set(false);
                    load();
                }
                Err(e) => error.set(Some(failure_message::<Doctor>("create", &e))),
            }
            saving.set(false);
        });
    };

    let confirm_delete = move |_: ()| {
        let Some(doctor) = delete_target.get_untracked() else {
            return;
        };
        let client = session.api_client();
        spawn_local(async move {
            match delete::<Doctor>(&client, doctor.id).await {
                Ok(()) => load(),
                Err(e) => error.set(Some(failure_message::<Doctor>("delete", &e))),
            }
        });
    };

    view! {
        <div class="page">
            <PageHeader title="Doctors" subtitle="Medical staff and their specializations">
                <button type="button" class="btn-primary" on:click=move |_| open_create()>
                    <Icon name=icons::PLUS class="icon-sm"/>
                    "Add Doctor"
                </button>
            </PageHeader>

            <ErrorMessage error=error on_dismiss=Callback::new(move |_| error.set(None))/>

            {move || {
                if loading.get() && doctors.with(Vec::is_empty) {
                    view! { <LoadingSpinner label="Loading doctors..."/> }.into_any()
                } else if doctors.with(Vec::is_empty) {
                    view! { <EmptyState message="No doctors yet"/> }.into_any()
                } else {
                    view! {
                        <div class="card table-card">
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Specialization"</th>
                                        <th>"License"</th>
                                        <th>"Phone"</th>
                                        <th>"Office Hours"</th>
                                        <th class="actions">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || doctors.get()
                                        key=|d| (d.id, d.updated_at)
                                        children=move |doctor| {
                                            let for_delete = doctor.clone();
                                            view! {
                                                <tr>
                                                    <td class="cell-strong">
                                                        {doctor.display_name()}
                                                        <div class="text-muted text-sm">
                                                            {doctor.email.clone().unwrap_or_default()}
                                                        </div>
                                                    </td>
                                                    <td>{doctor.specialization.clone()}</td>
                                                    <td>{doctor.license_number.clone()}</td>
                                                    <td>{doctor.phone.clone()}</td>
                                                    <td>{doctor.office_hours.clone().unwrap_or_default()}</td>
                                                    <td class="actions">
                                                        <button
                                                            type="button"
                                                            class="btn-icon btn-icon-danger"
                                                            title="Delete doctor"
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
                title="Add Doctor".to_string()
                is_open=show_form
                on_close=Callback::new(move |_| show_form.set(false))
                width="modal-lg"
            >
                <form on:submit=on_submit novalidate=true>
                    <ErrorMessage error=error/>

                    <h4 class="form-section">"Account"</h4>
                    <div class="form-grid">
                        <FormField label="Full Name" required=true value=full_name
                            error=field_error(errors, "full_name")/>
                        <FormField label="Email" required=true input_type="email" value=email
                            error=field_error(errors, "email")/>
                        <FormField label="Username" required=true value=username
                            error=field_error(errors, "username")/>
                        <FormField label="Password" required=true input_type="password"
                            autocomplete="new-password" value=password
                            error=field_error(errors, "password")/>
                    </div>

                    <h4 class="form-section">"Practice"</h4>
                    <div class="form-grid">
                        <FormField label="Specialization" required=true value=specialization
                            placeholder="Cardiology" error=field_error(errors, "specialization")/>
                        <FormField label="License Number" required=true value=license_number
                            error=field_error(errors, "license_number")/>
                        <FormField label="Phone" required=true input_type="tel" value=phone
                            error=field_error(errors, "phone")/>
                        <FormField label="Office Hours" required=true value=office_hours
                            placeholder="Mon-Fri 9:00-17:00" error=field_error(errors, "office_hours")/>
                    </div>
                    <TextAreaField label="Bio" value=bio/>

                    <div class="form-actions">
                        <button type="button" class="btn-secondary" on:click=move |_| show_form.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Add Doctor" }}
                        </button>
                    </div>
                </form>
            </BaseModal>

            <ConfirmDialog
                title="Delete Doctor".to_string()
                message=Signal::derive(move || {
                    delete_target
                        .with(|t| t.as_ref().map(Doctor::display_name))
                        .map(|name| format!("Remove {} from the directory?", name))
                        .unwrap_or_default()
                })
                is_open=Signal::derive(move || delete_target.with(Option::is_some))
                on_confirm=Callback::new(confirm_delete)
                on_cancel=Callback::new(move |_| delete_target.set(None))
            />
        </div>
    }
}
