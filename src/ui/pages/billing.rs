//! Billing page: bills, payments and the totals above them

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::lookup::{patient_name, patient_options};
use crate::core::api::{create, delete, failure_message, list, record_payment};
use crate::core::validation::{BillForm, FieldErrors, PaymentForm};
use crate::core::{Bill, BillingSummary, Patient, format_money, format_money_compact};
use crate::ui::auth::use_session;
use crate::ui::common::{
    BaseModal, ConfirmDialog, EmptyState, ErrorMessage, FormField, LoadingSpinner, PageHeader,
    SelectField, StatCard, StatusBadge, SuccessMessage, TextAreaField, field_error,
};
use crate::ui::{Icon, icons};

const PAYMENT_METHODS: [&str; 5] = ["Cash", "Credit Card", "Debit Card", "Check", "Insurance"];

fn payment_method_options() -> Vec<(String, String)> {
    std::iter::once((String::new(), "Select method".to_string()))
        .chain(PAYMENT_METHODS.iter().map(|m| (m.to_string(), m.to_string())))
        .collect()
}

#[component]
pub fn BillingPage() -> impl IntoView {
    let session = use_session();

    let bills = RwSignal::new(Vec::<Bill>::new());
    let patients = RwSignal::new(Vec::<Patient>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);

    // New bill dialog
    let show_bill_form = RwSignal::new(false);
    let bill_errors = RwSignal::new(FieldErrors::default());
    let bill_patient = RwSignal::new(String::new());
    let bill_amount = RwSignal::new(String::new());
    let bill_tax = RwSignal::new(String::new());
    let bill_description = RwSignal::new(String::new());
    let bill_due_date = RwSignal::new(String::new());

    // Payment dialog, open while a bill is targeted
    let payment_target = RwSignal::new(None::<Bill>);
    let payment_errors = RwSignal::new(FieldErrors::default());
    let payment_amount = RwSignal::new(String::new());
    let payment_method = RwSignal::new(String::new());
    let payment_notes = RwSignal::new(String::new());

    let saving = RwSignal::new(false);
    let delete_target = RwSignal::new(None::<Bill>);

    let load = move || {
        let client = session.api_client();
        spawn_local(async move {
            loading.set(true);
            match list::<Bill>(&client).await {
                Ok(items) => bills.set(items),
                Err(e) => error.set(Some(failure_message::<Bill>("fetch", &e))),
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        load();
        let client = session.api_client();
        spawn_local(async move {
            match list::<Patient>(&client).await {
                Ok(items) => patients.set(items),
                Err(e) => leptos::logging::warn!("Failed to fetch patients: {}", e),
            }
        });
    });

    let summary = Memo::new(move |_| bills.with(|b| BillingSummary::from_bills(b)));

    let open_bill_form = move || {
        for field in [bill_patient, bill_amount, bill_tax, bill_description, bill_due_date] {
            field.set(String::new());
        }
        bill_errors.set(FieldErrors::default());
        notice.set(None);
        show_bill_form.set(true);
    };

    let open_payment = move |bill: Bill| {
        payment_amount.set(format!("{:.2}", bill.balance()));
        payment_method.set(String::new());
        payment_notes.set(String::new());
        payment_errors.set(FieldErrors::default());
        notice.set(None);
        payment_target.set(Some(bill));
    };

    let on_bill_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = BillForm {
            patient_id: bill_patient.get_untracked(),
            amount: bill_amount.get_untracked(),
            tax: bill_tax.get_untracked(),
            description: bill_description.get_untracked(),
            due_date: bill_due_date.get_untracked(),
        };
        let new_bill = match input.validate() {
            Ok(new_bill) => {
                bill_errors.set(FieldErrors::default());
                new_bill
            }
            Err(field_errors) => {
                bill_errors.set(field_errors);
                return;
            }
        };

        let client = session.api_client();
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match create::<Bill>(&client, &new_bill).await {
                Ok(bill) => {
                    show_bill_form.set(false);
                    notice.set(Some(format!("Bill {} created", bill.bill_number)));
                    load();
                }
                Err(e) => error.set(Some(failure_message::<Bill>("create", &e))),
            }
            saving.set(false);
        });
    };

    let on_payment_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(bill_id) = payment_target.with_untracked(|t| t.as_ref().map(|b| b.id)) else {
            return;
        };
        let input = PaymentForm {
            amount: payment_amount.get_untracked(),
            payment_method: payment_method.get_untracked(),
            notes: payment_notes.get_untracked(),
        };
        let payment = match input.validate() {
            Ok(payment) => {
                payment_errors.set(FieldErrors::default());
                payment
            }
            Err(field_errors) => {
                payment_errors.set(field_errors);
                return;
            }
        };

        let client = session.api_client();
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match record_payment(&client, bill_id, &payment).await {
                Ok(recorded) => {
                    payment_target.set(None);
                    notice.set(Some(format!(
                        "Payment of {} recorded",
                        format_money(recorded.amount)
                    )));
                    load();
                }
                Err(e) => error.set(Some(e.message_or("Failed to record payment"))),
            }
            saving.set(false);
        });
    };

    let confirm_delete = move |_: ()| {
        let Some(bill) = delete_target.get_untracked() else {
            return;
        };
        let client = session.api_client();
        spawn_local(async move {
            match delete::<Bill>(&client, bill.id).await {
                Ok(()) => load(),
                Err(e) => error.set(Some(failure_message::<Bill>("delete", &e))),
            }
        });
    };

    let payment_title = Signal::derive(move || {
        payment_target
            .with(|t| t.as_ref().map(|b| format!("Record Payment for {}", b.bill_number)))
            .unwrap_or_else(|| "Record Payment".to_string())
    });

    view! {
        <div class="page">
            <PageHeader title="Billing" subtitle="Invoices and payments">
                <button type="button" class="btn-primary" on:click=move |_| open_bill_form()>
                    <Icon name=icons::PLUS class="icon-sm"/>
                    "New Bill"
                </button>
            </PageHeader>

            <ErrorMessage error=error on_dismiss=Callback::new(move |_| error.set(None))/>
            <SuccessMessage message=notice/>

            <div class="stat-grid">
                <StatCard label="Total Billed"
                    value=Signal::derive(move || format_money_compact(summary.get().total_billed))/>
                <StatCard label="Paid" accent="accent-success"
                    value=Signal::derive(move || format_money_compact(summary.get().total_paid))/>
                <StatCard label="Outstanding" accent="accent-warning"
                    value=Signal::derive(move || format_money_compact(summary.get().total_pending))/>
                <StatCard label="Overdue" accent="accent-danger"
                    value=Signal::derive(move || format_money_compact(summary.get().overdue))/>
            </div>

            {move || {
                if loading.get() && bills.with(Vec::is_empty) {
                    view! { <LoadingSpinner label="Loading bills..."/> }.into_any()
                } else if bills.with(Vec::is_empty) {
                    view! { <EmptyState message="No bills yet"/> }.into_any()
                } else {
                    view! {
                        <div class="card table-card">
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>"Bill #"</th>
                                        <th>"Patient"</th>
                                        <th class="numeric">"Amount"</th>
                                        <th class="numeric">"Tax"</th>
                                        <th class="numeric">"Total"</th>
                                        <th class="numeric">"Balance"</th>
                                        <th>"Due"</th>
                                        <th>"Status"</th>
                                        <th class="actions">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || bills.get()
                                        key=|b| (b.id, b.updated_at, b.payments.len())
                                        children=move |bill| {
                                            let patient_key = bill.patient_id;
                                            let settled = bill.balance() <= 0.0;
                                            let for_payment = bill.clone();
                                            let for_delete = bill.clone();
                                            view! {
                                                <tr>
                                                    <td class="cell-strong">{bill.bill_number.clone()}</td>
                                                    <td>{move || patients.with(|p| patient_name(p, patient_key))}</td>
                                                    <td class="numeric">{format_money(bill.amount)}</td>
                                                    <td class="numeric">{format_money(bill.tax)}</td>
                                                    <td class="numeric">{format_money(bill.total_amount)}</td>
                                                    <td class="numeric">{format_money(bill.balance())}</td>
                                                    <td>{bill.due_date.format("%Y-%m-%d").to_string()}</td>
                                                    <td>
                                                        <StatusBadge label=bill.status.to_string() tone=bill.status.tone()/>
                                                    </td>
                                                    <td class="actions">
                                                        <button
                                                            type="button"
                                                            class="btn-secondary btn-sm"
                                                            title="Record payment"
                                                            disabled=settled
                                                            on:click=move |_| open_payment(for_payment.clone())
                                                        >
                                                            <Icon name=icons::CREDIT_CARD class="icon-sm"/>
                                                            "Pay"
                                                        </button>
                                                        <button
                                                            type="button"
                                                            class="btn-icon btn-icon-danger"
                                                            title="Delete bill"
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
                title="New Bill".to_string()
                is_open=show_bill_form
                on_close=Callback::new(move |_| show_bill_form.set(false))
            >
                <form on:submit=on_bill_submit novalidate=true>
                    <ErrorMessage error=error/>

                    <SelectField label="Patient" required=true value=bill_patient
                        options=Signal::derive(move || patients.with(|p| patient_options(p)))
                        error=field_error(bill_errors, "patient_id")/>
                    <div class="form-grid">
                        <FormField label="Amount" required=true input_type="number" value=bill_amount
                            placeholder="0.00" error=field_error(bill_errors, "amount")/>
                        <FormField label="Tax" input_type="number" value=bill_tax
                            placeholder="0.00" error=field_error(bill_errors, "tax")/>
                    </div>
                    <FormField label="Due Date" required=true input_type="date" value=bill_due_date
                        error=field_error(bill_errors, "due_date")/>
                    <TextAreaField label="Description" value=bill_description
                        placeholder="Consultation, lab work, ..."
                        error=field_error(bill_errors, "description")/>

                    <div class="form-actions">
                        <button type="button" class="btn-secondary" on:click=move |_| show_bill_form.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Creating..." } else { "Create Bill" }}
                        </button>
                    </div>
                </form>
            </BaseModal>

            <BaseModal
                title=payment_title
                is_open=Signal::derive(move || payment_target.with(Option::is_some))
                on_close=Callback::new(move |_| payment_target.set(None))
                width="modal-sm"
            >
                <form on:submit=on_payment_submit novalidate=true>
                    <ErrorMessage error=error/>

                    <FormField label="Amount" required=true input_type="number" value=payment_amount
                        error=field_error(payment_errors, "amount")/>
                    <SelectField label="Payment Method" required=true value=payment_method
                        options=payment_method_options()
                        error=field_error(payment_errors, "payment_method")/>
                    <TextAreaField label="Notes" value=payment_notes rows=2/>

                    <div class="form-actions">
                        <button type="button" class="btn-secondary" on:click=move |_| payment_target.set(None)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn-success" disabled=move || saving.get()>
                            {move || if saving.get() { "Recording..." } else { "Record Payment" }}
                        </button>
                    </div>
                </form>
            </BaseModal>

            <ConfirmDialog
                title="Delete Bill".to_string()
                message=Signal::derive(move || {
                    delete_target
                        .with(|t| t.as_ref().map(|b| b.bill_number.clone()))
                        .map(|number| format!("Delete bill {}? This cannot be undone.", number))
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

    #[test]
    fn test_payment_method_options() {
        let options = payment_method_options();

        assert_eq!(options.len(), PAYMENT_METHODS.len() + 1);
        assert_eq!(options[0].0, "");
        assert!(options.iter().any(|(value, _)| value == "Insurance"));
    }
}
