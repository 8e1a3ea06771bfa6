//! Dashboard: welcome banner and clinic-wide counts

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::api::{failure_message, list};
use crate::core::guard::AppRoute;
use crate::core::{
    Appointment, AppointmentStats, Bill, BillingSummary, Doctor, Patient, format_money_compact,
};
use crate::ui::auth::use_session;
use crate::ui::common::{ErrorMessage, PageHeader, StatCard};

/// Figures shown on the dashboard, each from one list call
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Overview {
    patients: Option<usize>,
    doctors: Option<usize>,
    appointments: Option<AppointmentStats>,
    billing: Option<BillingSummary>,
}

/// Count text for a card; a dash until the figure has loaded
fn figure<T>(value: Option<T>, render: impl FnOnce(T) -> String) -> String {
    value.map(render).unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let overview = RwSignal::new(Overview::default());
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let client = session.api_client();
        spawn_local(async move {
            let (patients, doctors, appointments, bills) = futures::join!(
                list::<Patient>(&client),
                list::<Doctor>(&client),
                list::<Appointment>(&client),
                list::<Bill>(&client),
            );

            let mut failures = Vec::new();
            let mut next = Overview::default();
            match patients {
                Ok(items) => next.patients = Some(items.len()),
                Err(e) => failures.push(failure_message::<Patient>("fetch", &e)),
            }
            match doctors {
                Ok(items) => next.doctors = Some(items.len()),
                Err(e) => failures.push(failure_message::<Doctor>("fetch", &e)),
            }
            match appointments {
                Ok(items) => next.appointments = Some(AppointmentStats::from_appointments(&items)),
                Err(e) => failures.push(failure_message::<Appointment>("fetch", &e)),
            }
            match bills {
                Ok(items) => next.billing = Some(BillingSummary::from_bills(&items)),
                Err(e) => failures.push(failure_message::<Bill>("fetch", &e)),
            }

            overview.set(next);
            error.set(failures.into_iter().next());
        });
    });

    let welcome = move || {
        session
            .user()
            .map(|user| format!("Welcome back, {}!", user.full_name))
            .unwrap_or_else(|| "Welcome back!".to_string())
    };
    let card = move |render: fn(&Overview) -> String| Signal::derive(move || overview.with(render));

    view! {
        <div class="page">
            <div class="welcome-banner card">
                <h1 class="title-2xl">{welcome}</h1>
                <p class="text-muted">"Here's what's happening at the clinic today."</p>
            </div>

            <ErrorMessage error=error on_dismiss=Callback::new(move |_| error.set(None))/>

            <PageHeader title="Overview"/>
            <div class="stat-grid">
                <StatCard label="Patients"
                    value=card(|o| figure(o.patients, |n| n.to_string()))/>
                <StatCard label="Doctors"
                    value=card(|o| figure(o.doctors, |n| n.to_string()))/>
                <StatCard label="Appointments" accent="accent-info"
                    value=card(|o| figure(o.appointments, |s| s.total().to_string()))/>
                <StatCard label="Revenue" accent="accent-success"
                    value=card(|o| figure(o.billing, |b| format_money_compact(b.total_paid)))/>
            </div>

            <div class="stat-grid">
                <StatCard label="Scheduled"
                    value=card(|o| figure(o.appointments, |s| s.scheduled.to_string()))/>
                <StatCard label="Completed"
                    value=card(|o| figure(o.appointments, |s| s.completed.to_string()))/>
                <StatCard label="Outstanding" accent="accent-warning"
                    value=card(|o| figure(o.billing, |b| format_money_compact(b.total_pending)))/>
                <StatCard label="Overdue" accent="accent-danger"
                    value=card(|o| figure(o.billing, |b| format_money_compact(b.overdue)))/>
            </div>

            <div class="quick-links">
                <A href=AppRoute::Patients.path() attr:class="btn-secondary">"Manage Patients"</A>
                <A href=AppRoute::Appointments.path() attr:class="btn-secondary">"View Appointments"</A>
                <A href=AppRoute::Billing.path() attr:class="btn-secondary">"Open Billing"</A>
            </div>
        </div>
    }
}
