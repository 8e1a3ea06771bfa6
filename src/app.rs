use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::core::guard::AppRoute;
use crate::ui::auth::provide_session_context;
use crate::ui::guard::{PublicOnly, RequireAuth, RootRedirect};
use crate::ui::pages::{
    AppointmentsPage, BillingPage, DashboardPage, DoctorsPage, LoginPage, NotFoundPage,
    PatientsPage, RegisterPage,
};
use crate::ui::shell::provide_shell_state;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    provide_session_context();
    provide_shell_state();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/clinicdesk.css"/>
        <Title text="ClinicDesk - Clinic Management"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("/") view=RootRedirect/>
                <Route
                    path=path!("/login")
                    view=|| view! { <PublicOnly><LoginPage/></PublicOnly> }
                />
                <Route
                    path=path!("/register")
                    view=|| view! { <PublicOnly><RegisterPage/></PublicOnly> }
                />
                <Route
                    path=path!("/dashboard")
                    view=|| view! { <RequireAuth route=AppRoute::Dashboard><DashboardPage/></RequireAuth> }
                />
                <Route
                    path=path!("/patients")
                    view=|| view! { <RequireAuth route=AppRoute::Patients><PatientsPage/></RequireAuth> }
                />
                <Route
                    path=path!("/doctors")
                    view=|| view! { <RequireAuth route=AppRoute::Doctors><DoctorsPage/></RequireAuth> }
                />
                <Route
                    path=path!("/appointments")
                    view=|| view! { <RequireAuth route=AppRoute::Appointments><AppointmentsPage/></RequireAuth> }
                />
                <Route
                    path=path!("/billing")
                    view=|| view! { <RequireAuth route=AppRoute::Billing><BillingPage/></RequireAuth> }
                />
            </Routes>
        </Router>
    }
}
