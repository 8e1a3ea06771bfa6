//! Route table and the authentication guard decision
//!
//! The guard is a pure function of the session so it can be tested without a
//! browser. `ui::guard::RequireAuth` re-runs it whenever the session signal
//! changes. It only decides what to show; the backend authorizes every call.

use super::session::Session;

/// Every route the application knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Root,
    Login,
    Register,
    Dashboard,
    Patients,
    Doctors,
    Appointments,
    Billing,
}

impl AppRoute {
    pub fn path(&self) -> &'static str {
        match self {
            AppRoute::Root => "/",
            AppRoute::Login => "/login",
            AppRoute::Register => "/register",
            AppRoute::Dashboard => "/dashboard",
            AppRoute::Patients => "/patients",
            AppRoute::Doctors => "/doctors",
            AppRoute::Appointments => "/appointments",
            AppRoute::Billing => "/billing",
        }
    }

    /// Login and register are reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, AppRoute::Login | AppRoute::Register)
    }
}

/// Outcome of running the guard for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(AppRoute),
}

/// Decide whether `route` may render for `session`.
///
/// No return path is kept: after logging in the user always lands on the
/// dashboard.
pub fn guard(session: &Session, route: AppRoute) -> GuardDecision {
    match route {
        AppRoute::Root => GuardDecision::Redirect(landing(session)),
        r if r.is_public() || session.is_authenticated() => GuardDecision::Render,
        _ => GuardDecision::Redirect(AppRoute::Login),
    }
}

/// Where `/` and the public pages send a visitor
pub fn landing(session: &Session) -> AppRoute {
    if session.is_authenticated() {
        AppRoute::Dashboard
    } else {
        AppRoute::Login
    }
}

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub route: AppRoute,
    pub label: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        route: AppRoute::Dashboard,
        label: "Dashboard",
    },
    NavItem {
        route: AppRoute::Patients,
        label: "Patients",
    },
    NavItem {
        route: AppRoute::Doctors,
        label: "Doctors",
    },
    NavItem {
        route: AppRoute::Appointments,
        label: "Appointments",
    },
    NavItem {
        route: AppRoute::Billing,
        label: "Billing",
    },
];

/// Whether the sidebar entry for `route` is the active one for `path`
pub fn is_active(route: AppRoute, path: &str) -> bool {
    path == route.path() || path.starts_with(&format!("{}/", route.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> Session {
        Session {
            token: Some("tok123".to_string()),
            current_user: None,
            last_error: None,
        }
    }

    #[test]
    fn test_unauthenticated_visitor_is_sent_to_login() {
        let session = Session::default();

        for route in [
            AppRoute::Dashboard,
            AppRoute::Patients,
            AppRoute::Doctors,
            AppRoute::Appointments,
            AppRoute::Billing,
        ] {
            assert_eq!(
                guard(&session, route),
                GuardDecision::Redirect(AppRoute::Login),
                "{:?} should require a session",
                route
            );
        }
    }

    #[test]
    fn test_public_routes_always_render() {
        assert_eq!(
            guard(&Session::default(), AppRoute::Login),
            GuardDecision::Render
        );
        assert_eq!(
            guard(&Session::default(), AppRoute::Register),
            GuardDecision::Render
        );
        assert_eq!(guard(&logged_in(), AppRoute::Login), GuardDecision::Render);
    }

    #[test]
    fn test_token_without_cached_user_renders() {
        // Token restored from storage, profile not fetched yet
        assert_eq!(
            guard(&logged_in(), AppRoute::Patients),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_root_redirect_depends_on_session() {
        assert_eq!(
            guard(&Session::default(), AppRoute::Root),
            GuardDecision::Redirect(AppRoute::Login)
        );
        assert_eq!(
            guard(&logged_in(), AppRoute::Root),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
    }

    #[test]
    fn test_guard_follows_logout() {
        let mut session = logged_in();
        assert_eq!(
            guard(&session, AppRoute::Billing),
            GuardDecision::Render
        );

        session = Session::default();
        assert_eq!(
            guard(&session, AppRoute::Billing),
            GuardDecision::Redirect(AppRoute::Login)
        );
    }

    #[test]
    fn test_nav_items_are_protected() {
        assert!(NAV_ITEMS.iter().all(|item| !item.route.is_public()));
        assert_eq!(NAV_ITEMS[0].route, AppRoute::Dashboard);
    }

    #[test]
    fn test_is_active() {
        assert!(is_active(AppRoute::Patients, "/patients"));
        assert!(is_active(AppRoute::Patients, "/patients/12"));
        assert!(!is_active(AppRoute::Patients, "/patientsx"));
        assert!(!is_active(AppRoute::Dashboard, "/billing"));
    }
}
