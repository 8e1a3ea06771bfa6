use leptos::prelude::*;

/// SVG icon served from `/icons/{name}.svg`
#[component]
pub fn Icon(
    /// Icon file name without the `.svg` extension
    name: &'static str,
    /// CSS classes
    #[prop(default = "icon")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=""
            aria-hidden="true"
            draggable=false
        />
    }
}

/// Icons shipped in `public/icons`
pub mod icons {
    pub const DASHBOARD: &str = "dashboard";
    pub const USERS: &str = "users";
    pub const STETHOSCOPE: &str = "stethoscope";
    pub const CALENDAR: &str = "calendar";
    pub const CREDIT_CARD: &str = "credit-card";
    pub const MENU: &str = "menu";
    pub const CHEVRON_LEFT: &str = "chevron-left";
    pub const PLUS: &str = "plus";
    pub const EDIT: &str = "edit";
    pub const TRASH: &str = "trash";
    pub const X: &str = "x";
    pub const ALERT_CIRCLE: &str = "alert-circle";
    pub const LOGOUT: &str = "logout";
    pub const HEART_PULSE: &str = "heart-pulse";
}
