use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::core::guard::{AppRoute, NAV_ITEMS, NavItem, is_active};
use crate::ui::shell::use_shell_state;
use crate::ui::{Icon, icons};

fn nav_icon(route: AppRoute) -> &'static str {
    match route {
        AppRoute::Patients => icons::USERS,
        AppRoute::Doctors => icons::STETHOSCOPE,
        AppRoute::Appointments => icons::CALENDAR,
        AppRoute::Billing => icons::CREDIT_CARD,
        _ => icons::DASHBOARD,
    }
}

/// Navigation between the resource pages. The entry matching the current
/// path is highlighted; collapsing hides the labels.
#[component]
pub fn Sidebar() -> impl IntoView {
    let shell = use_shell_state();
    let pathname = use_location().pathname;
    let collapsed = move || shell.sidebar_collapsed.get();

    view! {
        <aside class="sidebar" class:collapsed=collapsed>
            <nav class="sidebar-nav">
                {NAV_ITEMS
                    .into_iter()
                    .map(|NavItem { route, label }| {
                        let active = move || pathname.with(|path| is_active(route, path));
                        view! {
                            <A
                                href=route.path()
                                attr:class=move || {
                                    if active() { "nav-link nav-link-active" } else { "nav-link" }
                                }
                                attr:title=label
                            >
                                <Icon name=nav_icon(route)/>
                                <Show when=move || !collapsed()>
                                    <span class="nav-label">{label}</span>
                                </Show>
                            </A>
                        }
                    })
                    .collect_view()}
            </nav>

            <button
                type="button"
                class="sidebar-toggle"
                title=move || if collapsed() { "Expand sidebar" } else { "Collapse sidebar" }
                on:click=move |_| shell.toggle_sidebar()
            >
                {move || {
                    let name = if collapsed() { icons::MENU } else { icons::CHEVRON_LEFT };
                    view! { <Icon name=name/> }
                }}
            </button>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_nav_item_has_its_own_icon() {
        let mut seen: Vec<&str> = NAV_ITEMS.iter().map(|item| nav_icon(item.route)).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), NAV_ITEMS.len());
    }
}
