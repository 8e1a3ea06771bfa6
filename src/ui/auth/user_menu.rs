//! User menu component
//!
//! Header widget showing who is signed in, with a dropdown holding the
//! account details and the logout action.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::context::use_session;
use crate::core::User;
use crate::core::guard::AppRoute;
use crate::ui::icon::{Icon, icons};

/// User menu for the header
#[component]
pub fn UserMenu() -> impl IntoView {
    let session = use_session();
    let menu_open = RwSignal::new(false);

    let handle_logout = move |_| {
        menu_open.set(false);
        session.logout();
        let navigate = use_navigate();
        navigate(AppRoute::Login.path(), Default::default());
    };

    view! {
        <div class="user-menu">
            {move || match session.user() {
                None => view! {
                    // Token restored but profile not fetched yet
                    <div class="avatar avatar-placeholder"></div>
                }.into_any(),
                Some(user) => {
                    let details = user.clone();
                    view! {
                        <button
                            class="user-menu-trigger"
                            aria-haspopup="menu"
                            on:click=move |_| menu_open.update(|v| *v = !*v)
                        >
                            <UserAvatar user=user.clone()/>
                            <span class="user-menu-name">
                                <span class="font-medium">{user.full_name.clone()}</span>
                                <span class="text-muted text-xs">{user.role.to_string()}</span>
                            </span>
                        </button>

                        <Show when=move || menu_open.get()>
                            <div class="dropdown" role="menu">
                                <div class="dropdown-header">
                                    <p class="font-medium">{details.username.clone()}</p>
                                    <p class="text-muted text-xs">{details.email.clone()}</p>
                                </div>
                                <button class="dropdown-item dropdown-item-danger" on:click=handle_logout>
                                    <Icon name=icons::LOGOUT class="icon-sm"/>
                                    "Sign Out"
                                </button>
                            </div>
                        </Show>
                    }.into_any()
                }
            }}
        </div>
    }
}

/// Palette slot picked from the name, so a user keeps the same color
fn avatar_color(name: &str) -> &'static str {
    const COLORS: [&str; 6] = [
        "avatar-blue",
        "avatar-green",
        "avatar-amber",
        "avatar-rose",
        "avatar-violet",
        "avatar-teal",
    ];
    let hash = name
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_add(b as u32));
    COLORS[(hash as usize) % COLORS.len()]
}

/// Round avatar with the user's initial
#[component]
pub fn UserAvatar(user: User) -> impl IntoView {
    view! {
        <div class=format!("avatar {}", avatar_color(&user.username))>
            {user.initial()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_color_is_stable() {
        assert_eq!(avatar_color("jdoe"), avatar_color("jdoe"));
        assert!(avatar_color("").starts_with("avatar-"));
    }
}
