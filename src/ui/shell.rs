//! Authenticated page layout: header, sidebar, main content and footer

use leptos::prelude::*;

use super::footer::Footer;
use super::header::Header;
use super::sidebar::Sidebar;

/// Layout state shared by every authenticated page. Provided once by the
/// app so the sidebar keeps its collapsed state across navigation.
#[derive(Clone, Copy)]
pub struct ShellState {
    pub sidebar_collapsed: RwSignal<bool>,
}

impl ShellState {
    pub fn toggle_sidebar(&self) {
        self.sidebar_collapsed.update(|collapsed| *collapsed = !*collapsed);
    }
}

pub fn provide_shell_state() -> ShellState {
    let state = ShellState {
        sidebar_collapsed: RwSignal::new(false),
    };
    provide_context(state);
    state
}

pub fn use_shell_state() -> ShellState {
    expect_context::<ShellState>()
}

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let shell = use_shell_state();

    view! {
        <div class="app-shell" class:sidebar-collapsed=move || shell.sidebar_collapsed.get()>
            <Sidebar/>
            <div class="app-column">
                <Header/>
                <main class="app-main">{children()}</main>
                <Footer/>
            </div>
        </div>
    }
}
