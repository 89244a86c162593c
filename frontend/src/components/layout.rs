use leptos::*;
use leptos_router::RouterContext;

use crate::{
    components::side_nav::{filter_for_role, hr_menu, planner_menu, NavItem, SideNav},
    router::paths,
    state::session::{use_logout, use_session},
    utils::browser,
};

pub const APP_NAME: &str = "People Planner";

/// Path of the routed page, or the browser location outside a router.
pub fn use_current_path() -> Signal<String> {
    match use_context::<RouterContext>() {
        Some(router) => {
            let pathname = router.pathname();
            Signal::derive(move || pathname.get())
        }
        None => {
            let path = browser::current_path();
            Signal::derive(move || path.clone())
        }
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let (session, _) = use_session();
    let logout = use_logout();
    let user_name = move || session.with(|s| s.user.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let initials = move || {
        session.with(|s| s.user.as_ref().map(|u| u.initials.clone()).unwrap_or_default())
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="px-4 sm:px-6 lg:px-8 flex justify-between items-center h-16">
                <div class="flex items-center gap-6">
                    <h1 class="text-xl font-semibold text-fg">{APP_NAME}</h1>
                    <nav class="hidden md:flex gap-2">
                        <a href=paths::HR_HOME class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                            "HR"
                        </a>
                        <a href=paths::PLANNER class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                            "People Planner"
                        </a>
                    </nav>
                </div>
                <div class="flex items-center gap-3">
                    <span class="hidden sm:inline text-sm text-fg">{user_name}</span>
                    <span
                        class="inline-flex h-9 w-9 items-center justify-center rounded-full bg-action-primary-bg text-action-primary-text text-sm font-semibold"
                        aria-hidden="true"
                    >
                        {initials}
                    </span>
                    <button
                        type="button"
                        class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                        on:click=move |_| logout.call(())
                    >
                        "Log out"
                    </button>
                </div>
            </div>
        </header>
    }
}

#[component]
fn Shell(menu: fn() -> Vec<NavItem>, children: Children) -> impl IntoView {
    let (session, _) = use_session();
    let items = Signal::derive(move || {
        session
            .with(|s| s.role())
            .map(|role| filter_for_role(&menu(), role))
            .unwrap_or_default()
    });
    let current_path = use_current_path();

    view! {
        <div class="min-h-screen bg-surface flex flex-col">
            <Header/>
            <div class="flex flex-1">
                <SideNav items=items current_path=current_path/>
                <main class="flex-1 p-6 overflow-x-auto">{children()}</main>
            </div>
        </div>
    }
}

#[component]
pub fn HrLayout(children: Children) -> impl IntoView {
    view! { <Shell menu=hr_menu>{children()}</Shell> }
}

#[component]
pub fn PeoplePlannerLayout(children: Children) -> impl IntoView {
    view! { <Shell menu=planner_menu>{children()}</Shell> }
}

#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional)] actions: Option<View>,
) -> impl IntoView {
    view! {
        <leptos_meta::Title text=title.clone()/>
        <div class="flex flex-col sm:flex-row sm:items-center justify-between gap-3 mb-4">
            <h2 class="text-2xl font-semibold text-fg">{title}</h2>
            <div class="flex items-center gap-2">{actions}</div>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8" role="progressbar" aria-label="Loading">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-exclamation-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-check-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, carer_user, provide_session};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_shows_user_name_and_initials() {
        let html = render_to_string(move || {
            provide_session(Some(admin_user()));
            view! { <Header /> }
        });
        assert!(html.contains("Alex Admin"));
        assert!(html.contains("AA"));
        assert!(html.contains("Log out"));
    }

    #[test]
    fn hr_layout_renders_children_and_back_office_menu() {
        let html = render_to_string(move || {
            provide_session(Some(admin_user()));
            view! { <HrLayout><div>"child content"</div></HrLayout> }
        });
        assert!(html.contains("child content"));
        assert!(html.contains("Organisation"));
    }

    #[test]
    fn planner_layout_hides_back_office_groups_from_carers() {
        let html = render_to_string(move || {
            provide_session(Some(carer_user()));
            view! { <PeoplePlannerLayout><p>"planner"</p></PeoplePlannerLayout> }
        });
        assert!(html.contains("Care Records"));
        assert!(!html.contains("Service Funders"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="error" />
                    <SuccessMessage message="ok" />
                </div>
            }
        });
        assert!(html.contains("error"));
        assert!(html.contains("ok"));
    }
}
