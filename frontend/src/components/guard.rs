use crate::{
    api::Role, components::layout::LoadingSpinner, router::LOGIN_PATH,
    state::session::use_session, utils::browser,
};
use leptos::*;

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_session();
    let is_authenticated = create_memo(move |_| session.with(|s| s.is_authenticated));
    let is_loading = create_memo(move |_| session.with(|s| s.loading));
    create_effect(move |_| {
        let state = session.get();
        if state.loading || state.is_authenticated {
            return;
        }
        browser::navigate_to(LOGIN_PATH);
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

/// Renders children only for the listed roles. Other signed-in users see a
/// short notice instead of being redirected.
#[component]
pub fn RequireRole(roles: &'static [Role], children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_session();
    let allowed = create_memo(move |_| role_allowed(session.with(|s| s.role()), roles));
    view! {
        <Show
            when=move || allowed.get()
            fallback=|| view! {
                <p class="text-sm text-fg-muted py-8 text-center">
                    "You do not have access to this page."
                </p>
            }
        >
            {children()}
        </Show>
    }
}

fn role_allowed(role: Option<Role>, roles: &[Role]) -> bool {
    role.map(|r| roles.contains(&r)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{role_allowed, should_render_children};
    use crate::api::Role;

    #[test]
    fn guard_blocks_until_authenticated() {
        assert!(!should_render_children(false, true));
        assert!(!should_render_children(false, false));
        assert!(!should_render_children(true, true));
        assert!(should_render_children(true, false));
    }

    #[test]
    fn role_guard_checks_membership() {
        let reviewers = [Role::Admin, Role::Hr];
        assert!(role_allowed(Some(Role::Hr), &reviewers));
        assert!(!role_allowed(Some(Role::Carer), &reviewers));
        assert!(!role_allowed(None, &reviewers));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::{RequireAuth, RequireRole};
    use crate::api::Role;
    use crate::state::session::{SessionContext, SessionState};
    use crate::test_support::helpers::{admin_user, carer_user, provide_session};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_session(Some(admin_user()));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_unauthenticated() {
        let html = render_to_string(move || {
            provide_session(None);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_auth_shows_loading_spinner_while_loading() {
        let html = render_to_string(move || {
            provide_context::<SessionContext>(create_signal(SessionState {
                loading: true,
                ..SessionState::default()
            }));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("animate-spin"));
    }

    #[test]
    fn require_role_hides_review_pages_from_carers() {
        const REVIEWERS: &[Role] = &[Role::Admin, Role::Hr];
        let html = render_to_string(move || {
            provide_session(Some(carer_user()));
            view! {
                <RequireRole roles=REVIEWERS>
                    {|| view! { <div>"review-queue"</div> }}
                </RequireRole>
            }
        });
        assert!(!html.contains("review-queue"));
        assert!(html.contains("You do not have access"));
    }
}
