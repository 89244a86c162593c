use leptos::{ev::SubmitEvent, *};

use crate::{
    api::{ApiError, LoginRequest},
    pages::login::{form::LoginForm, utils},
    state::session::{self, SessionUser},
    utils::{browser, forms::FieldErrors},
};

/// Routes a finished sign-in: the landing page on success, the error otherwise.
pub fn apply_login_result(
    result: Result<SessionUser, ApiError>,
    password: RwSignal<String>,
    api_error: RwSignal<Option<ApiError>>,
) -> Option<&'static str> {
    match result {
        Ok(user) => {
            api_error.set(None);
            password.set(String::new());
            Some(utils::landing_path(user.role))
        }
        Err(err) => {
            log::warn!("sign-in failed: {}", err);
            password.set(String::new());
            api_error.set(Some(err));
            None
        }
    }
}

#[component]
pub fn LoginPanel() -> impl IntoView {
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::default());
    let api_error = create_rw_signal(None::<ApiError>);
    let (session, _) = session::use_session();

    let login_action = session::use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            if let Some(path) = apply_login_result(result, password, api_error) {
                browser::navigate_to(path);
            }
        }
    });

    // A restored session skips the form.
    create_effect(move |_| {
        if let Some(role) = session.with(|s| if s.loading { None } else { s.role() }) {
            browser::navigate_to(utils::landing_path(role));
        }
    });

    let handle_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if let Err(field_errors) = utils::validate_credentials(&email_value, &password_value) {
            errors.set(field_errors);
            return;
        }
        errors.set(FieldErrors::default());
        api_error.set(None);
        login_action.dispatch(LoginRequest {
            email: email_value,
            password: password_value,
        });
    });

    view! {
        <LoginForm
            email=email.into()
            password=password.into()
            errors=errors.into()
            api_error=api_error.into()
            pending=pending.into()
            on_email_input=Callback::new(move |value| email.set(value))
            on_password_input=Callback::new(move |value| password.set(value))
            on_submit=handle_submit
        />
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn login_form_renders_fields() {
        let html = render_to_string(|| view! { <LoginPanel/> });
        assert!(html.contains("Sign in to People Planner"));
        assert!(html.contains("id=\"email\""));
        assert!(html.contains("id=\"password\""));
    }
}
