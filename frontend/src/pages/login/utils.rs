use crate::{api::Role, router::paths, utils::forms::FieldErrors};

/// Field-level checks before any request is sent.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require("email", email, "Email is required");
    if !email.trim().is_empty() && !email.contains('@') {
        errors.add("email", "Enter a valid email address");
    }
    if password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors.into_result(|| ())
}

/// Carers start on their day plan, everyone else on the HR home page.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Carer => paths::PLANNER,
        _ => paths::HR_HOME,
    }
}
