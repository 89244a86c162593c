use leptos::*;

use crate::{
    api::ApiError,
    components::{common::ButtonVariant, error::InlineErrorMessage, validation_popover::FieldErrorText},
    utils::forms::FieldErrors,
};

const INPUT: &str = "appearance-none relative block w-full px-3 py-2 border border-form-control-border bg-form-control-bg placeholder-fg-muted text-fg rounded-md focus:outline-none focus:ring-2 focus:ring-action-primary-bg sm:text-sm";

#[component]
pub fn LoginForm(
    email: Signal<String>,
    password: Signal<String>,
    errors: Signal<FieldErrors>,
    api_error: Signal<Option<ApiError>>,
    pending: Signal<bool>,
    on_email_input: Callback<String>,
    on_password_input: Callback<String>,
    on_submit: Callback<ev::SubmitEvent>,
) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface-muted py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">"Sign in to People Planner"</h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">"HR and care scheduling"</p>
                </div>
                <form class="mt-8 space-y-4" novalidate=true on:submit=move |ev| on_submit.call(ev)>
                    <div>
                        <label for="email" class="block text-sm font-medium text-fg mb-1">"Email"</label>
                        <input
                            id="email"
                            name="email"
                            type="email"
                            autocomplete="username"
                            class=INPUT
                            prop:value=move || email.get()
                            on:input=move |ev| on_email_input.call(event_target_value(&ev))
                        />
                        <FieldErrorText errors=errors field="email"/>
                    </div>
                    <div>
                        <label for="password" class="block text-sm font-medium text-fg mb-1">"Password"</label>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            autocomplete="current-password"
                            class=INPUT
                            prop:value=move || password.get()
                            on:input=move |ev| on_password_input.call(event_target_value(&ev))
                        />
                        <FieldErrorText errors=errors field="password"/>
                    </div>

                    <InlineErrorMessage error=api_error />

                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class=format!(
                            "w-full flex justify-center py-2 px-4 text-sm font-medium rounded-md disabled:opacity-50 {}",
                            ButtonVariant::Primary.classes(),
                        )
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
