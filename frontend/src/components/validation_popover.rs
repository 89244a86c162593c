use leptos::*;

use crate::utils::forms::FieldErrors;

/// Floating summary of every field error on the current form.
#[component]
pub fn ValidationPopover(
    #[prop(into)] errors: Signal<FieldErrors>,
    #[prop(optional)] on_close: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <Show when=move || errors.with(|e| !e.is_empty())>
            <div
                class="fixed top-4 right-4 z-[80] w-80 rounded-lg border border-status-error-border bg-status-error-bg text-status-error-text shadow-lg p-4"
                role="alert"
            >
                <div class="flex items-start justify-between gap-2">
                    <p class="font-semibold text-sm">
                        {move || {
                            let count = errors.with(FieldErrors::len);
                            if count == 1 {
                                "Please fix 1 field".to_string()
                            } else {
                                format!("Please fix {} fields", count)
                            }
                        }}
                    </p>
                    {on_close.map(|close| view! {
                        <button
                            type="button"
                            aria-label="Dismiss"
                            class="text-status-error-text"
                            on:click=move |_| close.call(())
                        >
                            {"✕"}
                        </button>
                    })}
                </div>
                <ul class="mt-2 list-disc list-inside text-sm space-y-1">
                    {move || errors.get().messages().into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
                </ul>
            </div>
        </Show>
    }
}

#[component]
pub fn FieldErrorText(
    #[prop(into)] errors: Signal<FieldErrors>,
    field: &'static str,
) -> impl IntoView {
    move || {
        errors.with(|e| e.get(field).map(str::to_string)).map(|message| {
            view! { <p class="mt-1 text-xs text-status-error-text">{message}</p> }
        })
    }
}
