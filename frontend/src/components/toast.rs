use leptos::*;

use crate::state::toast::{use_toasts, ToastKind};

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();
    let items = toasts.items();

    view! {
        <div class="fixed bottom-4 right-4 z-[90] flex flex-col gap-2 w-80" aria-live="polite">
            <For
                each=move || items.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let icon = match toast.kind {
                        ToastKind::Success => "fas fa-check-circle",
                        ToastKind::Error => "fas fa-exclamation-circle",
                        ToastKind::Info => "fas fa-info-circle",
                    };
                    view! {
                        <div
                            class=format!("flex items-start gap-3 rounded-md border px-4 py-3 shadow {}", toast.kind.class())
                            role="status"
                        >
                            <i class=icon></i>
                            <p class="flex-1 text-sm">{toast.message}</p>
                            <button
                                type="button"
                                aria-label="Dismiss"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                {"✕"}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::toast::provide_toasts;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn toast_host_renders_queued_messages() {
        let html = render_to_string(move || {
            let toasts = provide_toasts();
            toasts.success("Department saved");
            toasts.error("Could not delete");
            view! { <ToastHost /> }
        });
        assert!(html.contains("Department saved"));
        assert!(html.contains("Could not delete"));
        assert!(html.contains("fa-exclamation-circle"));
    }
}
