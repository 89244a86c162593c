use leptos::ev::KeyboardEvent;
use leptos::*;

use super::common::ButtonVariant;

/// Modal wrapper for create and edit forms. The body is supplied by the page.
#[component]
pub fn FormDialog(
    #[prop(into)] is_open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] submitting: MaybeSignal<bool>,
    #[prop(optional, into)] submit_label: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let submitting = Signal::derive(move || submitting.get());
    let submit_label = submit_label.unwrap_or_else(|| "Save".to_string());

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_cancel.call(())
                ></button>
                <form
                    class="relative z-[61] w-full max-w-2xl max-h-[90vh] overflow-y-auto rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    novalidate=true
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_cancel.call(());
                        }
                    }
                    on:submit=move |ev| {
                        ev.prevent_default();
                        on_submit.call(());
                    }
                >
                    <div class="flex items-center justify-between">
                        <h2 class="text-lg font-semibold text-fg">{move || title.get()}</h2>
                        <button
                            type="button"
                            aria-label="Close"
                            class="text-fg-muted hover:text-fg"
                            on:click=move |_| on_cancel.call(())
                        >
                            {"✕"}
                        </button>
                    </div>
                    <div class="space-y-4">{children()}</div>
                    <div class="flex justify-end gap-2 pt-2">
                        <button
                            type="button"
                            class=ButtonVariant::Secondary.button_class()
                            on:click=move |_| on_cancel.call(())
                        >
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class=ButtonVariant::Primary.button_class()
                            disabled=move || submitting.get()
                        >
                            {submit_label.clone()}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn form_dialog_wraps_children_with_actions() {
        let html = render_to_string(move || {
            view! {
                <FormDialog
                    is_open=Signal::derive(|| true)
                    title=Signal::derive(|| "Add Department".to_string())
                    on_submit=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                >
                    <input id="name" />
                </FormDialog>
            }
        });
        assert!(html.contains("Add Department"));
        assert!(html.contains("id=\"name\""));
        assert!(html.contains("Save"));
        assert!(html.contains("Cancel"));
    }
}
