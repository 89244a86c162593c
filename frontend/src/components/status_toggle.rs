use leptos::*;

use crate::api::RecordStatus;

#[component]
pub fn StatusToggle(
    #[prop(into)] status: MaybeSignal<RecordStatus>,
    on_toggle: Callback<RecordStatus>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] label: String,
) -> impl IntoView {
    let status = Signal::derive(move || status.get());
    let checked = move || status.get().is_active();
    let aria_label = if label.is_empty() {
        "Toggle status".to_string()
    } else {
        format!("Toggle status of {}", label)
    };

    view! {
        <label class="inline-flex items-center gap-2 cursor-pointer">
            <input
                type="checkbox"
                role="switch"
                class="sr-only peer"
                aria-label=aria_label
                prop:checked=checked
                checked=checked
                disabled=move || disabled.get()
                on:change=move |ev| on_toggle.call(RecordStatus::from_checked(event_target_checked(&ev)))
            />
            <span class="relative w-10 h-5 rounded-full bg-surface-muted peer-checked:bg-status-success-text transition-colors after:absolute after:top-0.5 after:left-0.5 after:h-4 after:w-4 after:rounded-full after:bg-surface-elevated after:transition-transform peer-checked:after:translate-x-5"></span>
            <span class="text-xs text-fg-muted">{move || status.get().label()}</span>
        </label>
    }
}
