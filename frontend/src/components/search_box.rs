use leptos::*;

/// Text input that reports its value when the form is submitted.
#[component]
pub fn SearchBox(
    #[prop(into)] initial: MaybeSignal<String>,
    on_search: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let draft = create_rw_signal(initial.get_untracked());
    let placeholder = if placeholder.is_empty() {
        "Search".to_string()
    } else {
        placeholder
    };

    view! {
        <form
            class="flex items-center gap-2"
            role="search"
            on:submit=move |ev| {
                ev.prevent_default();
                on_search.call(draft.get_untracked());
            }
        >
            <input
                type="search"
                class="w-64 rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm"
                placeholder=placeholder.clone()
                aria-label=placeholder
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <button
                type="submit"
                class="inline-flex items-center rounded-md px-3 py-2 text-sm bg-surface-muted text-fg hover:bg-surface-elevated"
            >
                <i class="fas fa-search mr-1"></i>
                "Search"
            </button>
        </form>
    }
}
