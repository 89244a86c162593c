use crate::api::ApiError;
use leptos::{ev, *};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub type OptionsResource = Resource<u32, Result<Vec<SelectOption>, ApiError>>;

/// Sorted by label, ties broken by value.
pub fn sorted_options(mut options: Vec<SelectOption>) -> Vec<SelectOption> {
    options.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.value.cmp(&b.value)));
    options
}

#[component]
pub fn OptionSelect(
    #[prop(into)] id: String,
    options: OptionsResource,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] invalid: MaybeSignal<bool>,
) -> impl IntoView {
    let loading = options.loading();
    let placeholder = if placeholder.is_empty() {
        "Select...".to_string()
    } else {
        placeholder
    };

    let options_view = move || {
        if loading.get() {
            return view! { <option value="" disabled>{"Loading..."}</option> }.into_view();
        }
        match options.get() {
            None => view! { <option value="" disabled>{"Loading..."}</option> }.into_view(),
            Some(Err(_)) => {
                view! { <option value="" disabled>{"Could not load options"}</option> }.into_view()
            }
            Some(Ok(list)) => sorted_options(list)
                .into_iter()
                .map(|option| {
                    let selected = value.get_untracked() == option.value;
                    view! { <option value=option.value selected=selected>{option.label}</option> }
                })
                .collect_view(),
        }
    };

    view! {
        <select
            id=id
            class=move || {
                if invalid.get() {
                    "w-full rounded-md border border-status-error-border bg-form-control-bg px-3 py-2 text-sm"
                } else {
                    "w-full rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm"
                }
            }
            prop:value=move || value.get()
            on:change=move |ev: ev::Event| on_change.call(event_target_value(&ev))
        >
            <option value="">{placeholder.clone()}</option>
            {options_view}
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_sort_by_label_then_value() {
        let sorted = sorted_options(vec![
            SelectOption::new("2", "Zed"),
            SelectOption::new("3", "Amy"),
            SelectOption::new("1", "Amy"),
        ]);
        let values: Vec<_> = sorted.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["1", "3", "2"]);
    }
}
