use leptos::*;

pub const NO_RECORDS: &str = "No records found";

#[component]
pub fn EmptyState(
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] description: Option<String>,
) -> impl IntoView {
    view! {
        <div class="text-center py-12 px-4 rounded-lg border-2 border-dashed border-border-strong bg-surface-muted">
            <i class="fas fa-folder-open text-3xl text-fg-muted" aria-hidden="true"></i>
            <h3 class="mt-2 text-sm font-semibold text-fg">
                {title.unwrap_or_else(|| NO_RECORDS.to_string())}
            </h3>
            {description.map(|desc| view! { <p class="mt-1 text-sm text-fg-muted">{desc}</p> })}
        </div>
    }
}

/// Full-width table row used when a list page has nothing to show.
#[component]
pub fn EmptyTableRow(columns: usize) -> impl IntoView {
    view! {
        <tr>
            <td colspan=columns.to_string() class="px-4 py-8 text-center text-sm text-fg-muted">
                {NO_RECORDS}
            </td>
        </tr>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn empty_state_defaults_to_no_records() {
        let html = render_to_string(|| view! { <EmptyState /> });
        assert!(html.contains(NO_RECORDS));
    }

    #[test]
    fn empty_row_spans_all_columns() {
        let html = render_to_string(|| view! { <table><tbody><EmptyTableRow columns=4 /></tbody></table> });
        assert!(html.contains("colspan=\"4\""));
    }
}
