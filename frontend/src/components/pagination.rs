use leptos::*;

use crate::api::PAGE_LIMIT_OPTIONS;

/// Page numbers to show around `current`, at most `width` of them.
pub fn page_window(current: u32, total: u32, width: u32) -> Vec<u32> {
    let total = total.max(1);
    let width = width.clamp(1, total);
    let current = current.clamp(1, total);
    let half = width / 2;
    let mut start = current.saturating_sub(half).max(1);
    if start + width - 1 > total {
        start = total + 1 - width;
    }
    (start..start + width).collect()
}

#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    #[prop(into)] limit: Signal<u32>,
    on_page: Callback<u32>,
    on_limit: Callback<u32>,
    #[prop(default = 5)] window: u32,
) -> impl IntoView {
    let at_first = move || page.get() <= 1;
    let at_last = move || page.get() >= total_pages.get().max(1);

    view! {
        <div class="flex flex-col sm:flex-row items-center justify-between gap-3 py-3">
            <div class="flex items-center gap-2 text-sm text-fg-muted">
                <label for="page-size">"Rows per page"</label>
                <select
                    id="page-size"
                    class="rounded-md border border-form-control-border bg-form-control-bg px-2 py-1"
                    on:change=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                            on_limit.call(value);
                        }
                    }
                >
                    {PAGE_LIMIT_OPTIONS
                        .iter()
                        .map(|size| {
                            let size = *size;
                            view! {
                                <option value=size.to_string() selected=move || limit.get() == size>
                                    {size}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
            <nav class="flex items-center gap-1" aria-label="Pagination">
                <button
                    type="button"
                    class="px-3 py-1 rounded-md text-sm border border-border disabled:opacity-50"
                    disabled=at_first
                    on:click=move |_| on_page.call(page.get_untracked().saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                {move || {
                    let current = page.get();
                    page_window(current, total_pages.get(), window)
                        .into_iter()
                        .map(|number| {
                            let class = if number == current {
                                "px-3 py-1 rounded-md text-sm bg-action-primary-bg text-action-primary-text"
                            } else {
                                "px-3 py-1 rounded-md text-sm border border-border hover:bg-action-ghost-bg-hover"
                            };
                            view! {
                                <button
                                    type="button"
                                    class=class
                                    aria-current=(number == current).then_some("page")
                                    on:click=move |_| on_page.call(number)
                                >
                                    {number}
                                </button>
                            }
                        })
                        .collect_view()
                }}
                <button
                    type="button"
                    class="px-3 py-1 rounded-md text-sm border border-border disabled:opacity-50"
                    disabled=at_last
                    on:click=move |_| on_page.call(page.get_untracked() + 1)
                >
                    "Next"
                </button>
            </nav>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::page_window;

    #[test]
    fn window_centres_on_current_page() {
        assert_eq!(page_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn window_sticks_to_the_edges() {
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_shrinks_to_total_pages() {
        assert_eq!(page_window(2, 3, 5), vec![1, 2, 3]);
        assert_eq!(page_window(1, 0, 5), vec![1]);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn pagination_renders_sizes_and_current_page() {
        let html = render_to_string(move || {
            view! {
                <Pagination
                    page=Signal::derive(|| 2)
                    total_pages=Signal::derive(|| 4)
                    limit=Signal::derive(|| 20)
                    on_page=Callback::new(|_| {})
                    on_limit=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Rows per page"));
        assert!(html.contains("value=\"50\""));
        assert!(html.contains("aria-current=\"page\""));
        assert!(html.contains("Next"));
    }
}
