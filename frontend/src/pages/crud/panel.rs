use crate::{
    api::HrRecord,
    components::{
        common::ButtonVariant,
        confirm_dialog::ConfirmDialog,
        empty_state::EmptyTableRow,
        error::InlineErrorMessage,
        form_dialog::FormDialog,
        layout::{LoadingSpinner, PageHeader},
        pagination::Pagination,
        search_box::SearchBox,
        status_toggle::StatusToggle,
        validation_popover::ValidationPopover,
    },
    utils::forms::FieldErrors,
};
use leptos::*;

use super::{
    form::RecordForm,
    view_model::{CrudViewModel, DialogMode},
};

pub type Cells<T> = fn(&T) -> View;
pub type Fields<F> = fn(RwSignal<F>, Signal<FieldErrors>) -> View;

const CELL: &str = "px-4 py-2 text-sm text-fg whitespace-nowrap";
const HEADER_CELL: &str = "px-4 py-2 text-left text-xs font-semibold uppercase tracking-wide text-fg-muted";

fn row_view<F: RecordForm>(
    vm: CrudViewModel<F>,
    record: F::Record,
    cells: Cells<F::Record>,
    with_status: bool,
) -> View {
    let id = record.id().to_string();
    let label = record.label().to_string();
    let status_cell = with_status.then(|| {
        let toggle = record.status().map(|status| {
            let id = id.clone();
            view! {
                <StatusToggle
                    status=status
                    on_toggle=Callback::new(move |next| vm.toggle_status(id.clone(), next))
                    label=label.clone()
                />
            }
        });
        view! { <td class=CELL>{toggle}</td> }
    });
    let edit_record = record.clone();
    let delete_record = record.clone();

    view! {
        <tr class="hover:bg-surface-muted">
            {cells(&record)}
            {status_cell}
            <td class="px-4 py-2 text-right whitespace-nowrap space-x-2">
                <button
                    type="button"
                    class="text-sm text-link hover:underline"
                    aria-label=format!("Edit {}", label)
                    on:click=move |_| vm.open_edit(&edit_record)
                >
                    "Edit"
                </button>
                <button
                    type="button"
                    class="text-sm text-status-error-text hover:underline"
                    aria-label=format!("Delete {}", label)
                    on:click=move |_| vm.request_delete(&delete_record)
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
    .into_view()
}

/// Search, table, pagination and the create/edit/delete dialogs for one
/// record type. Pages supply the cells and the form fields.
#[component]
pub fn CrudPanel<F: RecordForm>(
    vm: CrudViewModel<F>,
    #[prop(into)] title: String,
    columns: &'static [&'static str],
    cells: Cells<F::Record>,
    fields: Fields<F>,
    #[prop(default = true)] with_status: bool,
    #[prop(optional, into)] search_placeholder: String,
    #[prop(optional)] toolbar: Option<View>,
    /// Send "Add" to a dedicated page instead of the dialog.
    #[prop(optional)] create_href: Option<&'static str>,
) -> impl IntoView {
    let noun = vm.noun;
    let rows = vm.rows();
    let loading = vm.list.loading();
    let span = columns.len() + usize::from(with_status) + 1;
    let errors: Signal<FieldErrors> = vm.errors.into();

    let dialog_open = Signal::derive(move || vm.dialog.with(Option::is_some));
    let dialog_title = Signal::derive(move || match vm.dialog.get() {
        Some(DialogMode::Edit(_)) => format!("Edit {}", noun),
        _ => format!("Add {}", noun),
    });
    let delete_open = Signal::derive(move || vm.pending_delete.with(Option::is_some));
    let delete_message = Signal::derive(move || {
        vm.pending_delete.with(|pending| {
            pending
                .as_ref()
                .map(|p| format!("Delete \"{}\"? This cannot be undone.", p.label))
                .unwrap_or_default()
        })
    });

    let add_class = ButtonVariant::Primary.button_class();
    let add_button = match create_href {
        Some(href) => view! {
            <a href=href class=add_class>
                <i class="fas fa-plus mr-2" aria-hidden="true"></i>
                {format!("Add {}", noun)}
            </a>
        }
        .into_view(),
        None => view! {
            <button type="button" class=add_class on:click=move |_| vm.open_create()>
                <i class="fas fa-plus mr-2" aria-hidden="true"></i>
                {format!("Add {}", noun)}
            </button>
        }
        .into_view(),
    };

    view! {
        <section class="space-y-4">
            <PageHeader title=title actions=add_button/>
            <div class="flex flex-col md:flex-row md:items-center gap-3">
                <SearchBox
                    initial=vm.query.with_untracked(|q| q.search_term.clone())
                    on_search=Callback::new(move |term| vm.search(term))
                    placeholder=search_placeholder
                />
                {toolbar}
            </div>
            <InlineErrorMessage error=vm.load_error()/>
            <div class="overflow-x-auto rounded-lg border border-border bg-surface-elevated">
                <table class="min-w-full divide-y divide-border">
                    <thead class="bg-surface-muted">
                        <tr>
                            {columns
                                .iter()
                                .map(|column| view! { <th scope="col" class=HEADER_CELL>{*column}</th> })
                                .collect_view()}
                            {with_status.then(|| view! { <th scope="col" class=HEADER_CELL>"Status"</th> })}
                            <th scope="col" class=HEADER_CELL>
                                <span class="sr-only">"Actions"</span>
                            </th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        {move || {
                            let rows = rows.get();
                            if rows.is_empty() {
                                view! { <EmptyTableRow columns=span/> }.into_view()
                            } else {
                                rows.into_iter()
                                    .map(|record| row_view(vm, record, cells, with_status))
                                    .collect_view()
                            }
                        }}
                    </tbody>
                </table>
            </div>
            <Show when=move || loading.get()>
                <LoadingSpinner/>
            </Show>
            <Pagination
                page=Signal::derive(move || vm.query.with(|q| q.page))
                total_pages=vm.total_pages()
                limit=Signal::derive(move || vm.query.with(|q| q.limit))
                on_page=Callback::new(move |page| vm.go_to_page(page))
                on_limit=Callback::new(move |limit| vm.set_limit(limit))
            />
            <FormDialog
                is_open=dialog_open
                title=dialog_title
                on_submit=Callback::new(move |_| vm.submit())
                on_cancel=Callback::new(move |_| vm.close_dialog())
                submitting=vm.save_action.pending()
            >
                <InlineErrorMessage error=vm.api_error/>
                {fields(vm.draft, errors)}
            </FormDialog>
            <ValidationPopover
                errors=errors
                on_close=Callback::new(move |_| vm.errors.set(FieldErrors::default()))
            />
            <ConfirmDialog
                is_open=delete_open
                title=format!("Delete {}", noun)
                message=delete_message
                on_confirm=Callback::new(move |_| vm.confirm_delete())
                on_cancel=Callback::new(move |_| vm.cancel_delete())
                confirm_label="Delete"
                destructive=true
            />
        </section>
    }
}

/// Wraps a labelled form control with its inline error.
#[component]
pub fn Field(
    #[prop(into)] label: String,
    #[prop(into)] id: String,
    errors: Signal<FieldErrors>,
    field: &'static str,
    #[prop(optional)] required: bool,
    children: Children,
) -> impl IntoView {
    use crate::components::validation_popover::FieldErrorText;

    view! {
        <div>
            <label for=id class="block text-sm font-medium text-fg mb-1">
                {label}
                {required.then(|| view! { <span class="text-status-error-text">" *"</span> })}
            </label>
            {children()}
            <FieldErrorText errors=errors field=field/>
        </div>
    }
}

pub fn input_class(invalid: bool) -> &'static str {
    if invalid {
        "w-full rounded-md border border-status-error-border bg-form-control-bg px-3 py-2 text-sm"
    } else {
        "w-full rounded-md border border-form-control-border bg-form-control-bg px-3 py-2 text-sm"
    }
}

/// Text input bound to one string field of the draft.
pub fn text_input<F: Clone + 'static>(
    draft: RwSignal<F>,
    errors: Signal<FieldErrors>,
    id: &'static str,
    get: fn(&F) -> String,
    set: fn(&mut F, String),
) -> View {
    view! {
        <input
            id=id
            type="text"
            class=move || input_class(errors.with(|e| e.has(id)))
            prop:value=move || draft.with(get)
            on:input=move |ev| {
                let value = event_target_value(&ev);
                draft.update(|d| set(d, value));
            }
        />
    }
    .into_view()
}
