use crate::{
    api::{ApiError, HrRecord, ListPage, ListQuery, RecordStatus},
    state::toast::{use_toasts, ToastState},
    utils::forms::FieldErrors,
};
use leptos::*;

use super::{
    form::{save_record, RecordForm, SubmitError},
    repository::CrudRepository,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest<F> {
    pub id: Option<String>,
    pub draft: F,
}

pub type ListResource<T> = Resource<(ListQuery, u32), Result<ListPage<T>, ApiError>>;

/// State and actions behind a list page: query, rows, the create/edit
/// dialog and the delete confirmation.
pub struct CrudViewModel<F: RecordForm> {
    pub noun: &'static str,
    pub query: RwSignal<ListQuery>,
    pub reload: RwSignal<u32>,
    pub list: ListResource<F::Record>,
    pub dialog: RwSignal<Option<DialogMode>>,
    pub draft: RwSignal<F>,
    pub errors: RwSignal<FieldErrors>,
    pub api_error: RwSignal<Option<ApiError>>,
    pub pending_delete: RwSignal<Option<PendingDelete>>,
    pub save_action: Action<SaveRequest<F>, Result<F::Record, SubmitError>>,
    pub status_action: Action<(String, RecordStatus), Result<F::Record, ApiError>>,
    pub delete_action: Action<String, Result<(), ApiError>>,
}

impl<F: RecordForm> Clone for CrudViewModel<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: RecordForm> Copy for CrudViewModel<F> {}

/// Stores `next` only when it differs, so an unchanged query never refetches.
pub fn apply_query(query: RwSignal<ListQuery>, next: ListQuery) -> bool {
    if query.with_untracked(|current| *current == next) {
        return false;
    }
    query.set(next);
    true
}

pub fn prepare_submit<F: RecordForm>(
    dialog: Option<DialogMode>,
    draft: F,
) -> Result<SaveRequest<F>, FieldErrors> {
    draft.validate()?;
    let id = match dialog {
        Some(DialogMode::Edit(id)) => Some(id),
        _ => None,
    };
    Ok(SaveRequest { id, draft })
}

/// Id to delete once the user confirms; clears the pending entry.
pub fn take_pending(pending: RwSignal<Option<PendingDelete>>) -> Option<String> {
    let taken = pending.get_untracked().map(|p| p.id);
    pending.set(None);
    taken
}

fn bump(reload: RwSignal<u32>) {
    reload.update(|value| *value = value.wrapping_add(1));
}

#[allow(clippy::too_many_arguments)]
pub fn apply_save_result<T>(
    result: Option<Result<T, SubmitError>>,
    noun: &str,
    dialog: RwSignal<Option<DialogMode>>,
    errors: RwSignal<FieldErrors>,
    api_error: RwSignal<Option<ApiError>>,
    reload: RwSignal<u32>,
    toasts: ToastState,
) {
    let Some(result) = result else {
        return;
    };
    match result {
        Ok(_) => {
            let verb = match dialog.get_untracked() {
                Some(DialogMode::Edit(_)) => "updated",
                _ => "created",
            };
            toasts.success(format!("{} {}", noun, verb));
            dialog.set(None);
            errors.set(FieldErrors::default());
            api_error.set(None);
            bump(reload);
        }
        Err(SubmitError::Invalid(field_errors)) => errors.set(field_errors),
        Err(SubmitError::Api(err)) => {
            log::warn!("saving {} failed: {}", noun, err);
            toasts.error(err.error.clone());
            api_error.set(Some(err));
        }
    }
}

pub fn apply_status_result<T>(
    result: Option<Result<T, ApiError>>,
    reload: RwSignal<u32>,
    toasts: ToastState,
) {
    match result {
        Some(Ok(_)) => {
            toasts.success("Status updated");
            bump(reload);
        }
        Some(Err(err)) => {
            toasts.error(err.error);
        }
        None => {}
    }
}

pub fn apply_delete_result(
    result: Option<Result<(), ApiError>>,
    noun: &str,
    reload: RwSignal<u32>,
    toasts: ToastState,
) {
    match result {
        Some(Ok(())) => {
            toasts.success(format!("{} deleted", noun));
            bump(reload);
        }
        Some(Err(err)) => {
            toasts.error(err.error);
        }
        None => {}
    }
}

impl<F: RecordForm> CrudViewModel<F> {
    pub fn new(noun: &'static str, repository: CrudRepository<F::Record>) -> Self {
        Self::with_query(noun, repository, ListQuery::default())
    }

    pub fn with_query(
        noun: &'static str,
        repository: CrudRepository<F::Record>,
        initial: ListQuery,
    ) -> Self {
        let repository = store_value(repository);
        let toasts = use_toasts();
        let query = create_rw_signal(initial);
        let reload = create_rw_signal(0u32);
        let dialog = create_rw_signal(None::<DialogMode>);
        let draft = create_rw_signal(F::default());
        let errors = create_rw_signal(FieldErrors::default());
        let api_error = create_rw_signal(None::<ApiError>);
        let pending_delete = create_rw_signal(None::<PendingDelete>);

        let list = create_resource(
            move || (query.get(), reload.get()),
            move |(query, _)| {
                let repo = repository.get_value();
                async move { repo.list(&query).await }
            },
        );

        let save_action = create_action(move |request: &SaveRequest<F>| {
            let repo = repository.get_value();
            let request = request.clone();
            async move { save_record(&repo, request.id.as_deref(), &request.draft).await }
        });

        let status_action = create_action(move |(id, status): &(String, RecordStatus)| {
            let repo = repository.get_value();
            let id = id.clone();
            let status = *status;
            async move { repo.set_status(&id, status).await }
        });

        let delete_action = create_action(move |id: &String| {
            let repo = repository.get_value();
            let id = id.clone();
            async move { repo.delete(&id).await }
        });

        // Results only touch signals, so they are applied on host builds too.
        create_isomorphic_effect(move |_| {
            apply_save_result(
                save_action.value().get(),
                noun,
                dialog,
                errors,
                api_error,
                reload,
                toasts,
            );
        });
        create_isomorphic_effect(move |_| {
            apply_status_result(status_action.value().get(), reload, toasts);
        });
        create_isomorphic_effect(move |_| {
            apply_delete_result(delete_action.value().get(), noun, reload, toasts);
        });

        Self {
            noun,
            query,
            reload,
            list,
            dialog,
            draft,
            errors,
            api_error,
            pending_delete,
            save_action,
            status_action,
            delete_action,
        }
    }

    pub fn rows(&self) -> Signal<Vec<F::Record>> {
        let list = self.list;
        Signal::derive(move || {
            list.get()
                .and_then(Result::ok)
                .map(|page| page.result)
                .unwrap_or_default()
        })
    }

    pub fn total_pages(&self) -> Signal<u32> {
        let list = self.list;
        Signal::derive(move || {
            list.with(|result| {
                result
                    .as_ref()
                    .and_then(|r| r.as_ref().ok())
                    .map(ListPage::total_pages)
                    .unwrap_or(1)
            })
        })
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let list = self.list;
        Signal::derive(move || list.get().and_then(Result::err))
    }

    pub fn set_query(&self, next: ListQuery) {
        apply_query(self.query, next);
    }

    pub fn go_to_page(&self, page: u32) {
        self.set_query(self.query.get_untracked().with_page(page));
    }

    pub fn set_limit(&self, limit: u32) {
        self.set_query(self.query.get_untracked().with_limit(limit));
    }

    pub fn search(&self, term: String) {
        self.set_query(self.query.get_untracked().with_search(&term));
    }

    pub fn set_filter(&self, key: &str, value: &str) {
        self.set_query(self.query.get_untracked().with_filter(key, value));
    }

    pub fn open_create(&self) {
        self.draft.set(F::default());
        self.errors.set(FieldErrors::default());
        self.api_error.set(None);
        self.dialog.set(Some(DialogMode::Create));
    }

    pub fn open_edit(&self, record: &F::Record) {
        self.draft.set(F::from_record(record));
        self.errors.set(FieldErrors::default());
        self.api_error.set(None);
        self.dialog.set(Some(DialogMode::Edit(record.id().to_string())));
    }

    pub fn close_dialog(&self) {
        self.dialog.set(None);
        self.errors.set(FieldErrors::default());
    }

    pub fn submit(&self) {
        match prepare_submit(self.dialog.get_untracked(), self.draft.get_untracked()) {
            Ok(request) => {
                self.errors.set(FieldErrors::default());
                self.save_action.dispatch(request);
            }
            Err(errors) => self.errors.set(errors),
        }
    }

    pub fn toggle_status(&self, id: String, status: RecordStatus) {
        self.status_action.dispatch((id, status));
    }

    pub fn request_delete(&self, record: &F::Record) {
        self.pending_delete.set(Some(PendingDelete {
            id: record.id().to_string(),
            label: record.label().to_string(),
        }));
    }

    pub fn confirm_delete(&self) {
        if let Some(id) = take_pending(self.pending_delete) {
            self.delete_action.dispatch(id);
        }
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }
}
