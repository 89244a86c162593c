use leptos::*;

use crate::{
    api::{ApiClient, ApiError, DocumentDecision, DocumentRequest, DocumentRequestStatus, ListPage},
    components::{
        common::ButtonVariant,
        empty_state::EmptyTableRow,
        error::InlineErrorMessage,
        form_dialog::FormDialog,
        layout::{LoadingSpinner, PageHeader},
        pagination::Pagination,
        validation_popover::ValidationPopover,
    },
    pages::crud::{input_class, text_input, Field, SubmitError},
    state::toast::{use_toasts, ToastState},
    utils::forms::{optional_string, FieldErrors},
};

use super::{requested_on, status_badge, CELL, HEADER_CELL};

const DEFAULT_LIMIT: u32 = 10;
const COLUMNS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewQuery {
    pub status: Option<DocumentRequestStatus>,
    pub page: u32,
    pub limit: u32,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            status: Some(DocumentRequestStatus::Pending),
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ReviewQuery {
    pub fn with_status(self, status: Option<DocumentRequestStatus>) -> Self {
        Self { status, page: 1, ..self }
    }

    pub fn with_page(self, page: u32) -> Self {
        Self { page: page.max(1), ..self }
    }

    pub fn with_limit(self, limit: u32) -> Self {
        Self { limit: limit.max(1), page: 1, ..self }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionForm {
    pub admin_notes: String,
    pub document_url: String,
}

fn is_http_url(raw: &str) -> bool {
    let raw = raw.trim();
    ["https://", "http://"]
        .iter()
        .any(|scheme| raw.len() > scheme.len() && raw.starts_with(scheme))
}

impl DecisionForm {
    /// Approval needs a link to the issued document; rejection never sends one.
    pub fn validate(&self, status: DocumentRequestStatus) -> Result<DocumentDecision, FieldErrors> {
        let mut errors = FieldErrors::new();
        let document_url = if status == DocumentRequestStatus::Approved {
            errors.require("document_url", &self.document_url, "Document URL is required to approve");
            if !self.document_url.trim().is_empty() && !is_http_url(&self.document_url) {
                errors.add("document_url", "Enter a full http(s) URL");
            }
            optional_string(&self.document_url)
        } else {
            None
        };
        errors.into_result(|| DocumentDecision {
            status,
            admin_notes: optional_string(&self.admin_notes),
            document_url,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingDecision {
    pub request: DocumentRequest,
    pub status: DocumentRequestStatus,
}

pub async fn decide(
    api: &ApiClient,
    pending: &PendingDecision,
    form: &DecisionForm,
) -> Result<DocumentRequest, SubmitError> {
    if !pending.request.status.can_transition_to(pending.status) {
        let mut errors = FieldErrors::new();
        errors.add(
            "status",
            format!("{} requests can no longer be changed", pending.request.status.label()),
        );
        return Err(SubmitError::Invalid(errors));
    }
    let decision = form.validate(pending.status).map_err(SubmitError::Invalid)?;
    Ok(api.decide_document_request(&pending.request.id, &decision).await?)
}

pub type ReviewResource = Resource<(ReviewQuery, u32), Result<ListPage<DocumentRequest>, ApiError>>;

#[derive(Clone, Copy)]
pub struct ReviewViewModel {
    pub query: RwSignal<ReviewQuery>,
    pub reload: RwSignal<u32>,
    pub requests: ReviewResource,
    pub deciding: RwSignal<Option<PendingDecision>>,
    pub draft: RwSignal<DecisionForm>,
    pub errors: RwSignal<FieldErrors>,
    pub api_error: RwSignal<Option<ApiError>>,
    pub decide_action: Action<(PendingDecision, DecisionForm), Result<DocumentRequest, SubmitError>>,
}

pub fn apply_decision_result(
    result: Result<DocumentRequest, SubmitError>,
    deciding: RwSignal<Option<PendingDecision>>,
    errors: RwSignal<FieldErrors>,
    api_error: RwSignal<Option<ApiError>>,
    reload: RwSignal<u32>,
    toasts: ToastState,
) {
    match result {
        Ok(request) => {
            log::info!("document request {} {}", request.id, request.status.as_str());
            toasts.success(format!("Request {}", request.status.label().to_lowercase()));
            deciding.set(None);
            errors.set(FieldErrors::default());
            api_error.set(None);
            reload.update(|value| *value = value.wrapping_add(1));
        }
        Err(SubmitError::Invalid(field_errors)) => errors.set(field_errors),
        Err(SubmitError::Api(err)) => {
            toasts.error(err.error.clone());
            api_error.set(Some(err));
        }
    }
}

impl ReviewViewModel {
    pub fn new(api: ApiClient) -> Self {
        let toasts = use_toasts();
        let query = create_rw_signal(ReviewQuery::default());
        let reload = create_rw_signal(0u32);
        let deciding = create_rw_signal(None::<PendingDecision>);
        let draft = create_rw_signal(DecisionForm::default());
        let errors = create_rw_signal(FieldErrors::default());
        let api_error = create_rw_signal(None::<ApiError>);

        let list_api = api.clone();
        let requests = create_resource(
            move || (query.get(), reload.get()),
            move |(query, _)| {
                let api = list_api.clone();
                async move {
                    api.list_document_requests(query.status, query.page, query.limit)
                        .await
                }
            },
        );

        let decide_action = create_action(move |(pending, form): &(PendingDecision, DecisionForm)| {
            let api = api.clone();
            let pending = pending.clone();
            let form = form.clone();
            async move { decide(&api, &pending, &form).await }
        });

        create_effect(move |_| {
            if let Some(result) = decide_action.value().get() {
                apply_decision_result(result, deciding, errors, api_error, reload, toasts);
            }
        });

        Self {
            query,
            reload,
            requests,
            deciding,
            draft,
            errors,
            api_error,
            decide_action,
        }
    }

    fn update_query(&self, next: ReviewQuery) {
        if self.query.with_untracked(|current| *current != next) {
            self.query.set(next);
        }
    }

    pub fn filter_status(&self, raw: &str) {
        let next = self.query.get_untracked().with_status(DocumentRequestStatus::parse(raw));
        self.update_query(next);
    }

    pub fn go_to_page(&self, page: u32) {
        let next = self.query.get_untracked().with_page(page);
        self.update_query(next);
    }

    pub fn set_limit(&self, limit: u32) {
        let next = self.query.get_untracked().with_limit(limit);
        self.update_query(next);
    }

    /// Opens the decision dialog; decided requests stay read-only.
    pub fn open(&self, request: DocumentRequest, status: DocumentRequestStatus) -> bool {
        if !request.status.can_transition_to(status) {
            return false;
        }
        self.draft.set(DecisionForm::default());
        self.errors.set(FieldErrors::default());
        self.api_error.set(None);
        self.deciding.set(Some(PendingDecision { request, status }));
        true
    }

    pub fn close(&self) {
        self.deciding.set(None);
        self.errors.set(FieldErrors::default());
    }

    pub fn submit(&self) {
        let Some(pending) = self.deciding.get_untracked() else {
            return;
        };
        let form = self.draft.get_untracked();
        match form.validate(pending.status) {
            Ok(_) => {
                self.errors.set(FieldErrors::default());
                self.decide_action.dispatch((pending, form));
            }
            Err(field_errors) => self.errors.set(field_errors),
        }
    }

    pub fn rows(&self) -> Signal<Vec<DocumentRequest>> {
        let requests = self.requests;
        Signal::derive(move || {
            requests
                .get()
                .and_then(Result::ok)
                .map(|page| page.result)
                .unwrap_or_default()
        })
    }

    pub fn total_pages(&self) -> Signal<u32> {
        let requests = self.requests;
        Signal::derive(move || {
            requests
                .get()
                .and_then(Result::ok)
                .map(|page| page.total_pages())
                .unwrap_or(1)
        })
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let requests = self.requests;
        Signal::derive(move || requests.get().and_then(Result::err))
    }
}

fn review_row(vm: ReviewViewModel, request: DocumentRequest) -> impl IntoView {
    let actionable = request.status == DocumentRequestStatus::Pending;
    let who = request
        .employee_name
        .clone()
        .unwrap_or_else(|| request.employee_id.clone());
    let actions = actionable.then(|| {
        let approve = request.clone();
        let reject = request.clone();
        view! {
            <div class="flex justify-end gap-2">
                <button
                    type="button"
                    class="text-sm text-status-success-text hover:underline"
                    on:click=move |_| {
                        vm.open(approve.clone(), DocumentRequestStatus::Approved);
                    }
                >
                    "Approve"
                </button>
                <button
                    type="button"
                    class="text-sm text-status-error-text hover:underline"
                    on:click=move |_| {
                        vm.open(reject.clone(), DocumentRequestStatus::Rejected);
                    }
                >
                    "Reject"
                </button>
            </div>
        }
    });
    view! {
        <tr>
            <td class=CELL>{who}</td>
            <td class=CELL>{request.document_type.clone()}</td>
            <td class="px-4 py-2 text-sm text-fg-muted">{request.reason.clone().unwrap_or_default()}</td>
            <td class=CELL>{requested_on(request.created_at.as_deref())}</td>
            <td class=CELL>{status_badge(request.status)}</td>
            <td class=CELL>{actions}</td>
        </tr>
    }
}

fn decision_fields(vm: ReviewViewModel) -> impl IntoView {
    let errors: Signal<FieldErrors> = vm.errors.into();
    let approving = move || {
        vm.deciding
            .with(|d| d.as_ref().map(|p| p.status) == Some(DocumentRequestStatus::Approved))
    };
    view! {
        <InlineErrorMessage error=vm.api_error/>
        <p class="text-sm text-fg-muted">
            {move || {
                vm.deciding.with(|d| {
                    d.as_ref()
                        .map(|p| {
                            let who = p
                                .request
                                .employee_name
                                .clone()
                                .unwrap_or_else(|| p.request.employee_id.clone());
                            format!("{} requested: {}", who, p.request.document_type)
                        })
                        .unwrap_or_default()
                })
            }}
        </p>
        <Show when=approving>
            <Field label="Document URL" id="document_url" errors=errors field="document_url" required=true>
                {text_input(vm.draft, errors, "document_url", |d| d.document_url.clone(), |d, v| d.document_url = v)}
            </Field>
        </Show>
        <Field label="Notes" id="admin_notes" errors=errors field="admin_notes">
            <textarea
                id="admin_notes"
                rows="3"
                class=input_class(false)
                prop:value=move || vm.draft.with(|d| d.admin_notes.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    vm.draft.update(|d| d.admin_notes = value);
                }
            ></textarea>
        </Field>
    }
}

#[component]
pub fn DocumentReviewPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let vm = ReviewViewModel::new(api);
    let rows = vm.rows();
    let loading = vm.requests.loading();
    let errors: Signal<FieldErrors> = vm.errors.into();
    let selected_status = move || vm.query.with(|q| q.status.map(|s| s.as_str()).unwrap_or(""));

    let dialog_open = Signal::derive(move || vm.deciding.with(Option::is_some));
    let dialog_title = Signal::derive(move || {
        match vm.deciding.with(|d| d.as_ref().map(|p| p.status)) {
            Some(DocumentRequestStatus::Approved) => "Approve request".to_string(),
            _ => "Reject request".to_string(),
        }
    });

    let filter = view! {
        <select
            aria-label="Filter by status"
            class=format!("{} md:w-48", input_class(false))
            on:change=move |ev| vm.filter_status(&event_target_value(&ev))
        >
            <option value="" selected=move || selected_status().is_empty()>"All requests"</option>
            {DocumentRequestStatus::ALL
                .into_iter()
                .map(|status| {
                    view! {
                        <option value=status.as_str() selected=move || selected_status() == status.as_str()>
                            {status.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
    .into_view();

    view! {
        <section class="space-y-4">
            <PageHeader title="Document Requests" actions=filter/>
            <InlineErrorMessage error=vm.load_error()/>
            <div class="overflow-x-auto rounded-lg border border-border bg-surface-elevated">
                <table class="min-w-full divide-y divide-border">
                    <thead class="bg-surface-muted">
                        <tr>
                            <th scope="col" class=HEADER_CELL>"Employee"</th>
                            <th scope="col" class=HEADER_CELL>"Document"</th>
                            <th scope="col" class=HEADER_CELL>"Reason"</th>
                            <th scope="col" class=HEADER_CELL>"Requested"</th>
                            <th scope="col" class=HEADER_CELL>"Status"</th>
                            <th scope="col" class=HEADER_CELL><span class="sr-only">"Actions"</span></th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        {move || {
                            let rows = rows.get();
                            if rows.is_empty() {
                                view! { <EmptyTableRow columns=COLUMNS/> }.into_view()
                            } else {
                                rows.into_iter().map(|request| review_row(vm, request)).collect_view()
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
                on_cancel=Callback::new(move |_| vm.close())
                submitting=vm.decide_action.pending()
                submit_label="Confirm"
            >
                {decision_fields(vm)}
            </FormDialog>
            <ValidationPopover
                errors=errors
                on_close=Callback::new(move |_| vm.errors.set(FieldErrors::default()))
            />
        </section>
    }
}
