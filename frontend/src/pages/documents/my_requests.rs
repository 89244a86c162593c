use leptos::*;

use crate::{
    api::{ApiClient, ApiError, CreateDocumentRequest, DocumentRequest},
    components::{
        common::ButtonVariant,
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{ErrorMessage, LoadingSpinner, PageHeader},
        validation_popover::ValidationPopover,
    },
    pages::crud::{input_class, text_input, Field, SubmitError},
    state::toast::{use_toasts, ToastState},
    utils::forms::{optional_string, FieldErrors},
};

use super::{requested_on, status_badge, CELL, HEADER_CELL};

pub const DOCUMENT_TYPES: &[&str] = &[
    "Employment letter",
    "Payslip",
    "P60",
    "Reference letter",
    "Training certificate",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentRequestForm {
    pub document_type: String,
    pub reason: String,
}

impl DocumentRequestForm {
    pub fn validate(&self) -> Result<CreateDocumentRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("document_type", &self.document_type, "Document type is required");
        errors.into_result(|| CreateDocumentRequest {
            document_type: self.document_type.trim().to_string(),
            reason: optional_string(&self.reason),
        })
    }
}

pub async fn submit_document_request(
    api: &ApiClient,
    form: &DocumentRequestForm,
) -> Result<DocumentRequest, SubmitError> {
    let payload = form.validate().map_err(SubmitError::Invalid)?;
    Ok(api.create_document_request(&payload).await?)
}

pub fn apply_request_result(
    result: Result<DocumentRequest, SubmitError>,
    draft: RwSignal<DocumentRequestForm>,
    errors: RwSignal<FieldErrors>,
    api_error: RwSignal<Option<ApiError>>,
    reload: RwSignal<u32>,
    toasts: ToastState,
) {
    match result {
        Ok(request) => {
            toasts.success(format!("Requested {}", request.document_type));
            draft.set(DocumentRequestForm::default());
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

fn request_row(request: DocumentRequest) -> impl IntoView {
    let document = request.document_url.clone().map(|url| {
        view! {
            <a href=url target="_blank" rel="noopener" class="text-link hover:underline">"Download"</a>
        }
    });
    view! {
        <tr>
            <td class=CELL>{request.document_type.clone()}</td>
            <td class=CELL>{requested_on(request.created_at.as_deref())}</td>
            <td class=CELL>{status_badge(request.status)}</td>
            <td class=CELL>{request.admin_notes.clone().unwrap_or_default()}</td>
            <td class=CELL>{document}</td>
        </tr>
    }
}

fn request_table(requests: Vec<DocumentRequest>) -> View {
    if requests.is_empty() {
        return view! {
            <EmptyState
                title="No document requests yet"
                description="Requests you submit appear here with their status."
            />
        }
        .into_view();
    }
    view! {
        <div class="overflow-x-auto rounded-lg border border-border bg-surface-elevated">
            <table class="min-w-full divide-y divide-border">
                <thead class="bg-surface-muted">
                    <tr>
                        <th scope="col" class=HEADER_CELL>"Document"</th>
                        <th scope="col" class=HEADER_CELL>"Requested"</th>
                        <th scope="col" class=HEADER_CELL>"Status"</th>
                        <th scope="col" class=HEADER_CELL>"Notes"</th>
                        <th scope="col" class=HEADER_CELL><span class="sr-only">"File"</span></th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    {requests.into_iter().map(request_row).collect_view()}
                </tbody>
            </table>
        </div>
    }
    .into_view()
}

#[component]
pub fn MyDocumentsPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let toasts = use_toasts();
    let reload = create_rw_signal(0u32);
    let draft = create_rw_signal(DocumentRequestForm::default());
    let errors = create_rw_signal(FieldErrors::default());
    let api_error = create_rw_signal(None::<ApiError>);
    let error_signal: Signal<FieldErrors> = errors.into();

    let list_api = api.clone();
    let requests = create_resource(
        move || reload.get(),
        move |_| {
            let api = list_api.clone();
            async move { api.my_document_requests().await }
        },
    );

    let submit = create_action(move |form: &DocumentRequestForm| {
        let api = api.clone();
        let form = form.clone();
        async move { submit_document_request(&api, &form).await }
    });

    create_effect(move |_| {
        if let Some(result) = submit.value().get() {
            apply_request_result(result, draft, errors, api_error, reload, toasts);
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = draft.get_untracked();
        match form.validate() {
            Ok(_) => {
                errors.set(FieldErrors::default());
                submit.dispatch(form);
            }
            Err(field_errors) => errors.set(field_errors),
        }
    };

    view! {
        <section class="space-y-6">
            <PageHeader title="My Documents"/>
            <form
                class="grid gap-4 rounded-lg border border-border bg-surface-elevated p-6 md:grid-cols-2"
                novalidate=true
                on:submit=on_submit
            >
                <Field label="Document type" id="document_type" errors=error_signal field="document_type" required=true>
                    <select
                        id="document_type"
                        class=move || input_class(errors.with(|e| e.has("document_type")))
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.document_type = value);
                        }
                    >
                        <option value="" selected=move || draft.with(|d| d.document_type.is_empty())>
                            "Choose document type"
                        </option>
                        {DOCUMENT_TYPES
                            .iter()
                            .map(|&kind| {
                                view! {
                                    <option value=kind selected=move || draft.with(|d| d.document_type == kind)>
                                        {kind}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </Field>
                <Field label="Reason" id="reason" errors=error_signal field="reason">
                    {text_input(draft, error_signal, "reason", |d| d.reason.clone(), |d, v| d.reason = v)}
                </Field>
                <div class="md:col-span-2 flex items-center justify-between">
                    <InlineErrorMessage error=api_error/>
                    <button
                        type="submit"
                        class=format!("ml-auto {}", ButtonVariant::Primary.button_class())
                        disabled=move || submit.pending().get()
                    >
                        "Request document"
                    </button>
                </div>
            </form>
            {move || match requests.get() {
                None => view! { <LoadingSpinner/> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.error/> }.into_view(),
                Some(Ok(list)) => request_table(list),
            }}
            <ValidationPopover
                errors=error_signal
                on_close=Callback::new(move |_| errors.set(FieldErrors::default()))
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::DocumentRequestStatus, test_support::ssr::with_runtime};

    #[test]
    fn document_type_is_required() {
        let errors = DocumentRequestForm::default().validate().unwrap_err();
        assert_eq!(errors.get("document_type"), Some("Document type is required"));
    }

    #[test]
    fn blank_reason_is_omitted() {
        let payload = DocumentRequestForm {
            document_type: "Payslip".into(),
            reason: "  ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(payload.reason, None);
    }

    #[test]
    fn successful_request_resets_the_form_and_reloads() {
        with_runtime(|| {
            let draft = create_rw_signal(DocumentRequestForm {
                document_type: "P60".into(),
                reason: "Mortgage".into(),
            });
            let errors = create_rw_signal(FieldErrors::default());
            let api_error = create_rw_signal(None);
            let reload = create_rw_signal(0u32);
            let toasts = ToastState::new();
            let created = DocumentRequest {
                id: "dr1".into(),
                employee_id: "e1".into(),
                employee_name: None,
                document_type: "P60".into(),
                reason: Some("Mortgage".into()),
                status: DocumentRequestStatus::Pending,
                admin_notes: None,
                document_url: None,
                created_at: None,
            };

            apply_request_result(Ok(created), draft, errors, api_error, reload, toasts);

            assert_eq!(draft.get_untracked(), DocumentRequestForm::default());
            assert_eq!(reload.get_untracked(), 1);
            assert_eq!(toasts.items().get_untracked()[0].message, "Requested P60");
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[tokio::test]
    async fn request_posts_type_and_reason() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/document-requests");
            then.status(201).json_body(json!({
                "data": {
                    "id": "dr1",
                    "employeeId": "e1",
                    "documentType": "Payslip",
                    "reason": "Bank",
                    "status": "pending"
                }
            }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api/v1"));

        let created = submit_document_request(
            &api,
            &DocumentRequestForm {
                document_type: "Payslip".into(),
                reason: "Bank".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(created.id, "dr1");
        assert_eq!(
            server.last_body(POST, "/api/v1/document-requests"),
            Some(json!({ "documentType": "Payslip", "reason": "Bank" }))
        );
    }

    #[tokio::test]
    async fn missing_type_never_reaches_the_api() {
        let server = MockServer::start_async().await;
        let api = ApiClient::new_with_base_url(server.url("/api/v1"));
        let err = submit_document_request(&api, &DocumentRequestForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert!(server.requests().is_empty());
    }

    #[test]
    fn page_lists_document_types() {
        let html = render_to_string(|| view! { <MyDocumentsPage/> });
        assert!(html.contains("My Documents"));
        assert!(html.contains("Training certificate"));
        assert!(html.contains("Request document"));
    }
}
