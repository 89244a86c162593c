use crate::{
    api::{ApiClient, RecordStatus, Shift, ShiftPayload},
    components::{
        common::ButtonVariant,
        error::InlineErrorMessage,
        layout::PageHeader,
        time_picker::TimePicker,
        validation_popover::ValidationPopover,
    },
    pages::crud::{text_input, CrudPanel, CrudRepository, CrudViewModel, Field, RecordForm, SubmitError},
    router::paths,
    state::toast::use_toasts,
    utils::{
        browser,
        forms::FieldErrors,
        time::{format_hhmm, normalize_hhmm, parse_hhmm},
    },
};
use leptos::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ShiftForm {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    /// Carried over from the record being edited.
    pub status: Option<RecordStatus>,
}

impl Default for ShiftForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            status: None,
        }
    }
}

impl RecordForm for ShiftForm {
    type Record = Shift;

    fn from_record(record: &Shift) -> Self {
        Self {
            name: record.name.clone(),
            start_time: normalize_hhmm(&record.start_time),
            end_time: normalize_hhmm(&record.end_time),
            status: Some(record.status),
        }
    }

    fn validate(&self) -> Result<ShiftPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require("start_time", &self.start_time, "Start time is required");
        errors.require("end_time", &self.end_time, "End time is required");
        let start = parse_hhmm(&self.start_time);
        let end = parse_hhmm(&self.end_time);
        if start.is_none() {
            errors.add("start_time", "Start time must be HH:MM");
        }
        if end.is_none() {
            errors.add("end_time", "End time must be HH:MM");
        }
        let (Some(start), Some(end)) = (start, end) else {
            return Err(errors);
        };
        if start >= end {
            errors.add("end_time", "End time must be after start time");
        }
        errors.into_result(|| ShiftPayload {
            name: self.name.trim().to_string(),
            start_time: format_hhmm(start),
            end_time: format_hhmm(end),
            status: self.status,
        })
    }
}

const COLUMNS: &[&str] = &["Name", "Start", "End"];

fn cells(shift: &Shift) -> View {
    view! {
        <td class="px-4 py-2 text-sm font-medium text-fg">{shift.name.clone()}</td>
        <td class="px-4 py-2 text-sm text-fg">{shift.start_time.clone()}</td>
        <td class="px-4 py-2 text-sm text-fg">{shift.end_time.clone()}</td>
    }
    .into_view()
}

fn fields(draft: RwSignal<ShiftForm>, errors: Signal<FieldErrors>) -> View {
    view! {
        <Field label="Name" id="name" errors=errors field="name" required=true>
            {text_input(draft, errors, "name", |d| d.name.clone(), |d, v| d.name = v)}
        </Field>
        <div class="grid grid-cols-2 gap-4">
            <Field label="Start time" id="start_time" errors=errors field="start_time" required=true>
                <TimePicker
                    id="start_time"
                    value=Signal::derive(move || draft.with(|d| d.start_time.clone()))
                    on_change=Callback::new(move |value| draft.update(|d| d.start_time = value))
                    invalid=Signal::derive(move || errors.with(|e| e.has("start_time")))
                />
            </Field>
            <Field label="End time" id="end_time" errors=errors field="end_time" required=true>
                <TimePicker
                    id="end_time"
                    value=Signal::derive(move || draft.with(|d| d.end_time.clone()))
                    on_change=Callback::new(move |value| draft.update(|d| d.end_time = value))
                    invalid=Signal::derive(move || errors.with(|e| e.has("end_time")))
                />
            </Field>
        </div>
    }
    .into_view()
}

#[component]
pub fn ShiftPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let vm = CrudViewModel::<ShiftForm>::new("Shift", CrudRepository::remote(api));
    let toolbar = view! {
        <a href=paths::SHIFT_CREATE class="text-sm text-link hover:underline whitespace-nowrap">
            "Open full create form"
        </a>
    }
    .into_view();

    view! {
        <CrudPanel
            vm=vm
            title="Shifts"
            columns=COLUMNS
            cells=cells
            fields=fields
            search_placeholder="Search shifts"
            toolbar=toolbar
        />
    }
}

pub async fn create_shift(api: &ApiClient, form: &ShiftForm) -> Result<Shift, SubmitError> {
    let payload = form.validate().map_err(SubmitError::Invalid)?;
    Ok(api.create_record::<Shift>(&payload).await?)
}

/// Standalone create page; returns to the shift list once saved.
#[component]
pub fn ShiftCreatePage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let toasts = use_toasts();
    let draft = create_rw_signal(ShiftForm::default());
    let errors = create_rw_signal(FieldErrors::default());
    let api_error = create_rw_signal(None);

    let save = create_action(move |form: &ShiftForm| {
        let api = api.clone();
        let form = form.clone();
        async move { create_shift(&api, &form).await }
    });

    create_effect(move |_| match save.value().get() {
        Some(Ok(shift)) => {
            toasts.success(format!("Shift {} created", shift.name));
            browser::navigate_in_app(paths::SHIFT);
        }
        Some(Err(SubmitError::Invalid(field_errors))) => errors.set(field_errors),
        Some(Err(SubmitError::Api(err))) => {
            toasts.error(err.error.clone());
            api_error.set(Some(err));
        }
        None => {}
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = draft.get_untracked();
        match form.validate() {
            Ok(_) => {
                errors.set(FieldErrors::default());
                save.dispatch(form);
            }
            Err(field_errors) => errors.set(field_errors),
        }
    };
    let error_signal: Signal<FieldErrors> = errors.into();

    view! {
        <section class="max-w-xl space-y-4">
            <PageHeader title="New Shift"/>
            <InlineErrorMessage error=api_error/>
            <form class="space-y-4 rounded-lg border border-border bg-surface-elevated p-6" novalidate=true on:submit=on_submit>
                {fields(draft, error_signal)}
                <div class="flex justify-end gap-2">
                    <a
                        href=paths::SHIFT
                        class=ButtonVariant::Secondary.button_class()
                    >
                        "Cancel"
                    </a>
                    <button
                        type="submit"
                        class=ButtonVariant::Primary.button_class()
                        disabled=move || save.pending().get()
                    >
                        "Create shift"
                    </button>
                </div>
            </form>
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

    fn form(name: &str, start: &str, end: &str) -> ShiftForm {
        ShiftForm {
            name: name.into(),
            start_time: start.into(),
            end_time: end.into(),
            status: None,
        }
    }

    #[test]
    fn valid_shift_trims_name() {
        let payload = form(" Morning ", "09:00", "17:00").validate().unwrap();
        assert_eq!(payload.name, "Morning");
        assert_eq!(payload.start_time, "09:00");
        assert_eq!(payload.end_time, "17:00");
    }

    #[test]
    fn blank_fields_are_reported_per_field() {
        let errors = form("", "", "").validate().unwrap_err();
        assert!(errors.has("name"));
        assert_eq!(errors.get("start_time"), Some("Start time is required"));
        assert!(errors.has("end_time"));
    }

    #[test]
    fn edit_resubmits_stored_record_with_seconds() {
        let record: Shift = serde_json::from_value(serde_json::json!({
            "id": "s1",
            "name": "Day",
            "startTime": "09:00:00",
            "endTime": "17:00:00",
            "status": "inactive"
        }))
        .unwrap();
        let form = ShiftForm::from_record(&record);
        assert_eq!(form.start_time, "09:00");
        assert_eq!(form.end_time, "17:00");

        let payload = form.validate().unwrap();
        assert_eq!(payload.start_time, "09:00");
        assert_eq!(payload.end_time, "17:00");
        assert_eq!(payload.status, Some(RecordStatus::Inactive));
    }

    #[test]
    fn end_must_follow_start() {
        let errors = form("Late", "17:00", "09:00").validate().unwrap_err();
        assert_eq!(errors.get("end_time"), Some("End time must be after start time"));
        assert!(form("Late", "17:00", "17:00").validate().is_err());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[tokio::test]
    async fn create_posts_name_and_times_only() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/hr/shift");
            then.status(201).json_body(json!({
                "data": { "id": "s1", "name": "Day", "startTime": "09:00", "endTime": "17:00", "status": "active" }
            }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api/v1"));

        let shift = create_shift(
            &api,
            &ShiftForm {
                name: "Day".into(),
                start_time: "09:00".into(),
                end_time: "17:00".into(),
                status: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(shift.id, "s1");
        assert_eq!(
            server.last_body(POST, "/api/v1/hr/shift"),
            Some(json!({ "name": "Day", "startTime": "09:00", "endTime": "17:00" }))
        );
    }

    #[tokio::test]
    async fn invalid_shift_is_not_sent() {
        let server = MockServer::start_async().await;
        let api = ApiClient::new_with_base_url(server.url("/api/v1"));
        let err = create_shift(&api, &ShiftForm { name: String::new(), ..ShiftForm::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert!(server.requests().is_empty());
    }

    #[test]
    fn create_page_renders_time_pickers() {
        let html = render_to_string(|| view! { <ShiftCreatePage/> });
        assert!(html.contains("New Shift"));
        assert!(html.contains("id=\"start_time\""));
        assert!(html.contains("Create shift"));
    }
}
