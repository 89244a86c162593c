use crate::{
    api::{ApiClient, Notice, NoticeAudience, NoticePayload, RecordStatus},
    pages::crud::{input_class, text_input, CrudPanel, CrudRepository, CrudViewModel, Field, RecordForm},
    utils::{
        forms::FieldErrors,
        time::{format_date, parse_date},
    },
};
use leptos::*;

/// Comma or whitespace separated ids, blanks dropped.
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeForm {
    pub title: String,
    pub description: String,
    pub audience: NoticeAudience,
    pub target_ids: String,
    pub publish_date: String,
    pub status: RecordStatus,
}

impl RecordForm for NoticeForm {
    type Record = Notice;

    fn from_record(record: &Notice) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            audience: record.audience,
            target_ids: record.target_ids.join(", "),
            publish_date: record.publish_date.map(format_date).unwrap_or_default(),
            status: record.status,
        }
    }

    fn validate(&self) -> Result<NoticePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title, "Title is required");
        errors.require("description", &self.description, "Description is required");
        let target_ids = if self.audience.needs_targets() {
            split_ids(&self.target_ids)
        } else {
            Vec::new()
        };
        if self.audience.needs_targets() && target_ids.is_empty() {
            errors.add("target_ids", "Choose at least one recipient");
        }
        let publish_date = if self.publish_date.trim().is_empty() {
            None
        } else {
            let parsed = parse_date(&self.publish_date);
            if parsed.is_none() {
                errors.add("publish_date", "Publish date must be YYYY-MM-DD");
            }
            parsed
        };
        errors.into_result(|| NoticePayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            audience: self.audience,
            target_ids,
            publish_date,
            status: self.status,
        })
    }
}

const COLUMNS: &[&str] = &["Title", "Audience", "Publish date"];

fn cells(notice: &Notice) -> View {
    view! {
        <td class="px-4 py-2 text-sm font-medium text-fg">{notice.title.clone()}</td>
        <td class="px-4 py-2 text-sm text-fg-muted">{notice.audience.label()}</td>
        <td class="px-4 py-2 text-sm text-fg">
            {notice.publish_date.map(format_date).unwrap_or_else(|| "-".to_string())}
        </td>
    }
    .into_view()
}

fn fields(draft: RwSignal<NoticeForm>, errors: Signal<FieldErrors>) -> View {
    let needs_targets = move || draft.with(|d| d.audience.needs_targets());
    view! {
        <Field label="Title" id="title" errors=errors field="title" required=true>
            {text_input(draft, errors, "title", |d| d.title.clone(), |d, v| d.title = v)}
        </Field>
        <Field label="Description" id="description" errors=errors field="description" required=true>
            <textarea
                id="description"
                rows="4"
                class=move || input_class(errors.with(|e| e.has("description")))
                prop:value=move || draft.with(|d| d.description.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| d.description = value);
                }
            ></textarea>
        </Field>
        <div class="grid grid-cols-2 gap-4">
            <Field label="Audience" id="audience" errors=errors field="audience">
                <select
                    id="audience"
                    class=input_class(false)
                    on:change=move |ev| {
                        let audience = NoticeAudience::parse(&event_target_value(&ev));
                        draft.update(|d| d.audience = audience);
                    }
                >
                    {NoticeAudience::ALL
                        .into_iter()
                        .map(|audience| {
                            view! {
                                <option
                                    value=audience.as_str()
                                    selected=move || draft.with(|d| d.audience == audience)
                                >
                                    {audience.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </Field>
            <Field label="Publish date" id="publish_date" errors=errors field="publish_date">
                <input
                    id="publish_date"
                    type="date"
                    class=move || input_class(errors.with(|e| e.has("publish_date")))
                    prop:value=move || draft.with(|d| d.publish_date.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.publish_date = value);
                    }
                />
            </Field>
        </div>
        <Show when=needs_targets>
            <Field label="Recipient ids" id="target_ids" errors=errors field="target_ids" required=true>
                {text_input(draft, errors, "target_ids", |d| d.target_ids.clone(), |d, v| d.target_ids = v)}
                <p class="mt-1 text-xs text-fg-muted">"Separate ids with commas."</p>
            </Field>
        </Show>
    }
    .into_view()
}

#[component]
pub fn NoticePage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let vm = CrudViewModel::<NoticeForm>::new("Notice", CrudRepository::remote(api));

    view! {
        <CrudPanel
            vm=vm
            title="Notice Board"
            columns=COLUMNS
            cells=cells
            fields=fields
            search_placeholder="Search notices"
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(audience: NoticeAudience, targets: &str) -> NoticeForm {
        NoticeForm {
            title: "Fire drill".into(),
            description: "Friday 10:00".into(),
            audience,
            target_ids: targets.into(),
            ..NoticeForm::default()
        }
    }

    #[test]
    fn split_ids_ignores_blanks() {
        assert_eq!(split_ids(" d1, ,d2  d3"), vec!["d1", "d2", "d3"]);
        assert!(split_ids(" , ").is_empty());
    }

    #[test]
    fn targeted_notice_needs_recipients() {
        let errors = notice(NoticeAudience::Department, "").validate().unwrap_err();
        assert_eq!(errors.get("target_ids"), Some("Choose at least one recipient"));

        let payload = notice(NoticeAudience::Department, "d1,d2").validate().unwrap();
        assert_eq!(payload.target_ids, vec!["d1", "d2"]);
    }

    #[test]
    fn notice_for_everyone_drops_stale_targets() {
        let payload = notice(NoticeAudience::All, "d1").validate().unwrap();
        assert!(payload.target_ids.is_empty());
    }

    #[test]
    fn title_and_description_are_required() {
        let errors = NoticeForm::default().validate().unwrap_err();
        assert!(errors.has("title"));
        assert!(errors.has("description"));
    }
}
