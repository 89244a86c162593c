use crate::{
    api::{ApiClient, Department, RecordStatus, Vacancy, VacancyPayload},
    components::option_select::OptionSelect,
    pages::crud::{
        input_class, options::use_record_options, text_input, CrudPanel, CrudRepository,
        CrudViewModel, Field, RecordForm,
    },
    utils::{
        forms::{optional_string, FieldErrors},
        time::{format_date, parse_date},
    },
};
use leptos::*;

#[derive(Debug, Clone, PartialEq)]
pub struct VacancyForm {
    pub title: String,
    pub department_id: String,
    pub positions: String,
    pub closing_date: String,
    pub description: String,
    pub status: RecordStatus,
}

impl Default for VacancyForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            department_id: String::new(),
            positions: "1".to_string(),
            closing_date: String::new(),
            description: String::new(),
            status: RecordStatus::Active,
        }
    }
}

impl RecordForm for VacancyForm {
    type Record = Vacancy;

    fn from_record(record: &Vacancy) -> Self {
        Self {
            title: record.title.clone(),
            department_id: record.department_id.clone().unwrap_or_default(),
            positions: record.positions.to_string(),
            closing_date: record.closing_date.map(format_date).unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            status: record.status,
        }
    }

    fn validate(&self) -> Result<VacancyPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title, "Title is required");
        let positions = match self.positions.trim().parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                errors.add("positions", "Positions must be a positive number");
                0
            }
        };
        let closing_date = if self.closing_date.trim().is_empty() {
            None
        } else {
            let parsed = parse_date(&self.closing_date);
            if parsed.is_none() {
                errors.add("closing_date", "Closing date must be YYYY-MM-DD");
            }
            parsed
        };
        errors.into_result(|| VacancyPayload {
            title: self.title.trim().to_string(),
            department_id: optional_string(&self.department_id),
            positions,
            closing_date,
            description: optional_string(&self.description),
            status: self.status,
        })
    }
}

const COLUMNS: &[&str] = &["Title", "Department", "Positions", "Closing date"];

fn cells(vacancy: &Vacancy) -> View {
    view! {
        <td class="px-4 py-2 text-sm font-medium text-fg">{vacancy.title.clone()}</td>
        <td class="px-4 py-2 text-sm text-fg-muted">
            {vacancy.department_name.clone().unwrap_or_else(|| "-".to_string())}
        </td>
        <td class="px-4 py-2 text-sm text-fg">{vacancy.positions}</td>
        <td class="px-4 py-2 text-sm text-fg">
            {vacancy.closing_date.map(format_date).unwrap_or_else(|| "-".to_string())}
        </td>
    }
    .into_view()
}

fn fields(draft: RwSignal<VacancyForm>, errors: Signal<FieldErrors>) -> View {
    let departments = use_record_options::<Department>();
    view! {
        <Field label="Title" id="title" errors=errors field="title" required=true>
            {text_input(draft, errors, "title", |d| d.title.clone(), |d, v| d.title = v)}
        </Field>
        <Field label="Department" id="department" errors=errors field="department_id">
            <OptionSelect
                id="department"
                options=departments
                value=Signal::derive(move || draft.with(|d| d.department_id.clone()))
                on_change=Callback::new(move |value| draft.update(|d| d.department_id = value))
                placeholder="Any department"
            />
        </Field>
        <div class="grid grid-cols-2 gap-4">
            <Field label="Positions" id="positions" errors=errors field="positions" required=true>
                <input
                    id="positions"
                    type="number"
                    min="1"
                    class=move || input_class(errors.with(|e| e.has("positions")))
                    prop:value=move || draft.with(|d| d.positions.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.positions = value);
                    }
                />
            </Field>
            <Field label="Closing date" id="closing_date" errors=errors field="closing_date">
                <input
                    id="closing_date"
                    type="date"
                    class=move || input_class(errors.with(|e| e.has("closing_date")))
                    prop:value=move || draft.with(|d| d.closing_date.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| d.closing_date = value);
                    }
                />
            </Field>
        </div>
        <Field label="Description" id="description" errors=errors field="description">
            {text_input(draft, errors, "description", |d| d.description.clone(), |d, v| d.description = v)}
        </Field>
    }
    .into_view()
}

#[component]
pub fn VacancyPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let vm = CrudViewModel::<VacancyForm>::new("Vacancy", CrudRepository::remote(api));

    view! {
        <CrudPanel
            vm=vm
            title="Vacancies"
            columns=COLUMNS
            cells=cells
            fields=fields
            search_placeholder="Search vacancies"
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn positions_must_be_positive() {
        let form = VacancyForm {
            title: "Night carer".into(),
            positions: "0".into(),
            ..VacancyForm::default()
        };
        assert!(form.validate().unwrap_err().has("positions"));

        let form = VacancyForm {
            positions: "two".into(),
            ..form
        };
        assert!(form.validate().unwrap_err().has("positions"));
    }

    #[test]
    fn closing_date_is_optional_but_checked() {
        let mut form = VacancyForm {
            title: "Night carer".into(),
            ..VacancyForm::default()
        };
        assert_eq!(form.validate().unwrap().closing_date, None);

        form.closing_date = "31/12/2025".into();
        assert!(form.validate().unwrap_err().has("closing_date"));

        form.closing_date = "2025-12-31".into();
        assert_eq!(
            form.validate().unwrap().closing_date,
            NaiveDate::from_ymd_opt(2025, 12, 31)
        );
    }
}
