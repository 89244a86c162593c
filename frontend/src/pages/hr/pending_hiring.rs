use crate::{
    api::{ApiClient, PendingHire, PendingHirePayload, RecordStatus, Vacancy},
    components::option_select::OptionSelect,
    pages::crud::{
        options::use_record_options, text_input, CrudPanel, CrudRepository, CrudViewModel, Field,
        RecordForm,
    },
    utils::{
        forms::{optional_string, FieldErrors},
        time::format_date,
    },
};
use leptos::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingHireForm {
    pub applicant_name: String,
    pub email: String,
    pub phone: String,
    pub vacancy_id: String,
    pub status: RecordStatus,
}

fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

impl RecordForm for PendingHireForm {
    type Record = PendingHire;

    fn from_record(record: &PendingHire) -> Self {
        Self {
            applicant_name: record.applicant_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone().unwrap_or_default(),
            vacancy_id: record.vacancy_id.clone().unwrap_or_default(),
            status: record.status,
        }
    }

    fn validate(&self) -> Result<PendingHirePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("applicant_name", &self.applicant_name, "Applicant name is required");
        if self.email.trim().is_empty() {
            errors.add("email", "Email is required");
        } else if !looks_like_email(&self.email) {
            errors.add("email", "Enter a valid email address");
        }
        errors.into_result(|| PendingHirePayload {
            applicant_name: self.applicant_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional_string(&self.phone),
            vacancy_id: optional_string(&self.vacancy_id),
            status: self.status,
        })
    }
}

const COLUMNS: &[&str] = &["Applicant", "Email", "Vacancy", "Applied"];

fn cells(hire: &PendingHire) -> View {
    view! {
        <td class="px-4 py-2 text-sm font-medium text-fg">{hire.applicant_name.clone()}</td>
        <td class="px-4 py-2 text-sm text-fg">{hire.email.clone()}</td>
        <td class="px-4 py-2 text-sm text-fg-muted">
            {hire.vacancy_title.clone().unwrap_or_else(|| "-".to_string())}
        </td>
        <td class="px-4 py-2 text-sm text-fg">
            {hire.applied_at.map(format_date).unwrap_or_else(|| "-".to_string())}
        </td>
    }
    .into_view()
}

fn fields(draft: RwSignal<PendingHireForm>, errors: Signal<FieldErrors>) -> View {
    let vacancies = use_record_options::<Vacancy>();
    view! {
        <Field label="Applicant name" id="applicant_name" errors=errors field="applicant_name" required=true>
            {text_input(draft, errors, "applicant_name", |d| d.applicant_name.clone(), |d, v| d.applicant_name = v)}
        </Field>
        <div class="grid grid-cols-2 gap-4">
            <Field label="Email" id="email" errors=errors field="email" required=true>
                {text_input(draft, errors, "email", |d| d.email.clone(), |d, v| d.email = v)}
            </Field>
            <Field label="Phone" id="phone" errors=errors field="phone">
                {text_input(draft, errors, "phone", |d| d.phone.clone(), |d, v| d.phone = v)}
            </Field>
        </div>
        <Field label="Vacancy" id="vacancy" errors=errors field="vacancy_id">
            <OptionSelect
                id="vacancy"
                options=vacancies
                value=Signal::derive(move || draft.with(|d| d.vacancy_id.clone()))
                on_change=Callback::new(move |value| draft.update(|d| d.vacancy_id = value))
                placeholder="Not linked to a vacancy"
            />
        </Field>
    }
    .into_view()
}

#[component]
pub fn PendingHiringPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let vm = CrudViewModel::<PendingHireForm>::new("Applicant", CrudRepository::remote(api));

    view! {
        <CrudPanel
            vm=vm
            title="Pending Hiring"
            columns=COLUMNS
            cells=cells
            fields=fields
            search_placeholder="Search applicants"
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant(email: &str) -> PendingHireForm {
        PendingHireForm {
            applicant_name: "Robin Patel".into(),
            email: email.into(),
            ..PendingHireForm::default()
        }
    }

    #[test]
    fn email_must_have_both_halves() {
        assert!(looks_like_email("robin@example.com"));
        assert!(!looks_like_email("robin"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("robin@"));
    }

    #[test]
    fn missing_and_malformed_email_have_distinct_messages() {
        let errors = applicant("").validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        let errors = applicant("robin.example.com").validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Enter a valid email address"));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let payload = applicant(" robin@example.com ").validate().unwrap();
        assert_eq!(payload.email, "robin@example.com");
        assert_eq!(payload.phone, None);
        assert_eq!(payload.vacancy_id, None);
    }
}
