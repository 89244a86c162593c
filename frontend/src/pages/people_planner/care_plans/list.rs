use std::marker::PhantomData;

use leptos::*;

use crate::{
    api::{
        questionnaires::QuestionnaireKind, Answers, ApiClient, CarePlanPayload, HrRecord,
        RecordStatus, RiskAssessment, SupportPlan,
    },
    components::option_select::OptionSelect,
    fixtures,
    pages::crud::{
        options::{record_options, use_static_options},
        panel::{Cells, Fields},
        text_input, CrudPanel, CrudRepository, CrudViewModel, Field, RecordForm,
    },
    router::paths,
    utils::forms::FieldErrors,
};

/// Risk assessments and support plans share one shape and one form.
pub trait CarePlan: HrRecord<Payload = CarePlanPayload> {
    const KIND: QuestionnaireKind;
    const NEW_PATH: &'static str;

    fn service_user_id(&self) -> &str;
    fn service_user_name(&self) -> Option<&str>;
    fn answers(&self) -> &Answers;
    fn created_at(&self) -> Option<&str>;
}

macro_rules! care_plan {
    ($record:ty, $kind:expr, $new_path:expr) => {
        impl CarePlan for $record {
            const KIND: QuestionnaireKind = $kind;
            const NEW_PATH: &'static str = $new_path;

            fn service_user_id(&self) -> &str {
                &self.service_user_id
            }

            fn service_user_name(&self) -> Option<&str> {
                self.service_user_name.as_deref()
            }

            fn answers(&self) -> &Answers {
                &self.answers
            }

            fn created_at(&self) -> Option<&str> {
                self.created_at.as_deref()
            }
        }
    };
}

care_plan!(RiskAssessment, QuestionnaireKind::RiskAssessment, paths::RISK_ASSESSMENT_NEW);
care_plan!(SupportPlan, QuestionnaireKind::SupportPlan, paths::SUPPORT_PLAN_NEW);

pub fn list_path(kind: QuestionnaireKind) -> &'static str {
    match kind {
        QuestionnaireKind::RiskAssessment => paths::RISK_ASSESSMENT,
        QuestionnaireKind::SupportPlan => paths::SUPPORT_PLAN,
    }
}

/// Edits the header of a saved plan; answers go back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct CarePlanForm<T> {
    pub service_user_id: String,
    pub title: String,
    pub answers: Answers,
    pub status: RecordStatus,
    record: PhantomData<T>,
}

impl<T> Default for CarePlanForm<T> {
    fn default() -> Self {
        Self {
            service_user_id: String::new(),
            title: String::new(),
            answers: Answers::new(),
            status: RecordStatus::Active,
            record: PhantomData,
        }
    }
}

impl<T: CarePlan> RecordForm for CarePlanForm<T> {
    type Record = T;

    fn from_record(record: &T) -> Self {
        Self {
            service_user_id: record.service_user_id().to_string(),
            title: record.label().to_string(),
            answers: record.answers().clone(),
            status: record.status().unwrap_or_default(),
            record: PhantomData,
        }
    }

    fn validate(&self) -> Result<CarePlanPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("service_user_id", &self.service_user_id, "Choose a service user");
        errors.require("title", &self.title, "Title is required");
        errors.into_result(|| CarePlanPayload {
            service_user_id: self.service_user_id.trim().to_string(),
            title: self.title.trim().to_string(),
            answers: self.answers.clone(),
        })
    }
}

const COLUMNS: &[&str] = &["Title", "Service user", "Answers", "Created"];

fn cells<T: CarePlan>(plan: &T) -> View {
    let who = plan
        .service_user_name()
        .unwrap_or_else(|| plan.service_user_id())
        .to_string();
    let created = plan
        .created_at()
        .map(|at| at.chars().take(10).collect::<String>())
        .unwrap_or_else(|| "-".to_string());
    view! {
        <td class="px-4 py-2 text-sm font-medium text-fg">{plan.label().to_string()}</td>
        <td class="px-4 py-2 text-sm text-fg">{who}</td>
        <td class="px-4 py-2 text-sm text-fg-muted">{plan.answers().len()}</td>
        <td class="px-4 py-2 text-sm text-fg">{created}</td>
    }
    .into_view()
}

fn fields<T: CarePlan>(draft: RwSignal<CarePlanForm<T>>, errors: Signal<FieldErrors>) -> View {
    let service_users = use_static_options(record_options(&fixtures::service_users()));
    view! {
        <Field label="Service user" id="service_user" errors=errors field="service_user_id" required=true>
            <OptionSelect
                id="service_user"
                options=service_users
                value=Signal::derive(move || draft.with(|d| d.service_user_id.clone()))
                on_change=Callback::new(move |value| draft.update(|d| d.service_user_id = value))
                placeholder="Choose service user"
                invalid=Signal::derive(move || errors.with(|e| e.has("service_user_id")))
            />
        </Field>
        <Field label="Title" id="title" errors=errors field="title" required=true>
            {text_input(draft, errors, "title", |d| d.title.clone(), |d, v| d.title = v)}
        </Field>
    }
    .into_view()
}

fn care_plan_list<T: CarePlan>(noun: &'static str) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let vm = CrudViewModel::<CarePlanForm<T>>::new(noun, CrudRepository::remote(api));
    let title = format!("{}s", T::KIND.title());
    let cells: Cells<T> = cells::<T>;
    let fields: Fields<CarePlanForm<T>> = fields::<T>;

    view! {
        <CrudPanel
            vm=vm
            title=title
            columns=COLUMNS
            cells=cells
            fields=fields
            search_placeholder="Search by title"
            create_href=T::NEW_PATH
        />
    }
}

#[component]
pub fn RiskAssessmentListPage() -> impl IntoView {
    care_plan_list::<RiskAssessment>("Risk assessment")
}

#[component]
pub fn SupportPlanListPage() -> impl IntoView {
    care_plan_list::<SupportPlan>("Support plan")
}
