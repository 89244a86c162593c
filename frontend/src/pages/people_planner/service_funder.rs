use crate::{
    api::{FundingType, RecordStatus, ServiceFunder, ServiceFunderPayload},
    fixtures,
    pages::crud::{
        input_class, text_input, CrudPanel, CrudRepository, CrudViewModel, Field, FixtureStore,
        RecordForm,
    },
    utils::forms::{optional_string, FieldErrors},
};
use leptos::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFunderForm {
    pub name: String,
    pub contact_email: String,
    /// Raw select value; blank until a type is picked.
    pub funding_type: String,
    pub status: RecordStatus,
}

impl RecordForm for ServiceFunderForm {
    type Record = ServiceFunder;

    fn from_record(record: &ServiceFunder) -> Self {
        Self {
            name: record.name.clone(),
            contact_email: record.contact_email.clone().unwrap_or_default(),
            funding_type: record.funding_type.as_str().to_string(),
            status: record.status,
        }
    }

    fn validate(&self) -> Result<ServiceFunderPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name is required");
        let funding_type = FundingType::parse(self.funding_type.trim());
        if funding_type.is_none() {
            errors.add("funding_type", "Funding type is required");
        }
        let Some(funding_type) = funding_type else {
            return Err(errors);
        };
        errors.into_result(|| ServiceFunderPayload {
            name: self.name.trim().to_string(),
            contact_email: optional_string(&self.contact_email),
            funding_type,
            status: self.status,
        })
    }
}

pub fn funder_repository() -> CrudRepository<ServiceFunder> {
    CrudRepository::fixture(FixtureStore::new(
        fixtures::service_funders(),
        ServiceFunder::from_payload,
    ))
}

const COLUMNS: &[&str] = &["Name", "Funding type", "Contact"];

fn cells(funder: &ServiceFunder) -> View {
    view! {
        <td class="px-4 py-2 text-sm font-medium text-fg">{funder.name.clone()}</td>
        <td class="px-4 py-2 text-sm text-fg">{funder.funding_type.label()}</td>
        <td class="px-4 py-2 text-sm text-fg-muted">
            {funder.contact_email.clone().unwrap_or_else(|| "-".to_string())}
        </td>
    }
    .into_view()
}

fn fields(draft: RwSignal<ServiceFunderForm>, errors: Signal<FieldErrors>) -> View {
    view! {
        <Field label="Name" id="name" errors=errors field="name" required=true>
            {text_input(draft, errors, "name", |d| d.name.clone(), |d, v| d.name = v)}
        </Field>
        <Field label="Funding type" id="funding_type" errors=errors field="funding_type" required=true>
            <select
                id="funding_type"
                class=move || input_class(errors.with(|e| e.has("funding_type")))
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| d.funding_type = value);
                }
            >
                <option value="" selected=move || draft.with(|d| d.funding_type.is_empty())>
                    "Choose funding type"
                </option>
                {FundingType::ALL
                    .into_iter()
                    .map(|kind| {
                        view! {
                            <option
                                value=kind.as_str()
                                selected=move || draft.with(|d| d.funding_type == kind.as_str())
                            >
                                {kind.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </Field>
        <Field label="Contact email" id="contact_email" errors=errors field="contact_email">
            {text_input(draft, errors, "contact_email", |d| d.contact_email.clone(), |d, v| d.contact_email = v)}
        </Field>
    }
    .into_view()
}

#[component]
pub fn ServiceFunderPage() -> impl IntoView {
    let vm = CrudViewModel::<ServiceFunderForm>::new("Service funder", funder_repository());

    view! {
        <CrudPanel
            vm=vm
            title="Service Funders"
            columns=COLUMNS
            cells=cells
            fields=fields
            search_placeholder="Search funders"
        />
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::ListQuery;

    #[tokio::test]
    async fn created_funder_is_listed() {
        let repo = funder_repository();
        let created = repo
            .create(&ServiceFunderPayload {
                name: "Riverside Trust".into(),
                contact_email: None,
                funding_type: FundingType::Charity,
                status: RecordStatus::Active,
            })
            .await
            .unwrap();

        let page = repo
            .list(&ListQuery::default().with_search("riverside"))
            .await
            .unwrap();
        assert_eq!(page.result, vec![created]);
    }
}
