use crate::{
    api::{initials_of, RecordStatus, ServiceUser, ServiceUserPayload},
    components::option_select::OptionSelect,
    fixtures,
    pages::crud::{
        options::{record_options, use_static_options},
        text_input, CrudPanel, CrudRepository, CrudViewModel, Field, FixtureStore, RecordForm,
    },
    utils::forms::{optional_string, FieldErrors},
};
use leptos::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceUserForm {
    pub name: String,
    pub initials: String,
    pub address: String,
    pub funder_id: String,
    pub status: RecordStatus,
}

impl RecordForm for ServiceUserForm {
    type Record = ServiceUser;

    fn from_record(record: &ServiceUser) -> Self {
        Self {
            name: record.name.clone(),
            initials: record.initials.clone(),
            address: record.address.clone().unwrap_or_default(),
            funder_id: record.funder_id.clone().unwrap_or_default(),
            status: record.status,
        }
    }

    fn validate(&self) -> Result<ServiceUserPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.into_result(|| {
            let initials = match optional_string(&self.initials) {
                Some(initials) => initials.to_uppercase(),
                None => initials_of(&self.name),
            };
            ServiceUserPayload {
                name: self.name.trim().to_string(),
                initials,
                address: optional_string(&self.address),
                funder_id: optional_string(&self.funder_id),
                status: self.status,
            }
        })
    }
}

pub fn service_user_repository() -> CrudRepository<ServiceUser> {
    CrudRepository::fixture(FixtureStore::new(
        fixtures::service_users(),
        ServiceUser::from_payload,
    ))
}

fn funder_name(funder_id: Option<&str>) -> String {
    funder_id
        .and_then(|id| {
            fixtures::service_funders()
                .into_iter()
                .find(|f| f.id == id)
                .map(|f| f.name)
        })
        .unwrap_or_else(|| "-".to_string())
}

const COLUMNS: &[&str] = &["Name", "Address", "Funder"];

fn cells(user: &ServiceUser) -> View {
    view! {
        <td class="px-4 py-2 text-sm font-medium text-fg">
            <span class="mr-2 inline-flex h-7 w-7 items-center justify-center rounded-full bg-surface-muted text-xs font-semibold">
                {user.initials.clone()}
            </span>
            {user.name.clone()}
        </td>
        <td class="px-4 py-2 text-sm text-fg-muted">{user.address.clone().unwrap_or_default()}</td>
        <td class="px-4 py-2 text-sm text-fg">{funder_name(user.funder_id.as_deref())}</td>
    }
    .into_view()
}

fn fields(draft: RwSignal<ServiceUserForm>, errors: Signal<FieldErrors>) -> View {
    let funders = use_static_options(record_options(&fixtures::service_funders()));
    view! {
        <div class="grid grid-cols-3 gap-4">
            <div class="col-span-2">
                <Field label="Name" id="name" errors=errors field="name" required=true>
                    {text_input(draft, errors, "name", |d| d.name.clone(), |d, v| d.name = v)}
                </Field>
            </div>
            <Field label="Initials" id="initials" errors=errors field="initials">
                {text_input(draft, errors, "initials", |d| d.initials.clone(), |d, v| d.initials = v)}
            </Field>
        </div>
        <Field label="Address" id="address" errors=errors field="address">
            {text_input(draft, errors, "address", |d| d.address.clone(), |d, v| d.address = v)}
        </Field>
        <Field label="Funder" id="funder" errors=errors field="funder_id">
            <OptionSelect
                id="funder"
                options=funders
                value=Signal::derive(move || draft.with(|d| d.funder_id.clone()))
                on_change=Callback::new(move |value| draft.update(|d| d.funder_id = value))
                placeholder="No funder"
            />
        </Field>
    }
    .into_view()
}

#[component]
pub fn ServiceUserPage() -> impl IntoView {
    let vm = CrudViewModel::<ServiceUserForm>::new("Service user", service_user_repository());

    view! {
        <CrudPanel
            vm=vm
            title="Service Users"
            columns=COLUMNS
            cells=cells
            fields=fields
            search_placeholder="Search service users"
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_are_derived_when_blank() {
        let payload = ServiceUserForm {
            name: "Margaret Hughes".into(),
            ..ServiceUserForm::default()
        }
        .validate()
        .unwrap();
        assert_eq!(payload.initials, initials_of("Margaret Hughes"));
    }

    #[test]
    fn typed_initials_win() {
        let payload = ServiceUserForm {
            name: "Margaret Hughes".into(),
            initials: "mh2".into(),
            ..ServiceUserForm::default()
        }
        .validate()
        .unwrap();
        assert_eq!(payload.initials, "MH2");
    }

    #[test]
    fn name_is_required() {
        assert!(ServiceUserForm::default().validate().unwrap_err().has("name"));
    }

    #[test]
    fn funder_name_falls_back_to_dash() {
        assert_eq!(funder_name(Some("funder-2")), "West Yorkshire ICB");
        assert_eq!(funder_name(Some("missing")), "-");
        assert_eq!(funder_name(None), "-");
    }
}
