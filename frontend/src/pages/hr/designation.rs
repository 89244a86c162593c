use crate::{
    api::{
        ApiClient, Department, Designation, DesignationPayload, ModulePermission, RecordStatus,
        PERMISSION_MODULES,
    },
    components::option_select::OptionSelect,
    pages::crud::{
        options::use_record_options, text_input, CrudPanel, CrudRepository, CrudViewModel, Field,
        RecordForm,
    },
    utils::forms::{optional_string, FieldErrors},
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionAction {
    View,
    Create,
    Edit,
    Delete,
}

impl PermissionAction {
    pub const ALL: [PermissionAction; 4] = [
        PermissionAction::View,
        PermissionAction::Create,
        PermissionAction::Edit,
        PermissionAction::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PermissionAction::View => "View",
            PermissionAction::Create => "Create",
            PermissionAction::Edit => "Edit",
            PermissionAction::Delete => "Delete",
        }
    }

    fn read(self, permission: &ModulePermission) -> bool {
        match self {
            PermissionAction::View => permission.view,
            PermissionAction::Create => permission.create,
            PermissionAction::Edit => permission.edit,
            PermissionAction::Delete => permission.delete,
        }
    }
}

fn is_known_module(module: &str) -> bool {
    PERMISSION_MODULES.iter().any(|(known, _)| *known == module)
}

/// One row per known module, carrying over whatever the record grants.
/// Grants for modules this client does not list are kept after the known rows.
pub fn permission_matrix(granted: &[ModulePermission]) -> Vec<ModulePermission> {
    let known = PERMISSION_MODULES.iter().map(|(module, _)| {
        granted
            .iter()
            .find(|p| p.module == *module)
            .cloned()
            .unwrap_or_else(|| ModulePermission::none(module))
    });
    let unknown = granted.iter().filter(|p| !is_known_module(&p.module)).cloned();
    known.chain(unknown).collect()
}

/// Any write permission implies view; dropping view drops the rest.
pub fn toggle_permission(
    permissions: &mut [ModulePermission],
    module: &str,
    action: PermissionAction,
    checked: bool,
) {
    let Some(permission) = permissions.iter_mut().find(|p| p.module == module) else {
        return;
    };
    match action {
        PermissionAction::View => {
            permission.view = checked;
            if !checked {
                permission.create = false;
                permission.edit = false;
                permission.delete = false;
            }
        }
        PermissionAction::Create => permission.create = checked,
        PermissionAction::Edit => permission.edit = checked,
        PermissionAction::Delete => permission.delete = checked,
    }
    if checked {
        permission.view = true;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignationForm {
    pub name: String,
    pub department_id: String,
    pub description: String,
    pub permissions: Vec<ModulePermission>,
    pub status: RecordStatus,
}

impl Default for DesignationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            department_id: String::new(),
            description: String::new(),
            permissions: permission_matrix(&[]),
            status: RecordStatus::Active,
        }
    }
}

impl RecordForm for DesignationForm {
    type Record = Designation;

    fn from_record(record: &Designation) -> Self {
        Self {
            name: record.name.clone(),
            department_id: record.department_id.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            permissions: permission_matrix(&record.permissions),
            status: record.status,
        }
    }

    fn validate(&self) -> Result<DesignationPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.into_result(|| DesignationPayload {
            name: self.name.trim().to_string(),
            department_id: optional_string(&self.department_id),
            description: optional_string(&self.description),
            permissions: self
                .permissions
                .iter()
                .filter(|p| p.grants_anything())
                .cloned()
                .collect(),
            status: self.status,
        })
    }
}

const COLUMNS: &[&str] = &["Name", "Description", "Modules"];

fn cells(designation: &Designation) -> View {
    let modules = designation
        .permissions
        .iter()
        .filter(|p| p.grants_anything())
        .count();
    view! {
        <td class="px-4 py-2 text-sm font-medium text-fg">{designation.name.clone()}</td>
        <td class="px-4 py-2 text-sm text-fg-muted">
            {designation.description.clone().unwrap_or_default()}
        </td>
        <td class="px-4 py-2 text-sm text-fg-muted">{modules}</td>
    }
    .into_view()
}

fn permission_row(draft: RwSignal<DesignationForm>, module: String, label: String) -> View {
    let cells = PermissionAction::ALL
        .into_iter()
        .map(|action| {
            let read_module = module.clone();
            let write_module = module.clone();
            let checked = move || {
                draft.with(|d| {
                    d.permissions
                        .iter()
                        .find(|p| p.module == read_module)
                        .map(|p| action.read(p))
                        .unwrap_or(false)
                })
            };
            view! {
                <td class="px-2 py-1 text-center">
                    <input
                        type="checkbox"
                        aria-label=format!("{} {}", action.label(), label)
                        prop:checked=checked
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            draft.update(|d| toggle_permission(&mut d.permissions, &write_module, action, on));
                        }
                    />
                </td>
            }
        })
        .collect_view();
    view! {
        <tr>
            <td class="px-2 py-1 text-sm text-fg">{label}</td>
            {cells}
        </tr>
    }
    .into_view()
}

fn fields(draft: RwSignal<DesignationForm>, errors: Signal<FieldErrors>) -> View {
    let departments = use_record_options::<Department>();
    let unknown_modules = create_memo(move |_| {
        draft.with(|d| {
            d.permissions
                .iter()
                .filter(|p| !is_known_module(&p.module))
                .map(|p| p.module.clone())
                .collect::<Vec<_>>()
        })
    });
    view! {
        <Field label="Name" id="name" errors=errors field="name" required=true>
            {text_input(draft, errors, "name", |d| d.name.clone(), |d, v| d.name = v)}
        </Field>
        <Field label="Department" id="department" errors=errors field="department_id">
            <OptionSelect
                id="department"
                options=departments
                value=Signal::derive(move || draft.with(|d| d.department_id.clone()))
                on_change=Callback::new(move |value| draft.update(|d| d.department_id = value))
                placeholder="No department"
            />
        </Field>
        <Field label="Description" id="description" errors=errors field="description">
            {text_input(draft, errors, "description", |d| d.description.clone(), |d, v| d.description = v)}
        </Field>
        <fieldset>
            <legend class="text-sm font-medium text-fg mb-1">"Permissions"</legend>
            <table class="w-full border border-border rounded">
                <thead>
                    <tr>
                        <th class="px-2 py-1 text-left text-xs text-fg-muted">"Module"</th>
                        {PermissionAction::ALL
                            .into_iter()
                            .map(|a| view! { <th class="px-2 py-1 text-xs text-fg-muted">{a.label()}</th> })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {PERMISSION_MODULES
                        .iter()
                        .map(|&(module, label)| permission_row(draft, module.to_string(), label.to_string()))
                        .collect_view()}
                    {move || {
                        unknown_modules
                            .get()
                            .into_iter()
                            .map(|module| permission_row(draft, module.clone(), module))
                            .collect_view()
                    }}
                </tbody>
            </table>
        </fieldset>
    }
    .into_view()
}

#[component]
pub fn DesignationPage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let vm = CrudViewModel::<DesignationForm>::new("Designation", CrudRepository::remote(api));

    view! {
        <CrudPanel
            vm=vm
            title="Designations"
            columns=COLUMNS
            cells=cells
            fields=fields
            search_placeholder="Search designations"
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(form: &DesignationForm, name: &str) -> ModulePermission {
        form.permissions
            .iter()
            .find(|p| p.module == name)
            .cloned()
            .unwrap()
    }

    #[test]
    fn matrix_covers_every_module() {
        let granted = vec![ModulePermission {
            module: "shift".into(),
            view: true,
            create: true,
            edit: false,
            delete: false,
        }];
        let matrix = permission_matrix(&granted);
        assert_eq!(matrix.len(), PERMISSION_MODULES.len());
        assert!(matrix.iter().find(|p| p.module == "shift").unwrap().create);
    }

    #[test]
    fn write_permissions_imply_view() {
        let mut form = DesignationForm::default();
        toggle_permission(&mut form.permissions, "notice", PermissionAction::Delete, true);
        let notice = module(&form, "notice");
        assert!(notice.view && notice.delete);

        toggle_permission(&mut form.permissions, "notice", PermissionAction::View, false);
        assert!(!module(&form, "notice").grants_anything());
    }

    #[test]
    fn payload_keeps_only_granted_modules() {
        let mut form = DesignationForm {
            name: "Senior Carer".into(),
            ..DesignationForm::default()
        };
        toggle_permission(&mut form.permissions, "planner", PermissionAction::View, true);
        let payload = form.validate().unwrap();
        assert_eq!(payload.permissions.len(), 1);
        assert_eq!(payload.permissions[0].module, "planner");
    }

    #[test]
    fn edit_keeps_grants_for_unlisted_modules() {
        let record = Designation {
            id: "g1".into(),
            name: "Coordinator".into(),
            department_id: None,
            description: None,
            permissions: vec![
                ModulePermission {
                    module: "vacancy".into(),
                    view: true,
                    ..ModulePermission::default()
                },
                ModulePermission {
                    module: "payroll".into(),
                    view: true,
                    edit: true,
                    ..ModulePermission::default()
                },
            ],
            status: RecordStatus::Active,
        };

        let form = DesignationForm::from_record(&record);
        assert_eq!(form.permissions.len(), PERMISSION_MODULES.len() + 1);
        assert_eq!(form.permissions.last().map(|p| p.module.as_str()), Some("payroll"));

        let payload = form.validate().unwrap();
        let modules: Vec<&str> = payload.permissions.iter().map(|p| p.module.as_str()).collect();
        assert_eq!(modules, vec!["vacancy", "payroll"]);
        assert!(payload.permissions[1].edit);
    }

    #[test]
    fn every_served_module_has_a_row() {
        let matrix = permission_matrix(&[]);
        for module in ["pending_hiring", "device", "service_funder", "document_request"] {
            assert!(matrix.iter().any(|p| p.module == module), "{module} missing");
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        let errors = DesignationForm::default().validate().unwrap_err();
        assert!(errors.has("name"));
    }
}
