use crate::{
    api::{Device, DevicePayload, RecordStatus},
    fixtures,
    pages::crud::{
        text_input, CrudPanel, CrudRepository, CrudViewModel, Field, FixtureStore, RecordForm,
    },
    utils::forms::{optional_string, FieldErrors},
};
use leptos::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceForm {
    pub name: String,
    pub serial_number: String,
    pub assigned_to: String,
    pub status: RecordStatus,
}

impl RecordForm for DeviceForm {
    type Record = Device;

    fn from_record(record: &Device) -> Self {
        Self {
            name: record.name.clone(),
            serial_number: record.serial_number.clone(),
            assigned_to: record.assigned_to.clone().unwrap_or_default(),
            status: record.status,
        }
    }

    fn validate(&self) -> Result<DevicePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Device name is required");
        errors.require("serial_number", &self.serial_number, "Serial number is required");
        errors.into_result(|| DevicePayload {
            name: self.name.trim().to_string(),
            serial_number: self.serial_number.trim().to_uppercase(),
            assigned_to: optional_string(&self.assigned_to),
            status: self.status,
        })
    }
}

pub fn device_repository() -> CrudRepository<Device> {
    CrudRepository::fixture(FixtureStore::new(fixtures::devices(), Device::from_payload))
}

const COLUMNS: &[&str] = &["Device", "Serial number", "Assigned to"];

fn cells(device: &Device) -> View {
    view! {
        <td class="px-4 py-2 text-sm font-medium text-fg">{device.name.clone()}</td>
        <td class="px-4 py-2 text-sm font-mono text-fg">{device.serial_number.clone()}</td>
        <td class="px-4 py-2 text-sm text-fg-muted">
            {device.assigned_to.clone().unwrap_or_else(|| "Unassigned".to_string())}
        </td>
    }
    .into_view()
}

fn fields(draft: RwSignal<DeviceForm>, errors: Signal<FieldErrors>) -> View {
    view! {
        <Field label="Device name" id="name" errors=errors field="name" required=true>
            {text_input(draft, errors, "name", |d| d.name.clone(), |d, v| d.name = v)}
        </Field>
        <Field label="Serial number" id="serial_number" errors=errors field="serial_number" required=true>
            {text_input(draft, errors, "serial_number", |d| d.serial_number.clone(), |d, v| d.serial_number = v)}
        </Field>
        <Field label="Assigned to" id="assigned_to" errors=errors field="assigned_to">
            {text_input(draft, errors, "assigned_to", |d| d.assigned_to.clone(), |d, v| d.assigned_to = v)}
        </Field>
    }
    .into_view()
}

#[component]
pub fn DevicePage() -> impl IntoView {
    let vm = CrudViewModel::<DeviceForm>::new("Device", device_repository());

    view! {
        <CrudPanel
            vm=vm
            title="Devices"
            columns=COLUMNS
            cells=cells
            fields=fields
            search_placeholder="Search by name or serial"
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_serial_are_required() {
        let errors = DeviceForm::default().validate().unwrap_err();
        assert!(errors.has("name"));
        assert_eq!(errors.get("serial_number"), Some("Serial number is required"));
    }

    #[test]
    fn serial_is_normalised() {
        let payload = DeviceForm {
            name: "Pixel 7a".into(),
            serial_number: " pp-123 ".into(),
            ..DeviceForm::default()
        }
        .validate()
        .unwrap();
        assert_eq!(payload.serial_number, "PP-123");
        assert_eq!(payload.assigned_to, None);
    }
}
