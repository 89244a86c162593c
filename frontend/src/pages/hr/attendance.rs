use crate::{
    api::{ApiClient, Attendance, AttendancePayload, AttendanceStatus, HrRecord, Role},
    components::{option_select::OptionSelect, time_picker::TimePicker},
    pages::crud::{
        input_class, options::use_employee_options, CrudPanel, CrudRepository, CrudViewModel,
        Field, RecordForm,
    },
    utils::{
        forms::{optional_string, FieldErrors},
        time::{format_date, normalize_hhmm, parse_date, parse_hhmm},
    },
};
use leptos::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceForm {
    pub employee_id: String,
    pub date: String,
    pub check_in: String,
    pub check_out: String,
    pub status: AttendanceStatus,
}

fn optional_time(errors: &mut FieldErrors, field: &str, value: &str) -> Option<String> {
    let value = optional_string(value)?;
    if parse_hhmm(&value).is_none() {
        errors.add(field, "Time must be HH:MM");
        return None;
    }
    Some(value)
}

impl RecordForm for AttendanceForm {
    type Record = Attendance;

    fn from_record(record: &Attendance) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            date: format_date(record.date),
            check_in: record.check_in.as_deref().map(normalize_hhmm).unwrap_or_default(),
            check_out: record.check_out.as_deref().map(normalize_hhmm).unwrap_or_default(),
            status: record.status,
        }
    }

    fn validate(&self) -> Result<AttendancePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("employee_id", &self.employee_id, "Employee is required");
        errors.require("date", &self.date, "Date is required");
        let date = parse_date(&self.date);
        if date.is_none() {
            errors.add("date", "Date must be YYYY-MM-DD");
        }
        let check_in = optional_time(&mut errors, "check_in", &self.check_in);
        let check_out = optional_time(&mut errors, "check_out", &self.check_out);
        if let (Some(start), Some(end)) = (
            check_in.as_deref().and_then(parse_hhmm),
            check_out.as_deref().and_then(parse_hhmm),
        ) {
            if end < start {
                errors.add("check_out", "Check-out cannot be before check-in");
            }
        }
        let Some(date) = date else {
            return Err(errors);
        };
        errors.into_result(|| AttendancePayload {
            employee_id: self.employee_id.trim().to_string(),
            date,
            check_in,
            check_out,
            status: self.status,
        })
    }
}

const COLUMNS: &[&str] = &["Employee", "Date", "Check-in", "Check-out", "Status"];

fn cells(record: &Attendance) -> View {
    let dash = || "-".to_string();
    view! {
        <td class="px-4 py-2 text-sm font-medium text-fg">{record.label().to_string()}</td>
        <td class="px-4 py-2 text-sm text-fg">{format_date(record.date)}</td>
        <td class="px-4 py-2 text-sm text-fg">{record.check_in.clone().unwrap_or_else(dash)}</td>
        <td class="px-4 py-2 text-sm text-fg">{record.check_out.clone().unwrap_or_else(dash)}</td>
        <td class="px-4 py-2 text-sm text-fg-muted">{record.status.label()}</td>
    }
    .into_view()
}

fn status_select(
    id: &'static str,
    selected: Signal<String>,
    on_change: Callback<String>,
    include_all: bool,
) -> View {
    view! {
        <select
            id=id
            class=input_class(false)
            on:change=move |ev| on_change.call(event_target_value(&ev))
        >
            {include_all.then(|| view! { <option value="">"All statuses"</option> })}
            {AttendanceStatus::ALL
                .into_iter()
                .map(|status| {
                    view! {
                        <option
                            value=status.as_str()
                            selected=move || selected.get() == status.as_str()
                        >
                            {status.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
    .into_view()
}

fn fields(draft: RwSignal<AttendanceForm>, errors: Signal<FieldErrors>) -> View {
    let employees = use_employee_options(Role::Carer);
    view! {
        <Field label="Employee" id="employee_id" errors=errors field="employee_id" required=true>
            <OptionSelect
                id="employee_id"
                options=employees
                value=Signal::derive(move || draft.with(|d| d.employee_id.clone()))
                on_change=Callback::new(move |value| draft.update(|d| d.employee_id = value))
                placeholder="Choose employee"
                invalid=Signal::derive(move || errors.with(|e| e.has("employee_id")))
            />
        </Field>
        <Field label="Date" id="date" errors=errors field="date" required=true>
            <input
                id="date"
                type="date"
                class=move || input_class(errors.with(|e| e.has("date")))
                prop:value=move || draft.with(|d| d.date.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| d.date = value);
                }
            />
        </Field>
        <div class="grid grid-cols-2 gap-4">
            <Field label="Check-in" id="check_in" errors=errors field="check_in">
                <TimePicker
                    id="check_in"
                    value=Signal::derive(move || draft.with(|d| d.check_in.clone()))
                    on_change=Callback::new(move |value| draft.update(|d| d.check_in = value))
                    minute_step=1
                    invalid=Signal::derive(move || errors.with(|e| e.has("check_in")))
                />
            </Field>
            <Field label="Check-out" id="check_out" errors=errors field="check_out">
                <TimePicker
                    id="check_out"
                    value=Signal::derive(move || draft.with(|d| d.check_out.clone()))
                    on_change=Callback::new(move |value| draft.update(|d| d.check_out = value))
                    minute_step=1
                    invalid=Signal::derive(move || errors.with(|e| e.has("check_out")))
                />
            </Field>
        </div>
        <Field label="Status" id="attendance_status" errors=errors field="status">
            {status_select(
                "attendance_status",
                Signal::derive(move || draft.with(|d| d.status.as_str().to_string())),
                Callback::new(move |value: String| {
                    draft.update(|d| d.status = AttendanceStatus::parse(&value))
                }),
                false,
            )}
        </Field>
    }
    .into_view()
}

#[component]
pub fn AttendancePage() -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let vm = CrudViewModel::<AttendanceForm>::new("Attendance record", CrudRepository::remote(api));
    let status_filter =
        Signal::derive(move || vm.query.with(|q| q.filters.get("status").cloned().unwrap_or_default()));
    let date_filter =
        Signal::derive(move || vm.query.with(|q| q.filters.get("date").cloned().unwrap_or_default()));

    let toolbar = view! {
        <div class="flex items-center gap-2">
            {status_select(
                "status_filter",
                status_filter,
                Callback::new(move |value: String| vm.set_filter("status", &value)),
                true,
            )}
            <input
                type="date"
                aria-label="Filter by date"
                class=input_class(false)
                prop:value=move || date_filter.get()
                on:change=move |ev| vm.set_filter("date", &event_target_value(&ev))
            />
        </div>
    }
    .into_view();

    view! {
        <CrudPanel
            vm=vm
            title="Attendance"
            columns=COLUMNS
            cells=cells
            fields=fields
            with_status=false
            search_placeholder="Search by employee"
            toolbar=toolbar
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(check_in: &str, check_out: &str) -> AttendanceForm {
        AttendanceForm {
            employee_id: "e1".into(),
            date: "2025-03-04".into(),
            check_in: check_in.into(),
            check_out: check_out.into(),
            status: AttendanceStatus::Present,
        }
    }

    #[test]
    fn employee_and_date_are_required() {
        let errors = AttendanceForm::default().validate().unwrap_err();
        assert!(errors.has("employee_id"));
        assert_eq!(errors.get("date"), Some("Date is required"));
    }

    #[test]
    fn check_out_cannot_precede_check_in() {
        let errors = form("17:00", "09:00").validate().unwrap_err();
        assert!(errors.has("check_out"));
        assert!(form("09:00", "17:00").validate().is_ok());
    }

    #[test]
    fn stored_times_with_seconds_edit_cleanly() {
        let record: Attendance = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "employeeId": "e1",
            "date": "2025-03-04",
            "checkIn": "08:58:00",
            "checkOut": "17:02:30",
            "status": "present"
        }))
        .unwrap();
        let form = AttendanceForm::from_record(&record);
        assert_eq!(form.check_in, "08:58");
        assert_eq!(form.check_out, "17:02");

        let payload = form.validate().unwrap();
        assert_eq!(payload.check_in.as_deref(), Some("08:58"));
        assert_eq!(payload.check_out.as_deref(), Some("17:02"));
    }

    #[test]
    fn times_are_optional() {
        let payload = form("", "").validate().unwrap();
        assert_eq!(payload.check_in, None);
        assert_eq!(payload.check_out, None);
    }
}
