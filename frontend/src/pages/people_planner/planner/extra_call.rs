use chrono::NaiveDate;

use crate::{
    api::{ApiClient, CreateSchedule, Schedule, ScheduleStatus},
    pages::crud::SubmitError,
    utils::{
        forms::{optional_string, FieldErrors},
        time::{format_date, parse_date, parse_hhmm},
    },
};

/// Preset colour tags offered by the form; blank keeps the status colour.
pub const COLOR_PRESETS: &[(&str, &str)] = &[
    ("", "Status colour"),
    ("#16a34a", "Green"),
    ("#9333ea", "Purple"),
    ("#f59e0b", "Amber"),
    ("#0891b2", "Teal"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ExtraCallForm {
    pub service_user_id: String,
    pub employee_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub activity: String,
    pub color: String,
}

impl ExtraCallForm {
    pub fn for_day(date: NaiveDate) -> Self {
        Self {
            service_user_id: String::new(),
            employee_id: String::new(),
            date: format_date(date),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            activity: String::new(),
            color: String::new(),
        }
    }

    pub fn status(&self) -> ScheduleStatus {
        ScheduleStatus::for_assignee(Some(&self.employee_id))
    }

    pub fn validate(&self) -> Result<CreateSchedule, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("service_user_id", &self.service_user_id, "Service user is required");
        errors.require("activity", &self.activity, "Activity is required");
        errors.require("start_time", &self.start_time, "Start time is required");
        errors.require("end_time", &self.end_time, "End time is required");

        let date = parse_date(&self.date);
        if date.is_none() {
            errors.add("date", "Date must be YYYY-MM-DD");
        }
        let start = parse_hhmm(&self.start_time);
        let end = parse_hhmm(&self.end_time);
        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                errors.add("end_time", "End time must be after start time");
            }
        }
        let color = optional_string(&self.color);
        if let Some(color) = &color {
            if !is_hex_color(color) {
                errors.add("color", "Colour must look like #1a2b3c");
            }
        }

        let (Some(date), Some(start_time), Some(end_time)) = (date, start, end) else {
            return Err(errors);
        };
        errors.into_result(|| CreateSchedule {
            date,
            start_time,
            end_time,
            service_user_id: self.service_user_id.trim().to_string(),
            employee_id: optional_string(&self.employee_id),
            activity: self.activity.trim().to_string(),
            status: self.status(),
            color,
        })
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

pub async fn create_extra_call(api: &ApiClient, form: &ExtraCallForm) -> Result<Schedule, SubmitError> {
    let payload = form.validate().map_err(SubmitError::Invalid)?;
    let schedule = api.create_schedule(&payload).await?;
    log::info!(
        "extra call {} created for {} ({})",
        schedule.id,
        payload.service_user_id,
        schedule.status.label()
    );
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ExtraCallForm {
        ExtraCallForm {
            service_user_id: "su-1".into(),
            activity: "Medication prompt".into(),
            ..ExtraCallForm::for_day(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap())
        }
    }

    #[test]
    fn status_follows_the_carer() {
        let mut f = form();
        assert_eq!(f.validate().unwrap().status, ScheduleStatus::Unallocated);
        f.employee_id = "c1".into();
        let payload = f.validate().unwrap();
        assert_eq!(payload.status, ScheduleStatus::Allocated);
        assert_eq!(payload.employee_id.as_deref(), Some("c1"));
    }

    #[test]
    fn required_fields_are_reported() {
        let errors = ExtraCallForm::for_day(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap())
            .validate()
            .unwrap_err();
        assert!(errors.has("service_user_id"));
        assert!(errors.has("activity"));
        assert!(!errors.has("start_time"));
    }

    #[test]
    fn start_must_precede_end() {
        let f = ExtraCallForm {
            start_time: "10:00".into(),
            end_time: "10:00".into(),
            ..form()
        };
        assert_eq!(
            f.validate().unwrap_err().get("end_time"),
            Some("End time must be after start time")
        );
    }

    #[test]
    fn colour_tag_is_checked() {
        let f = ExtraCallForm {
            color: "green".into(),
            ..form()
        };
        assert!(f.validate().unwrap_err().has("color"));
        let f = ExtraCallForm {
            color: "#16A34A".into(),
            ..form()
        };
        assert_eq!(f.validate().unwrap().color.as_deref(), Some("#16A34A"));
    }
}
