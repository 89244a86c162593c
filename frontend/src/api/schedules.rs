use chrono::NaiveDate;

use super::{
    client::ApiClient,
    records::{CreateSchedule, Schedule},
    types::{ApiError, Role},
};

/// Query for one planner day. Staff and carers only see their own visits.
pub fn day_params(date: NaiveDate, role: Role, employee_id: Option<&str>) -> Vec<(String, String)> {
    let mut params = vec![
        ("date".to_string(), date.format("%Y-%m-%d").to_string()),
        ("role".to_string(), role.as_str().to_string()),
    ];
    if matches!(role, Role::Staff | Role::Carer) {
        if let Some(id) = employee_id.filter(|id| !id.is_empty()) {
            params.push(("employeeId".to_string(), id.to_string()));
        }
    }
    params
}

impl ApiClient {
    pub async fn list_schedules(
        &self,
        date: NaiveDate,
        role: Role,
        employee_id: Option<&str>,
    ) -> Result<Vec<Schedule>, ApiError> {
        self.get_json("/schedules", &day_params(date, role, employee_id))
            .await
    }

    pub async fn create_schedule(&self, payload: &CreateSchedule) -> Result<Schedule, ApiError> {
        self.post_json("/schedules", payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_params_scope_carers_to_themselves() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let params = day_params(date, Role::Carer, Some("c1"));
        assert_eq!(
            params,
            vec![
                ("date".to_string(), "2025-03-04".to_string()),
                ("role".to_string(), "carer".to_string()),
                ("employeeId".to_string(), "c1".to_string()),
            ]
        );
    }

    #[test]
    fn day_params_leave_managers_unscoped() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let params = day_params(date, Role::Manager, Some("m1"));
        assert_eq!(params.len(), 2);
    }
}
