use chrono::{Days, NaiveDate};
use leptos::*;

use crate::{
    api::{ApiClient, ApiError, Role, Schedule},
    state::session::use_session,
    utils::time::{parse_date, today_in_app_tz},
};

use super::timeline::LaneGrouping;

/// Who is looking at the planner; decides the `role` / `employeeId` params.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewer {
    pub role: Role,
    pub employee_id: String,
}

pub type ScheduleKey = (NaiveDate, u32, Option<Viewer>);
pub type ScheduleResource = Resource<ScheduleKey, Result<Vec<Schedule>, ApiError>>;

pub fn shift_day(date: NaiveDate, forward: bool) -> NaiveDate {
    let step = Days::new(1);
    let next = if forward {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    next.unwrap_or(date)
}

async fn load_day(api: ApiClient, key: ScheduleKey) -> Result<Vec<Schedule>, ApiError> {
    let (date, _, viewer) = key;
    let Some(viewer) = viewer else {
        return Ok(Vec::new());
    };
    let schedules = api
        .list_schedules(date, viewer.role, Some(&viewer.employee_id))
        .await;
    if let Err(err) = &schedules {
        log::error!("loading schedules for {} failed: {}", date, err.error);
    }
    schedules
}

#[derive(Clone, Copy)]
pub struct PlannerViewModel {
    pub date: RwSignal<NaiveDate>,
    pub grouping: RwSignal<LaneGrouping>,
    pub reload: RwSignal<u32>,
    pub schedules: ScheduleResource,
}

impl PlannerViewModel {
    pub fn new(initial: NaiveDate) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let (session, _) = use_session();
        let date = create_rw_signal(initial);
        let grouping = create_rw_signal(LaneGrouping::default());
        let reload = create_rw_signal(0u32);
        let viewer = create_memo(move |_| {
            session.with(|s| {
                s.user.as_ref().map(|user| Viewer {
                    role: user.role,
                    employee_id: user.id.clone(),
                })
            })
        });
        let schedules = create_resource(
            move || (date.get(), reload.get(), viewer.get()),
            move |key| load_day(api.clone(), key),
        );
        Self {
            date,
            grouping,
            reload,
            schedules,
        }
    }

    pub fn previous_day(&self) {
        self.date.update(|d| *d = shift_day(*d, false));
    }

    pub fn next_day(&self) {
        self.date.update(|d| *d = shift_day(*d, true));
    }

    pub fn today(&self) {
        self.set_date(today_in_app_tz());
    }

    pub fn set_date(&self, date: NaiveDate) {
        if self.date.get_untracked() != date {
            self.date.set(date);
        }
    }

    /// Ignores anything that is not `YYYY-MM-DD`.
    pub fn set_date_input(&self, raw: &str) {
        if let Some(date) = parse_date(raw) {
            self.set_date(date);
        }
    }

    pub fn set_grouping(&self, grouping: LaneGrouping) {
        self.grouping.set(grouping);
    }

    pub fn refetch(&self) {
        self.reload.update(|n| *n = n.wrapping_add(1));
    }

    pub fn rows(&self) -> Vec<Schedule> {
        self.schedules
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
    }
}

pub fn use_planner_view_model() -> PlannerViewModel {
    PlannerViewModel::new(today_in_app_tz())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn shift_day_crosses_month_boundaries() {
        let first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(shift_day(first, false), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert_eq!(shift_day(day(31), true), NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
    }

    #[test]
    fn navigation_moves_the_selected_day() {
        with_runtime(|| {
            let vm = PlannerViewModel::new(day(4));
            vm.next_day();
            vm.next_day();
            assert_eq!(vm.date.get_untracked(), day(6));
            vm.previous_day();
            assert_eq!(vm.date.get_untracked(), day(5));
        });
    }

    #[test]
    fn malformed_date_input_is_ignored() {
        with_runtime(|| {
            let vm = PlannerViewModel::new(day(4));
            vm.set_date_input("04/03/2025");
            assert_eq!(vm.date.get_untracked(), day(4));
            vm.set_date_input("2025-03-10");
            assert_eq!(vm.date.get_untracked(), day(10));
        });
    }

    #[test]
    fn refetch_bumps_the_reload_counter() {
        with_runtime(|| {
            let vm = PlannerViewModel::new(day(4));
            vm.refetch();
            assert_eq!(vm.reload.get_untracked(), 1);
        });
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    #[tokio::test]
    async fn carers_load_only_their_own_visits() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/schedules");
            then.status(200).json_body(json!({
                "data": [{
                    "id": "v1",
                    "date": "2025-03-04",
                    "startTime": "09:00",
                    "endTime": "10:00:00",
                    "serviceUserId": "su-1",
                    "employeeId": "c1",
                    "activity": "Lunch call",
                    "status": "allocated"
                }]
            }));
        });
        let api = ApiClient::new_with_base_url(server.url("/api/v1"));

        let key = (
            NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            0,
            Some(Viewer {
                role: Role::Carer,
                employee_id: "c1".into(),
            }),
        );
        let visits = load_day(api, key).await.unwrap();

        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].activity, "Lunch call");
        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query.get("employeeId").map(String::as_str), Some("c1"));
        assert_eq!(requests[0].query.get("role").map(String::as_str), Some("carer"));
    }

    #[tokio::test]
    async fn anonymous_viewer_makes_no_request() {
        let server = MockServer::start_async().await;
        let api = ApiClient::new_with_base_url(server.url("/api/v1"));
        let visits = load_day(api, (NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(), 0, None))
            .await
            .unwrap();
        assert!(visits.is_empty());
        assert!(server.requests().is_empty());
    }
}
