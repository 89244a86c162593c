//! Day timeline geometry and lane grouping.
//!
//! Everything here is pure so the planner views stay thin.

use chrono::NaiveTime;

use crate::{
    api::{Schedule, ScheduleStatus},
    utils::time::minutes_since_midnight,
};

pub const GRID_START_HOUR: u32 = 6;
pub const GRID_END_HOUR: u32 = 22;
const GRID_START: u32 = GRID_START_HOUR * 60;
const GRID_END: u32 = GRID_END_HOUR * 60;

pub const ALLOCATED_COLOR: &str = "#2563eb";
pub const UNALLOCATED_COLOR: &str = "#dc2626";
pub const UNASSIGNED_LANE: &str = "Unassigned";

/// Left offset and width of a visit, both as a percentage of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub width: f64,
}

impl Placement {
    pub fn style(&self, color: &str) -> String {
        format!(
            "left: {:.3}%; width: {:.3}%; background-color: {};",
            self.left, self.width, color
        )
    }
}

fn clamp_to_grid(time: NaiveTime) -> u32 {
    minutes_since_midnight(time).clamp(GRID_START, GRID_END)
}

pub fn placement(start: NaiveTime, end: NaiveTime) -> Placement {
    let span = f64::from(GRID_END - GRID_START);
    let start = clamp_to_grid(start);
    let end = clamp_to_grid(end).max(start);
    Placement {
        left: f64::from(start - GRID_START) / span * 100.0,
        width: f64::from(end - start) / span * 100.0,
    }
}

/// Hour labels along the top of the grid with their offsets.
pub fn hour_marks() -> Vec<(String, f64)> {
    let span = f64::from(GRID_END_HOUR - GRID_START_HOUR);
    (GRID_START_HOUR..=GRID_END_HOUR)
        .map(|hour| {
            (
                format!("{:02}:00", hour),
                f64::from(hour - GRID_START_HOUR) / span * 100.0,
            )
        })
        .collect()
}

pub fn entry_color(entry: &Schedule) -> String {
    match entry.color.as_deref().map(str::trim) {
        Some(color) if !color.is_empty() => color.to_string(),
        _ => match entry.status {
            ScheduleStatus::Allocated => ALLOCATED_COLOR.to_string(),
            ScheduleStatus::Unallocated => UNALLOCATED_COLOR.to_string(),
        },
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LaneGrouping {
    #[default]
    ServiceUser,
    Carer,
}

impl LaneGrouping {
    pub fn label(self) -> &'static str {
        match self {
            LaneGrouping::ServiceUser => "Service user",
            LaneGrouping::Carer => "Carer",
        }
    }

    fn owner(self, entry: &Schedule) -> Option<(String, String)> {
        let (id, name) = match self {
            LaneGrouping::ServiceUser => (&entry.service_user_id, &entry.service_user_name),
            LaneGrouping::Carer => (&entry.employee_id, &entry.employee_name),
        };
        let id = id.as_deref().map(str::trim).filter(|id| !id.is_empty())?;
        let name = name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(id);
        Some((id.to_string(), name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    /// `None` for the unassigned lane.
    pub key: Option<String>,
    pub title: String,
    pub entries: Vec<Schedule>,
}

/// Lanes sorted by title with the unassigned lane last; entries sorted by
/// start time.
pub fn build_lanes(schedules: &[Schedule], grouping: LaneGrouping) -> Vec<Lane> {
    let mut lanes: Vec<Lane> = Vec::new();
    let mut unassigned: Vec<Schedule> = Vec::new();

    for entry in schedules {
        match grouping.owner(entry) {
            Some((id, name)) => match lanes.iter_mut().find(|lane| lane.key.as_deref() == Some(&id)) {
                Some(lane) => lane.entries.push(entry.clone()),
                None => lanes.push(Lane {
                    key: Some(id),
                    title: name,
                    entries: vec![entry.clone()],
                }),
            },
            None => unassigned.push(entry.clone()),
        }
    }

    lanes.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.key.cmp(&b.key))
    });
    if !unassigned.is_empty() {
        lanes.push(Lane {
            key: None,
            title: UNASSIGNED_LANE.to_string(),
            entries: unassigned,
        });
    }
    for lane in &mut lanes {
        lane.entries
            .sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.end_time.cmp(&b.end_time)));
    }
    lanes
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySummary {
    pub total: usize,
    pub allocated: usize,
    pub unallocated: usize,
}

pub fn summarize(schedules: &[Schedule]) -> DaySummary {
    let allocated = schedules
        .iter()
        .filter(|s| s.status == ScheduleStatus::Allocated)
        .count();
    DaySummary {
        total: schedules.len(),
        allocated,
        unallocated: schedules.len() - allocated,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    pub(crate) fn visit(
        id: &str,
        start: (u32, u32),
        end: (u32, u32),
        service_user: Option<(&str, &str)>,
        carer: Option<(&str, &str)>,
    ) -> Schedule {
        Schedule {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            start_time: hm(start.0, start.1),
            end_time: hm(end.0, end.1),
            service_user_id: service_user.map(|(id, _)| id.to_string()),
            service_user_name: service_user.map(|(_, name)| name.to_string()),
            employee_id: carer.map(|(id, _)| id.to_string()),
            employee_name: carer.map(|(_, name)| name.to_string()),
            activity: "Personal care".to_string(),
            status: ScheduleStatus::for_assignee(carer.map(|(id, _)| id)),
            color: None,
        }
    }

    #[test]
    fn placement_is_a_share_of_the_sixteen_hour_grid() {
        let p = placement(hm(6, 0), hm(14, 0));
        assert_eq!(p.left, 0.0);
        assert_eq!(p.width, 50.0);

        let p = placement(hm(10, 0), hm(12, 0));
        assert_eq!(p.left, 25.0);
        assert_eq!(p.width, 12.5);
    }

    #[test]
    fn placement_clamps_into_the_grid() {
        let p = placement(hm(5, 0), hm(7, 0));
        assert_eq!(p.left, 0.0);
        assert_eq!(p.width, 6.25);

        let p = placement(hm(21, 0), hm(23, 30));
        assert_eq!(p.left + p.width, 100.0);

        let p = placement(hm(23, 0), hm(23, 30));
        assert_eq!(p.width, 0.0);
    }

    #[test]
    fn hour_marks_run_from_six_to_ten() {
        let marks = hour_marks();
        assert_eq!(marks.len(), 17);
        assert_eq!(marks[0], ("06:00".to_string(), 0.0));
        assert_eq!(marks[16], ("22:00".to_string(), 100.0));
    }

    #[test]
    fn color_tag_wins_over_status_default() {
        let mut entry = visit("v1", (9, 0), (10, 0), None, None);
        assert_eq!(entry_color(&entry), UNALLOCATED_COLOR);
        entry.status = ScheduleStatus::Allocated;
        assert_eq!(entry_color(&entry), ALLOCATED_COLOR);
        entry.color = Some("#16a34a".into());
        assert_eq!(entry_color(&entry), "#16a34a");
        entry.color = Some("  ".into());
        assert_eq!(entry_color(&entry), ALLOCATED_COLOR);
    }

    #[test]
    fn lanes_sort_by_name_with_unassigned_last() {
        let schedules = vec![
            visit("v1", (11, 0), (12, 0), Some(("su-2", "Arthur Bennett")), Some(("c1", "Casey"))),
            visit("v2", (9, 0), (10, 0), Some(("su-1", "Margaret Hughes")), None),
            visit("v3", (8, 0), (9, 0), Some(("su-2", "Arthur Bennett")), Some(("c2", "Blake"))),
            visit("v4", (7, 0), (8, 0), None, Some(("c1", "Casey"))),
        ];

        let lanes = build_lanes(&schedules, LaneGrouping::ServiceUser);
        let titles: Vec<_> = lanes.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Arthur Bennett", "Margaret Hughes", UNASSIGNED_LANE]);
        let arthur: Vec<_> = lanes[0].entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(arthur, vec!["v3", "v1"]);
        assert_eq!(lanes[2].key, None);

        let lanes = build_lanes(&schedules, LaneGrouping::Carer);
        let titles: Vec<_> = lanes.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Blake", "Casey", UNASSIGNED_LANE]);
        let casey: Vec<_> = lanes[1].entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(casey, vec!["v4", "v1"]);
    }

    #[test]
    fn no_unassigned_lane_when_everything_has_an_owner() {
        let schedules = vec![visit("v1", (9, 0), (10, 0), Some(("su-1", "Margaret")), None)];
        let lanes = build_lanes(&schedules, LaneGrouping::ServiceUser);
        assert_eq!(lanes.len(), 1);
        assert!(build_lanes(&[], LaneGrouping::Carer).is_empty());
    }

    #[test]
    fn lane_title_falls_back_to_id() {
        let mut entry = visit("v1", (9, 0), (10, 0), Some(("su-9", "")), None);
        entry.service_user_name = None;
        let lanes = build_lanes(&[entry], LaneGrouping::ServiceUser);
        assert_eq!(lanes[0].title, "su-9");
    }

    #[test]
    fn summary_counts_by_status() {
        let schedules = vec![
            visit("v1", (9, 0), (10, 0), None, Some(("c1", "Casey"))),
            visit("v2", (9, 0), (10, 0), None, None),
            visit("v3", (9, 0), (10, 0), None, None),
        ];
        assert_eq!(
            summarize(&schedules),
            DaySummary {
                total: 3,
                allocated: 1,
                unallocated: 2
            }
        );
    }
}
