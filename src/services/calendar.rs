use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::calendar_day;
use crate::models::schedule::parse_time_of_day;
use crate::models::ScheduleEvent;

pub const MONTH_GRID_CELLS: usize = 42;
pub const MONTH_CELL_EVENT_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarViewState {
    #[serde(with = "calendar_day")]
    pub reference: NaiveDate,
    pub mode: ViewMode,
}

impl CalendarViewState {
    pub fn new(reference: NaiveDate, mode: ViewMode) -> Self {
        Self { reference, mode }
    }

    pub fn next(&mut self) {
        self.reference = self.step(1);
    }

    pub fn prev(&mut self) {
        self.reference = self.step(-1);
    }

    pub fn today(&mut self, today: NaiveDate) {
        self.reference = today;
    }

    fn step(&self, dir: i64) -> NaiveDate {
        let r = self.reference;
        match self.mode {
            ViewMode::Month | ViewMode::List => {
                let shifted = if dir > 0 {
                    r.checked_add_months(Months::new(1))
                } else {
                    r.checked_sub_months(Months::new(1))
                };
                shifted.unwrap_or(r)
            }
            ViewMode::Week => r + Duration::days(7 * dir),
            ViewMode::Day => r + Duration::days(dir),
        }
    }

    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        let r = self.reference;
        match self.mode {
            ViewMode::Month => {
                let start = week_start(first_of_month(r));
                (start, start + Duration::days(MONTH_GRID_CELLS as i64 - 1))
            }
            ViewMode::Week => {
                let start = week_start(r);
                (start, start + Duration::days(6))
            }
            ViewMode::Day => (r, r),
            ViewMode::List => (first_of_month(r), last_of_month(r)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub id: String,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    pub weekday: u32,
    pub in_current_month: bool,
    pub is_today: bool,
    pub events: Vec<ScheduleEvent>,
    pub hidden_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellGrid {
    pub mode: ViewMode,
    #[serde(with = "calendar_day")]
    pub reference: NaiveDate,
    pub title: String,
    pub cells: Vec<DayCell>,
}

pub fn cell_id(date: NaiveDate) -> String {
    date.format(calendar_day::FORMAT).to_string()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

fn title(reference: NaiveDate, mode: ViewMode) -> String {
    match mode {
        ViewMode::Month | ViewMode::List => reference.format("%B %Y").to_string(),
        ViewMode::Day => reference.format("%A, %B %-d, %Y").to_string(),
        ViewMode::Week => {
            let start = week_start(reference);
            let end = start + Duration::days(6);
            if start.year() != end.year() {
                format!("{} - {}", start.format("%b %-d, %Y"), end.format("%b %-d, %Y"))
            } else if start.month() != end.month() {
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
            } else {
                format!("{} - {}", start.format("%b %-d"), end.format("%-d, %Y"))
            }
        }
    }
}

fn index_by_day(events: &[ScheduleEvent]) -> BTreeMap<NaiveDate, Vec<&ScheduleEvent>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&ScheduleEvent>> = BTreeMap::new();
    for event in events {
        by_day.entry(event.date).or_default().push(event);
    }
    for day in by_day.values_mut() {
        day.sort_by(|a, b| {
            parse_time_of_day(&a.start_time)
                .cmp(&parse_time_of_day(&b.start_time))
                .then_with(|| a.title.cmp(&b.title))
        });
    }
    by_day
}

/// Projects the event list onto the cells of one calendar view.
///
/// Month view always yields 42 cells starting on the Sunday on or before the
/// 1st and caps each cell at three events. Week and day views show every
/// event. List view has one row per day of the month, dropping past days
/// that have no events.
pub fn project(
    events: &[ScheduleEvent],
    reference: NaiveDate,
    mode: ViewMode,
    today: NaiveDate,
) -> CellGrid {
    let by_day = index_by_day(events);
    let (start, end) = CalendarViewState::new(reference, mode).visible_range();
    let month = reference.month();

    let mut cells = Vec::new();
    let mut date = start;
    while date <= end {
        let day_events = by_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);

        if mode == ViewMode::List && day_events.is_empty() && date < today {
            date += Duration::days(1);
            continue;
        }

        let limit = match mode {
            ViewMode::Month => MONTH_CELL_EVENT_LIMIT,
            _ => usize::MAX,
        };
        let shown: Vec<ScheduleEvent> =
            day_events.iter().take(limit).map(|e| (*e).clone()).collect();

        cells.push(DayCell {
            id: cell_id(date),
            date,
            weekday: date.weekday().num_days_from_sunday(),
            in_current_month: date.month() == month,
            is_today: date == today,
            hidden_count: day_events.len() - shown.len(),
            events: shown,
        });
        date += Duration::days(1);
    }

    CellGrid {
        mode,
        reference,
        title: title(reference, mode),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseRef, EventStatus, EventType};

    fn d(s: &str) -> NaiveDate {
        calendar_day::parse(s).unwrap()
    }

    fn event(id: &str, date: &str, start: &str) -> ScheduleEvent {
        ScheduleEvent {
            id: id.to_string(),
            title: format!("Session {id}"),
            event_type: EventType::Theory,
            course: CourseRef {
                id: "c-1".to_string(),
                code: "FRK1".to_string(),
                name: "Forklift".to_string(),
            },
            date: d(date),
            start_time: start.to_string(),
            end_time: "17:00".to_string(),
            location: "Room 1".to_string(),
            meeting_link: None,
            status: EventStatus::Scheduled,
            teacher: None,
        }
    }

    #[test]
    fn test_month_grid_is_42_cells_aligned_to_weekday() {
        for reference in ["2025-02-10", "2025-03-31", "2025-06-01", "2024-02-29", "2026-11-05"] {
            let reference = d(reference);
            let grid = project(&[], reference, ViewMode::Month, reference);
            assert_eq!(grid.cells.len(), MONTH_GRID_CELLS);
            assert_eq!(grid.cells[0].weekday, 0);

            let first = first_of_month(reference);
            let idx = grid.cells.iter().position(|c| c.date == first).unwrap();
            assert_eq!(idx % 7, first.weekday().num_days_from_sunday() as usize);
        }
    }

    #[test]
    fn test_month_grid_marks_adjacent_days() {
        // March 2025 starts on a Saturday.
        let grid = project(&[], d("2025-03-12"), ViewMode::Month, d("2025-03-12"));
        assert_eq!(grid.cells[0].date, d("2025-02-23"));
        assert!(!grid.cells[0].in_current_month);
        assert!(grid.cells[6].in_current_month);
        assert_eq!(grid.cells[6].id, "2025-03-01");
        assert_eq!(grid.cells[41].date, d("2025-04-05"));
        assert_eq!(grid.title, "March 2025");
    }

    #[test]
    fn test_month_cell_truncates_to_three() {
        let events: Vec<_> = ["14:00", "09:00", "11:00", "08:00", "16:00"]
            .iter()
            .enumerate()
            .map(|(i, t)| event(&i.to_string(), "2025-03-12", t))
            .collect();
        let grid = project(&events, d("2025-03-01"), ViewMode::Month, d("2025-03-01"));
        let cell = grid.cells.iter().find(|c| c.id == "2025-03-12").unwrap();
        assert_eq!(cell.events.len(), 3);
        assert_eq!(cell.hidden_count, 2);
        assert_eq!(cell.events[0].start_time, "08:00");
        assert_eq!(cell.events[2].start_time, "11:00");

        let week = project(&events, d("2025-03-12"), ViewMode::Week, d("2025-03-01"));
        let cell = week.cells.iter().find(|c| c.id == "2025-03-12").unwrap();
        assert_eq!(cell.events.len(), 5);
        assert_eq!(cell.hidden_count, 0);
    }

    #[test]
    fn test_events_match_by_calendar_day_only() {
        let json = r#"{"id":"9","title":"Late exam","type":"exam","course":{"id":"c"},
            "date":"2025-03-12T23:30:00-05:00","startTime":"18:00","endTime":"20:00"}"#;
        let late: ScheduleEvent = serde_json::from_str(json).unwrap();
        let early = event("1", "2025-03-12", "08:00");
        let grid = project(&[late, early], d("2025-03-12"), ViewMode::Day, d("2025-03-12"));
        assert_eq!(grid.cells.len(), 1);
        assert_eq!(grid.cells[0].events.len(), 2);
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2025-03-12 is a Wednesday.
        let grid = project(&[], d("2025-03-12"), ViewMode::Week, d("2025-03-12"));
        assert_eq!(grid.cells.len(), 7);
        assert_eq!(grid.cells[0].date, d("2025-03-09"));
        assert_eq!(grid.cells[6].date, d("2025-03-15"));
        assert!(grid.cells[3].is_today);
        assert_eq!(grid.title, "Mar 9 - 15, 2025");

        let across = project(&[], d("2025-04-01"), ViewMode::Week, d("2025-04-01"));
        assert_eq!(across.title, "Mar 30 - Apr 5, 2025");
    }

    #[test]
    fn test_day_view_single_cell() {
        let grid = project(
            &[event("1", "2025-03-12", "09:00"), event("2", "2025-03-13", "09:00")],
            d("2025-03-12"),
            ViewMode::Day,
            d("2025-01-01"),
        );
        assert_eq!(grid.cells.len(), 1);
        assert_eq!(grid.cells[0].events.len(), 1);
        assert_eq!(grid.title, "Wednesday, March 12, 2025");
    }

    #[test]
    fn test_list_view_hides_only_past_empty_days() {
        let events = vec![event("1", "2025-03-03", "09:00"), event("2", "2025-03-20", "09:00")];
        let today = d("2025-03-15");
        let grid = project(&events, d("2025-03-01"), ViewMode::List, today);
        let ids: Vec<&str> = grid.cells.iter().map(|c| c.id.as_str()).collect();

        assert!(ids.contains(&"2025-03-03"));
        assert!(!ids.contains(&"2025-03-02"));
        assert!(!ids.contains(&"2025-03-14"));
        assert!(ids.contains(&"2025-03-15"));
        assert!(ids.contains(&"2025-03-16"));
        assert!(ids.contains(&"2025-03-31"));
        // 3rd plus the 15th through the 31st
        assert_eq!(grid.cells.len(), 1 + 17);
    }

    #[test]
    fn test_navigation_steps() {
        let mut state = CalendarViewState::new(d("2025-01-31"), ViewMode::Month);
        state.next();
        assert_eq!(state.reference, d("2025-02-28"));
        state.prev();
        assert_eq!(state.reference, d("2025-01-28"));

        state.mode = ViewMode::Week;
        state.next();
        assert_eq!(state.reference, d("2025-02-04"));

        state.mode = ViewMode::Day;
        state.prev();
        assert_eq!(state.reference, d("2025-02-03"));

        state.today(d("2025-06-18"));
        assert_eq!(state.reference, d("2025-06-18"));
    }

    #[test]
    fn test_visible_range() {
        let month = CalendarViewState::new(d("2025-03-12"), ViewMode::Month);
        assert_eq!(month.visible_range(), (d("2025-02-23"), d("2025-04-05")));
        let list = CalendarViewState::new(d("2024-02-10"), ViewMode::List);
        assert_eq!(list.visible_range(), (d("2024-02-01"), d("2024-02-29")));
    }
}
