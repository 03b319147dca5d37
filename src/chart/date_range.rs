use chrono::Duration;

use crate::model::{DateRange, GanttTask};

/// Span of the sentinel range used when nothing carries a date.
pub const DEFAULT_SPAN_DAYS: i64 = 30;

/// Sentinel range: today through today + 30 days. Keeps an empty or
/// dateless chart from collapsing to a degenerate axis.
pub fn default_range() -> DateRange {
    let today = chrono::Local::now().date_naive();
    DateRange {
        start: today,
        end: today + Duration::days(DEFAULT_SPAN_DAYS),
    }
}

/// Reduce the task list to the smallest closed interval covering every
/// defined span. Pure min/max — padding is the layout engine's business.
pub fn calculate_date_range(tasks: &[GanttTask]) -> DateRange {
    let start = tasks.iter().filter_map(|t| t.start).min();
    let end = tasks.iter().filter_map(|t| t.end).max();
    match (start, end) {
        (Some(start), Some(end)) => DateRange::new(start, end),
        _ => default_range(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dated(id: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> GanttTask {
        let mut t = GanttTask::new(id, id);
        t.start = NaiveDate::from_ymd_opt(start.0, start.1, start.2);
        t.end = NaiveDate::from_ymd_opt(end.0, end.1, end.2);
        t
    }

    #[test]
    fn empty_list_yields_sentinel_range() {
        let range = calculate_date_range(&[]);
        let today = chrono::Local::now().date_naive();
        assert_eq!(range.start, today);
        assert_eq!(range.end, today + Duration::days(DEFAULT_SPAN_DAYS));
    }

    #[test]
    fn dateless_tasks_yield_sentinel_range() {
        let tasks = vec![GanttTask::new("A", "A"), GanttTask::new("B", "B")];
        let range = calculate_date_range(&tasks);
        assert_eq!(range.num_days(), DEFAULT_SPAN_DAYS);
    }

    #[test]
    fn range_covers_min_start_and_max_end() {
        let tasks = vec![
            dated("A", (2024, 1, 1), (2024, 1, 10)),
            dated("B", (2024, 3, 1), (2024, 3, 15)),
        ];
        let range = calculate_date_range(&tasks);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn dateless_tasks_do_not_shrink_the_range() {
        let tasks = vec![
            dated("A", (2024, 2, 1), (2024, 2, 20)),
            GanttTask::new("B", "B"),
        ];
        let range = calculate_date_range(&tasks);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 2, 20).unwrap());
    }
}
