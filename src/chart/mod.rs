//! The data-preparation pipeline behind the chart: raw API records in,
//! laid-out pixel geometry out. Every stage is a pure function and the whole
//! thing is recomputed from scratch on each ingest or zoom change.

pub mod date_range;
pub mod dependencies;
pub mod layout;
pub mod normalize;
pub mod sort;

pub use date_range::{calculate_date_range, default_range};
pub use dependencies::{extract_dependencies, DependencyEdge};
pub use layout::{calculate_layout, Bar, GanttLayout, LayoutRow};
pub use normalize::{normalize_tasks, parse_date};
pub use sort::sort_tasks_for_gantt;

use crate::model::{DateRange, GanttTask, LayoutConfig, RawTask, ZoomLevel};

/// Everything the chart needs to draw, derived from one batch of raw tasks.
#[derive(Debug, Clone)]
pub struct GanttData {
    /// Normalized tasks in render order.
    pub tasks: Vec<GanttTask>,
    pub dependencies: Vec<DependencyEdge>,
    pub date_range: DateRange,
    /// `None` when there is nothing to render.
    pub layout: Option<GanttLayout>,
}

impl GanttData {
    /// What the chart falls back to while data is absent or malformed.
    pub fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            dependencies: Vec::new(),
            date_range: default_range(),
            layout: None,
        }
    }

    /// Run the full pipeline over a batch of raw tasks.
    pub fn prepare(raw: &[RawTask], zoom: ZoomLevel, config: &LayoutConfig) -> Self {
        Self::prepare_with_fallback(raw, None, zoom, config)
    }

    /// Like [`GanttData::prepare`], but with a server-supplied range hint
    /// that stands in for the sentinel when no task carries a date.
    pub fn prepare_with_fallback(
        raw: &[RawTask],
        fallback_range: Option<DateRange>,
        zoom: ZoomLevel,
        config: &LayoutConfig,
    ) -> Self {
        let tasks = sort_tasks_for_gantt(&normalize_tasks(raw));
        let dependencies = extract_dependencies(&tasks);

        let date_range = if tasks.iter().any(|t| t.has_dates()) {
            calculate_date_range(&tasks)
        } else {
            fallback_range.unwrap_or_else(default_range)
        };

        let layout = calculate_layout(&tasks, date_range, zoom, config);

        Self {
            tasks,
            dependencies,
            date_range,
            layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_degrades_to_empty_data() {
        let data = GanttData::prepare(&[], ZoomLevel::Week, &LayoutConfig::default());
        assert!(data.tasks.is_empty());
        assert!(data.dependencies.is_empty());
        assert!(data.layout.is_none());
    }

    #[test]
    fn fallback_range_replaces_the_sentinel_for_dateless_tasks() {
        use chrono::NaiveDate;
        let raw = vec![RawTask {
            id: "TASK-0001".into(),
            ..Default::default()
        }];
        let hint = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );
        let data = GanttData::prepare_with_fallback(
            &raw,
            Some(hint),
            ZoomLevel::Week,
            &LayoutConfig::default(),
        );
        assert_eq!(data.date_range, hint);
        assert!(data.layout.is_some());
    }

    #[test]
    fn fallback_range_is_ignored_when_tasks_have_dates() {
        use chrono::NaiveDate;
        let mut raw = RawTask {
            id: "TASK-0001".into(),
            ..Default::default()
        };
        raw.exp_start_date = Some("2024-01-01".into());
        raw.exp_end_date = Some("2024-01-10".into());
        let hint = DateRange::new(
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2030, 2, 1).unwrap(),
        );
        let data = GanttData::prepare_with_fallback(
            &[raw],
            Some(hint),
            ZoomLevel::Week,
            &LayoutConfig::default(),
        );
        assert_eq!(
            data.date_range.start,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }
}
