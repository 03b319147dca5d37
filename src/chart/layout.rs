use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::model::{DateRange, GanttTask, LayoutConfig, ZoomLevel};

/// Horizontal extent of one task bar, in chart-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f32,
    pub width: f32,
}

/// One chart row, top to bottom in render order. Dateless tasks keep their
/// row but carry no bar.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRow {
    pub task_id: String,
    pub y: f32,
    pub bar: Option<Bar>,
    pub is_group: bool,
}

/// Pixel geometry of the whole chart for one zoom level.
#[derive(Debug, Clone)]
pub struct GanttLayout {
    /// Rows in render order, matching the sorted task list.
    pub rows: Vec<LayoutRow>,
    index: HashMap<String, usize>,
    /// Drawing range: the task range padded by one zoom unit per side.
    pub range: DateRange,
    pub pixels_per_day: f32,
    pub row_height: f32,
    /// Vertical inset applied to bars inside their row slot.
    pub bar_inset: f32,
    pub width: f32,
    pub height: f32,
}

impl GanttLayout {
    pub fn row(&self, task_id: &str) -> Option<&LayoutRow> {
        self.index.get(task_id).map(|&i| &self.rows[i])
    }

    /// X pixel offset of a date from the left chart edge.
    pub fn x_of(&self, date: NaiveDate) -> f32 {
        (date - self.range.start).num_days() as f32 * self.pixels_per_day
    }
}

/// Map sorted tasks onto pixel rows and bars.
///
/// Returns `None` for an empty task list; callers render nothing in that
/// case. Bars are never narrower than one day so even zero-length spans
/// stay visible and clickable.
pub fn calculate_layout(
    tasks: &[GanttTask],
    range: DateRange,
    zoom: ZoomLevel,
    config: &LayoutConfig,
) -> Option<GanttLayout> {
    if tasks.is_empty() {
        return None;
    }

    let pixels_per_day = sanitize_scale(config.pixels_per_day(zoom), zoom);
    let row_height = if config.row_height.is_finite() && config.row_height > 0.0 {
        config.row_height
    } else {
        LayoutConfig::default().row_height
    };
    let bar_inset = (config.min_row_gap.max(0.0) / 2.0).min(row_height / 4.0);

    let pad = Duration::days(zoom.days_per_unit() as i64);
    let padded = DateRange::new(range.start - pad, range.end + pad);

    let mut rows = Vec::with_capacity(tasks.len());
    let mut index = HashMap::with_capacity(tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        let y = i as f32 * row_height;
        let bar = match (task.start, task.end) {
            (Some(start), Some(end)) => {
                let x = (start - padded.start).num_days() as f32 * pixels_per_day;
                let span_days = (end - start).num_days().max(1) as f32;
                Some(Bar {
                    x,
                    width: span_days * pixels_per_day,
                })
            }
            _ => None,
        };
        index.entry(task.id.clone()).or_insert(i);
        rows.push(LayoutRow {
            task_id: task.id.clone(),
            y,
            bar,
            is_group: task.is_group,
        });
    }

    let width = padded.num_days() as f32 * pixels_per_day;
    let height = tasks.len() as f32 * row_height;

    Some(GanttLayout {
        rows,
        index,
        range: padded,
        pixels_per_day,
        row_height,
        bar_inset,
        width,
        height,
    })
}

fn sanitize_scale(pixels_per_day: f32, zoom: ZoomLevel) -> f32 {
    if pixels_per_day.is_finite() && pixels_per_day > 0.0 {
        pixels_per_day
    } else {
        LayoutConfig::default().pixels_per_day(zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated(id: &str, start: NaiveDate, end: NaiveDate) -> GanttTask {
        let mut t = GanttTask::new(id, id);
        t.start = Some(start);
        t.end = Some(end);
        t
    }

    fn range() -> DateRange {
        DateRange::new(date(2024, 1, 1), date(2024, 1, 31))
    }

    #[test]
    fn zero_tasks_yield_no_layout() {
        let config = LayoutConfig::default();
        assert!(calculate_layout(&[], range(), ZoomLevel::Week, &config).is_none());
    }

    #[test]
    fn height_is_row_count_times_row_height() {
        let tasks = vec![
            dated("A", date(2024, 1, 1), date(2024, 1, 5)),
            dated("B", date(2024, 1, 3), date(2024, 1, 9)),
            GanttTask::new("C", "C"),
        ];
        let config = LayoutConfig::default();
        let layout = calculate_layout(&tasks, range(), ZoomLevel::Day, &config).unwrap();
        assert_eq!(layout.height, 3.0 * config.row_height);
        assert_eq!(layout.rows.len(), 3);
    }

    #[test]
    fn bars_never_collapse_to_zero_width() {
        let d = date(2024, 1, 10);
        let tasks = vec![dated("A", d, d)];
        let config = LayoutConfig::default();
        let layout = calculate_layout(&tasks, range(), ZoomLevel::Day, &config).unwrap();
        let bar = layout.rows[0].bar.unwrap();
        assert_eq!(bar.width, config.pixels_per_day(ZoomLevel::Day));
    }

    #[test]
    fn dateless_tasks_keep_their_row_without_a_bar() {
        let tasks = vec![
            dated("A", date(2024, 1, 1), date(2024, 1, 5)),
            GanttTask::new("B", "B"),
        ];
        let layout =
            calculate_layout(&tasks, range(), ZoomLevel::Week, &LayoutConfig::default()).unwrap();
        assert!(layout.rows[0].bar.is_some());
        assert!(layout.rows[1].bar.is_none());
        assert_eq!(layout.row("B").unwrap().y, layout.rows[1].y);
    }

    #[test]
    fn x_offsets_scale_with_zoom() {
        let tasks = vec![dated("A", date(2024, 1, 8), date(2024, 1, 12))];
        let config = LayoutConfig::default();
        let day = calculate_layout(&tasks, range(), ZoomLevel::Day, &config).unwrap();
        let month = calculate_layout(&tasks, range(), ZoomLevel::Month, &config).unwrap();
        let bar_day = day.rows[0].bar.unwrap();
        let bar_month = month.rows[0].bar.unwrap();
        assert!(bar_day.width > bar_month.width);
        // Day zoom: 8 days from the padded start (Jan 1 minus one day pad).
        assert_eq!(bar_day.x, 8.0 * config.pixels_per_day(ZoomLevel::Day));
    }

    #[test]
    fn total_width_covers_the_padded_range() {
        let tasks = vec![dated("A", date(2024, 1, 1), date(2024, 1, 31))];
        let config = LayoutConfig::default();
        let layout = calculate_layout(&tasks, range(), ZoomLevel::Day, &config).unwrap();
        // 30 days of range plus one day of padding per side.
        assert_eq!(
            layout.width,
            32.0 * config.pixels_per_day(ZoomLevel::Day)
        );
    }
}
