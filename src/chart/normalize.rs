use chrono::NaiveDate;

use crate::model::{GanttTask, RawTask, TaskPriority, TaskStatus};

/// Try parsing a date string with several common formats.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in &[
        "%Y-%m-%d",
        "%d/%m/%Y",
        "%m/%d/%Y",
        "%d-%m-%Y",
        "%d.%m.%Y",
        "%Y/%m/%d",
        "%m-%d-%Y",
    ] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Turn raw API records into chartable tasks, one output per input.
///
/// Malformed records are repaired, never dropped: missing text fields get
/// defaults, progress is clamped, unparseable dates become `None`, and a
/// one-sided span is extended to a single day.
pub fn normalize_tasks(raw: &[RawTask]) -> Vec<GanttTask> {
    raw.iter().map(normalize_task).collect()
}

fn normalize_task(raw: &RawTask) -> GanttTask {
    let label = raw
        .subject
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Untitled")
        .to_string();

    let status = raw
        .status
        .as_deref()
        .and_then(TaskStatus::parse)
        .unwrap_or_default();
    let priority = raw
        .priority
        .as_deref()
        .and_then(TaskPriority::parse)
        .unwrap_or_default();

    let progress = match raw.progress {
        Some(p) if p.is_finite() => (p.clamp(0.0, 100.0) / 100.0) as f32,
        _ => 0.0,
    };

    let start = raw.exp_start_date.as_deref().and_then(parse_date);
    let end = raw.exp_end_date.as_deref().and_then(parse_date);
    // Derive the missing side so every dated task spans at least one day,
    // and force end >= start when the backend delivers them inverted.
    let (start, end) = match (start, end) {
        (Some(s), Some(e)) => (Some(s), Some(e.max(s))),
        (Some(s), None) => (Some(s), Some(s)),
        (None, Some(e)) => (Some(e), Some(e)),
        (None, None) => (None, None),
    };

    let assignee = raw
        .assigned_to
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    // A task cannot be its own parent; the sorter handles dangling ids.
    let parent = raw
        .parent_task_id
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty() && *p != raw.id)
        .map(str::to_string);

    let depends_on = raw
        .depends_on
        .iter()
        .map(|d| d.dependent_task_id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    GanttTask {
        id: raw.id.clone(),
        label,
        status,
        priority,
        progress,
        start,
        end,
        assignee,
        parent,
        is_group: raw.is_group,
        depends_on,
        rank: 0,
        depth: 0,
    }
}
