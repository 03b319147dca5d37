use std::path::Path;

use crate::chart::parse_date;
use crate::model::{ApiDateRange, DateRange, RawTask, TaskPayload};

/// Page size of the generic task-list endpoint. Anything past it was never
/// part of one fetch and is dropped with a warning.
pub const PAGE_LIMIT: usize = 500;

/// One ingested batch, whichever payload shape delivered it.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub name: String,
    pub tasks: Vec<RawTask>,
    /// Range hint from the Gantt endpoint, when present and parseable.
    pub server_range: Option<DateRange>,
}

/// Load a payload document from disk. Accepts both supported shapes.
pub fn load_payload(path: &Path) -> Result<LoadedProject, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let payload: TaskPayload = serde_json::from_str(&json)
        .map_err(|e| format!("Unrecognized payload in {}: {}", path.display(), e))?;

    let fallback_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Imported Project");
    Ok(project_from_payload(payload, fallback_name))
}

/// Reshape either payload into one batch of raw tasks.
///
/// The list path mirrors the fallback fetch: no project metadata, no range
/// hint, and at most [`PAGE_LIMIT`] rows.
pub fn project_from_payload(payload: TaskPayload, fallback_name: &str) -> LoadedProject {
    match payload {
        TaskPayload::Gantt(p) => LoadedProject {
            name: p.project.unwrap_or_else(|| fallback_name.to_string()),
            server_range: p.date_range.as_ref().and_then(parse_range),
            tasks: p.tasks,
        },
        TaskPayload::List(p) => {
            let mut tasks = p.data;
            if tasks.len() > PAGE_LIMIT {
                eprintln!(
                    "Task list exceeds the page limit; keeping {} of {} rows",
                    PAGE_LIMIT,
                    tasks.len()
                );
                tasks.truncate(PAGE_LIMIT);
            }
            LoadedProject {
                name: fallback_name.to_string(),
                tasks,
                server_range: None,
            }
        }
    }
}

fn parse_range(range: &ApiDateRange) -> Option<DateRange> {
    let min = range.min_date.as_deref().and_then(parse_date)?;
    let max = range.max_date.as_deref().and_then(parse_date)?;
    Some(DateRange::new(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GanttPayload, TaskListPayload};

    fn raw(id: &str) -> RawTask {
        RawTask {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn gantt_shape_carries_name_and_range() {
        let payload = TaskPayload::Gantt(GanttPayload {
            project: Some("Warehouse Move".into()),
            tasks: vec![raw("TASK-0001")],
            date_range: Some(ApiDateRange {
                min_date: Some("2024-01-01".into()),
                max_date: Some("2024-02-01".into()),
            }),
        });
        let loaded = project_from_payload(payload, "fallback");
        assert_eq!(loaded.name, "Warehouse Move");
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.server_range.unwrap().num_days(), 31);
    }

    #[test]
    fn unparseable_range_hint_is_dropped() {
        let payload = TaskPayload::Gantt(GanttPayload {
            project: None,
            tasks: vec![],
            date_range: Some(ApiDateRange {
                min_date: Some("whenever".into()),
                max_date: Some("2024-02-01".into()),
            }),
        });
        let loaded = project_from_payload(payload, "fallback");
        assert_eq!(loaded.name, "fallback");
        assert!(loaded.server_range.is_none());
    }

    #[test]
    fn list_shape_truncates_at_the_page_limit() {
        let data: Vec<RawTask> = (0..PAGE_LIMIT + 40)
            .map(|i| raw(&format!("TASK-{i:05}")))
            .collect();
        let payload = TaskPayload::List(TaskListPayload {
            data,
            total: Some((PAGE_LIMIT + 40) as u64),
            limit: Some(PAGE_LIMIT as u64),
        });
        let loaded = project_from_payload(payload, "tasks");
        assert_eq!(loaded.tasks.len(), PAGE_LIMIT);
        assert!(loaded.server_range.is_none());
    }
}
