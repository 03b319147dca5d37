use serde::{Deserialize, Serialize};

/// A task record as the project-tasks API delivers it.
///
/// Everything except the id is optional; the backend routinely omits fields
/// and ships dates as strings. Normalization fills the gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTask {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub exp_start_date: Option<String>,
    #[serde(default)]
    pub exp_end_date: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub parent_task_id: Option<String>,
    #[serde(default, deserialize_with = "flag::deserialize")]
    pub is_group: bool,
    #[serde(default)]
    pub depends_on: Vec<DependsOnRef>,
}

/// One entry of a task's `depends_on` child list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependsOnRef {
    pub dependent_task_id: String,
}

/// Date span hint attached to the pre-shaped Gantt payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiDateRange {
    #[serde(default)]
    pub min_date: Option<String>,
    #[serde(default)]
    pub max_date: Option<String>,
}

/// Response of the dedicated Gantt endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GanttPayload {
    #[serde(default)]
    pub project: Option<String>,
    pub tasks: Vec<RawTask>,
    #[serde(default)]
    pub date_range: Option<ApiDateRange>,
}

/// Response of the generic paginated task-list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListPayload {
    pub data: Vec<RawTask>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

/// Either payload shape the viewer accepts. Detection keys off the required
/// field: `tasks` for the Gantt endpoint, `data` for the task list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TaskPayload {
    Gantt(GanttPayload),
    List(TaskListPayload),
}

/// The `is_group` flag arrives as a bool or a 0/1 integer depending on the
/// upstream serializer.
mod flag {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Flag>::deserialize(deserializer)? {
            Some(Flag::Bool(b)) => b,
            Some(Flag::Int(i)) => i != 0,
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gantt_payload_is_detected() {
        let json = r#"{
            "project": "ERP Rollout",
            "tasks": [{"id": "TASK-0001", "subject": "Kickoff", "is_group": 0}],
            "date_range": {"min_date": "2024-01-01", "max_date": "2024-02-01"}
        }"#;
        match serde_json::from_str::<TaskPayload>(json).unwrap() {
            TaskPayload::Gantt(p) => {
                assert_eq!(p.project.as_deref(), Some("ERP Rollout"));
                assert_eq!(p.tasks.len(), 1);
                assert!(!p.tasks[0].is_group);
                assert!(p.date_range.is_some());
            }
            TaskPayload::List(_) => panic!("expected Gantt shape"),
        }
    }

    #[test]
    fn list_payload_is_detected() {
        let json = r#"{"data": [{"id": "TASK-0002", "is_group": true}], "total": 1}"#;
        match serde_json::from_str::<TaskPayload>(json).unwrap() {
            TaskPayload::List(p) => {
                assert_eq!(p.data.len(), 1);
                assert!(p.data[0].is_group);
                assert!(p.data[0].depends_on.is_empty());
            }
            TaskPayload::Gantt(_) => panic!("expected List shape"),
        }
    }

    #[test]
    fn missing_fields_default() {
        let task: RawTask = serde_json::from_str(r#"{"id": "TASK-0003"}"#).unwrap();
        assert!(task.subject.is_none());
        assert!(task.progress.is_none());
        assert!(!task.is_group);
        assert!(task.depends_on.is_empty());
    }
}
