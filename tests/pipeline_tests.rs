use chrono::NaiveDate;

use ganttview::chart::{DependencyEdge, GanttData};
use ganttview::io::{project_from_payload, PAGE_LIMIT};
use ganttview::model::{
    DependsOnRef, LayoutConfig, RawTask, TaskPayload, TaskStatus, ZoomLevel,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn raw_task(id: &str) -> RawTask {
    RawTask {
        id: id.to_string(),
        ..Default::default()
    }
}

#[test]
fn three_task_scenario_end_to_end() {
    let mut task1 = raw_task("TASK-0001");
    task1.subject = Some("Task1".into());
    task1.exp_start_date = Some("2024-01-01".into());
    task1.exp_end_date = Some("2024-01-05".into());

    let mut task2 = raw_task("TASK-0002");
    task2.subject = Some("Task2".into());
    task2.exp_start_date = Some("2024-01-03".into());
    task2.exp_end_date = Some("2024-01-04".into());
    task2.parent_task_id = Some("TASK-0001".into());
    task2.depends_on = vec![DependsOnRef {
        dependent_task_id: "TASK-0001".into(),
    }];

    let mut task3 = raw_task("TASK-0003");
    task3.subject = Some("Task3".into());

    let config = LayoutConfig::default();
    let data = GanttData::prepare(&[task1, task2, task3], ZoomLevel::Week, &config);

    // Render order: parent, child, then the dateless root
    let order: Vec<&str> = data.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(order, vec!["TASK-0001", "TASK-0002", "TASK-0003"]);
    assert_eq!(data.tasks[1].depth, 1);

    assert_eq!(data.date_range.start, date(2024, 1, 1));
    assert_eq!(data.date_range.end, date(2024, 1, 5));

    assert_eq!(
        data.dependencies,
        vec![DependencyEdge {
            from: "TASK-0001".into(),
            to: "TASK-0002".into()
        }]
    );

    let layout = data.layout.expect("three tasks must produce a layout");
    assert_eq!(layout.rows.len(), 3);
    assert_eq!(layout.height, 3.0 * config.row_height);
    assert!(layout.rows[0].bar.is_some());
    assert!(layout.rows[2].bar.is_none());
}

#[test]
fn gantt_payload_flows_through_the_pipeline() {
    let json = r#"{
        "project": "ERP Rollout",
        "tasks": [
            {
                "id": "TASK-0001",
                "subject": "Phase 1",
                "is_group": 1,
                "exp_start_date": "2024-02-01",
                "exp_end_date": "2024-02-20"
            },
            {
                "id": "TASK-0002",
                "subject": "Configure ledgers",
                "status": "Working",
                "progress": 35,
                "parent_task_id": "TASK-0001",
                "exp_start_date": "2024-02-01",
                "exp_end_date": "2024-02-10",
                "depends_on": [
                    {"dependent_task_id": "TASK-0002"},
                    {"dependent_task_id": "TASK-9999"}
                ]
            }
        ],
        "date_range": {"min_date": "2024-02-01", "max_date": "2024-03-01"}
    }"#;

    let payload: TaskPayload = serde_json::from_str(json).unwrap();
    let project = project_from_payload(payload, "fallback");
    assert_eq!(project.name, "ERP Rollout");

    let data = GanttData::prepare_with_fallback(
        &project.tasks,
        project.server_range,
        ZoomLevel::Month,
        &LayoutConfig::default(),
    );

    assert_eq!(data.tasks.len(), 2);
    assert!(data.tasks[0].is_group);
    assert_eq!(data.tasks[1].status, TaskStatus::Working);
    assert_eq!(data.tasks[1].progress, 0.35);
    // Self-reference and unknown id both dropped
    assert!(data.dependencies.is_empty());
    // Tasks carry dates, so the server hint does not override the reduction
    assert_eq!(data.date_range.start, date(2024, 2, 1));
    assert_eq!(data.date_range.end, date(2024, 2, 20));
    assert!(data.layout.is_some());
}

#[test]
fn list_payload_is_reshaped_and_truncated() {
    let tasks: Vec<String> = (0..PAGE_LIMIT + 10)
        .map(|i| format!(r#"{{"id": "TASK-{i:05}", "subject": "Row {i}"}}"#))
        .collect();
    let json = format!(r#"{{"data": [{}], "total": {}}}"#, tasks.join(","), tasks.len());

    let payload: TaskPayload = serde_json::from_str(&json).unwrap();
    let project = project_from_payload(payload, "open-tasks");
    assert_eq!(project.name, "open-tasks");
    assert_eq!(project.tasks.len(), PAGE_LIMIT);
    assert!(project.server_range.is_none());

    let data = GanttData::prepare(&project.tasks, ZoomLevel::Week, &LayoutConfig::default());
    assert_eq!(data.tasks.len(), PAGE_LIMIT);
    // All rows are dateless: sentinel range, but a real layout
    let layout = data.layout.expect("rows without dates still get a layout");
    assert!(layout.rows.iter().all(|r| r.bar.is_none()));
}

#[test]
fn malformed_records_degrade_instead_of_failing() {
    let json = r#"{
        "tasks": [
            {"id": "TASK-0001", "subject": "  ", "status": "???", "progress": 900,
             "exp_start_date": "not a date", "parent_task_id": "TASK-0001"},
            {"id": "TASK-0002", "parent_task_id": "TASK-GONE"}
        ]
    }"#;
    let payload: TaskPayload = serde_json::from_str(json).unwrap();
    let project = project_from_payload(payload, "fallback");
    let data = GanttData::prepare(&project.tasks, ZoomLevel::Day, &LayoutConfig::default());

    assert_eq!(data.tasks.len(), 2);
    assert_eq!(data.tasks[0].label, "Untitled");
    assert_eq!(data.tasks[0].status, TaskStatus::Open);
    assert_eq!(data.tasks[0].progress, 1.0);
    assert!(data.tasks[0].start.is_none());
    // Both end up as roots: self-parent cleared, dangling parent unresolved
    assert!(data.tasks.iter().all(|t| t.depth == 0));
}

#[test]
fn zoom_levels_rescale_without_reordering() {
    let mut a = raw_task("A");
    a.exp_start_date = Some("2024-01-01".into());
    a.exp_end_date = Some("2024-01-15".into());
    let mut b = raw_task("B");
    b.exp_start_date = Some("2024-01-10".into());
    b.exp_end_date = Some("2024-01-20".into());
    let raw = vec![a, b];

    let config = LayoutConfig::default();
    let day = GanttData::prepare(&raw, ZoomLevel::Day, &config);
    let month = GanttData::prepare(&raw, ZoomLevel::Month, &config);

    let ids = |d: &GanttData| -> Vec<String> { d.tasks.iter().map(|t| t.id.clone()).collect() };
    assert_eq!(ids(&day), ids(&month));

    let width = |d: &GanttData| d.layout.as_ref().unwrap().width;
    assert!(width(&day) > width(&month));
}
