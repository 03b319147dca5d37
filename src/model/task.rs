use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Workflow status of a task as reported by the ERP backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    Open,
    Working,
    PendingReview,
    Overdue,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Parse a backend status string. Matching is case-insensitive and
    /// tolerant of the spelling variants seen across ERP modules.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" | "new" | "pending" | "not started" | "not-started" => Some(Self::Open),
            "working" | "in progress" | "in-progress" | "active" | "started" => {
                Some(Self::Working)
            }
            "pending review" | "pending-review" | "review" => Some(Self::PendingReview),
            "overdue" => Some(Self::Overdue),
            "completed" | "complete" | "done" | "finished" | "closed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Working => "Working",
            Self::PendingReview => "Pending Review",
            Self::Overdue => "Overdue",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Priority of a task. Backends that omit it get `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" | "normal" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" | "critical" => Some(Self::Urgent),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

/// A normalized task ready for charting.
///
/// Dates may be absent: a task with neither start nor end still occupies a
/// row in the chart but contributes nothing to the visible date span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttTask {
    pub id: String,
    pub label: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Progress from 0.0 (not started) to 1.0 (complete).
    pub progress: f32,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub assignee: Option<String>,
    /// Id of the parent task. A missing or unresolvable parent makes the
    /// task a root.
    pub parent: Option<String>,
    /// Container tasks render as rollup bars and carry child tasks.
    pub is_group: bool,
    /// Ids of tasks that must render before this one (connector sources).
    pub depends_on: Vec<String>,
    /// Render position assigned by the sorter (0-based, top to bottom).
    pub rank: usize,
    /// Nesting depth assigned by the sorter (roots are 0).
    pub depth: usize,
}

impl GanttTask {
    /// Create a bare task with defaults. Mostly useful in tests.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            progress: 0.0,
            start: None,
            end: None,
            assignee: None,
            parent: None,
            is_group: false,
            depends_on: Vec::new(),
            rank: 0,
            depth: 0,
        }
    }

    /// Whether the task carries a plottable span.
    pub fn has_dates(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}
