pub mod raw;
pub mod task;
pub mod timeline;

pub use raw::{ApiDateRange, DependsOnRef, GanttPayload, RawTask, TaskListPayload, TaskPayload};
pub use task::{GanttTask, TaskPriority, TaskStatus};
pub use timeline::{DateRange, LayoutConfig, ZoomLevel};
