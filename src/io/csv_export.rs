use std::path::Path;

use crate::model::GanttTask;

/// Export the normalized task list to a semicolon-delimited CSV file.
///
/// Columns: ID ; Subject ; Status ; Priority ; Progress ; Start ; End ;
/// Assigned To ; Parent ; Group. Dates are formatted as YYYY-MM-DD and
/// progress as a whole percentage. Returns the number of tasks written.
pub fn export_csv(tasks: &[GanttTask], path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record([
        "ID",
        "Subject",
        "Status",
        "Priority",
        "Progress",
        "Start",
        "End",
        "Assigned To",
        "Parent",
        "Group",
    ])
    .map_err(|e| format!("Failed to write header: {}", e))?;

    for task in tasks {
        let fmt_date = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
        };
        wtr.write_record([
            task.id.as_str(),
            task.label.as_str(),
            task.status.label(),
            task.priority.label(),
            &format!("{}%", (task.progress * 100.0).round() as i32),
            &fmt_date(task.start),
            &fmt_date(task.end),
            task.assignee.as_deref().unwrap_or(""),
            task.parent.as_deref().unwrap_or(""),
            if task.is_group { "yes" } else { "" },
        ])
        .map_err(|e| format!("Failed to write task '{}': {}", task.label, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(tasks.len())
}
