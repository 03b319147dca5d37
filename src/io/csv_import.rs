use std::path::Path;

use crate::model::{DependsOnRef, RawTask};

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Col {
    Id,
    Subject,
    Start,
    End,
    Status,
    Priority,
    Progress,
    Assignee,
    Parent,
    Group,
    DependsOn,
}

fn header_to_col(normalized: &str) -> Option<Col> {
    match normalized {
        "id" | "taskid" | "task" | "key" | "ref" => Some(Col::Id),

        "subject" | "name" | "taskname" | "label" | "title" | "activity" => Some(Col::Subject),

        "start" | "startdate" | "expstartdate" | "expectedstart" | "from" | "begin" => {
            Some(Col::Start)
        }

        "end" | "enddate" | "expenddate" | "expectedend" | "to" | "finish" | "due" | "duedate" => {
            Some(Col::End)
        }

        "status" | "state" | "stage" => Some(Col::Status),

        "priority" | "pri" | "importance" => Some(Col::Priority),

        "progress" | "done" | "percentcomplete" | "complete" => Some(Col::Progress),

        "assignedto" | "assignee" | "owner" | "responsible" => Some(Col::Assignee),

        "parent" | "parenttask" | "parenttaskid" | "subtaskof" => Some(Col::Parent),

        "isgroup" | "group" | "container" | "phase" => Some(Col::Group),

        "dependson" | "dependencies" | "deps" | "predecessors" => Some(Col::DependsOn),

        _ => None,
    }
}

fn parse_truthy(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1" | "group")
}

/// Split a dependency cell into individual task ids.
fn split_depends_on(cell: &str) -> Vec<DependsOnRef> {
    cell.split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| DependsOnRef {
            dependent_task_id: s.to_string(),
        })
        .collect()
}

fn parse_progress(cell: &str) -> Option<f64> {
    cell.trim().trim_end_matches('%').trim().parse::<f64>().ok()
}

/// Import raw task rows from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches headers
/// flexibly. Only a subject column is required — everything else is filled
/// by normalization later. Rows without a usable subject are skipped, and
/// rows without an id get a generated one so parent and dependency cells
/// can still reference tasks by id. Returns `(tasks, skipped_count)`.
pub fn import_csv(path: &Path) -> Result<(Vec<RawTask>, usize), String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read CSV headers: {}", e))?
        .clone();

    let col_map: Vec<Option<Col>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    if !col_map.iter().any(|c| *c == Some(Col::Subject)) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(format!(
            "CSV is missing a subject column. Found headers: {:?}. \
             Need a column named Subject, Name, Title or similar.",
            found
        ));
    }

    let mut tasks: Vec<RawTask> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        let mut task = RawTask::default();
        for (col_idx, field) in record.iter().enumerate() {
            let Some(Some(col)) = col_map.get(col_idx) else {
                continue;
            };
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            match col {
                Col::Id => task.id = field.to_string(),
                Col::Subject => task.subject = Some(field.to_string()),
                Col::Start => task.exp_start_date = Some(field.to_string()),
                Col::End => task.exp_end_date = Some(field.to_string()),
                Col::Status => task.status = Some(field.to_string()),
                Col::Priority => task.priority = Some(field.to_string()),
                Col::Progress => task.progress = parse_progress(field),
                Col::Assignee => task.assigned_to = Some(field.to_string()),
                Col::Parent => task.parent_task_id = Some(field.to_string()),
                Col::Group => task.is_group = parse_truthy(field),
                Col::DependsOn => task.depends_on = split_depends_on(field),
            }
        }

        if task.subject.is_none() {
            skipped += 1;
            continue;
        }
        if task.id.is_empty() {
            task.id = format!("ROW-{:04}", i + 2);
        }
        tasks.push(task);
    }

    if tasks.is_empty() {
        if skipped > 0 {
            return Err(format!(
                "No valid tasks found in CSV ({} rows skipped)",
                skipped
            ));
        }
        return Err("CSV file is empty or has no data rows".to_string());
    }

    Ok((tasks, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_match_flexibly() {
        for (header, col) in [
            ("Task Name", Col::Subject),
            ("exp_start_date", Col::Start),
            ("Due Date", Col::End),
            ("Assigned To", Col::Assignee),
            ("parent_task_id", Col::Parent),
            ("Is Group", Col::Group),
            ("Depends On", Col::DependsOn),
        ] {
            assert_eq!(header_to_col(&normalize_header(header)), Some(col), "{header}");
        }
        assert_eq!(header_to_col(&normalize_header("Invoice Total")), None);
    }

    #[test]
    fn delimiter_detection_prefers_the_most_frequent() {
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a,b,c"), b',');
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
    }

    #[test]
    fn depends_on_cell_splits_on_commas_and_semicolons() {
        let refs = split_depends_on("TASK-0001, TASK-0002;TASK-0003");
        let ids: Vec<&str> = refs.iter().map(|r| r.dependent_task_id.as_str()).collect();
        assert_eq!(ids, vec!["TASK-0001", "TASK-0002", "TASK-0003"]);
        assert!(split_depends_on("  ").is_empty());
    }

    #[test]
    fn progress_accepts_percent_suffix() {
        assert_eq!(parse_progress("45"), Some(45.0));
        assert_eq!(parse_progress("45 %"), Some(45.0));
        assert_eq!(parse_progress("n/a"), None);
    }
}
