use std::collections::HashSet;

use serde::Serialize;

use crate::model::GanttTask;

/// A directed connector edge: `from` renders before `to`.
///
/// Edges only drive connector lines; they carry no scheduling weight and
/// cycles among them are harmless.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
}

/// Collect the deduplicated edge list from every task's `depends_on` ids.
///
/// Self-references and ids not present in the task list are skipped. Output
/// order follows the input task order, so repeated runs agree.
pub fn extract_dependencies(tasks: &[GanttTask]) -> Vec<DependencyEdge> {
    let known: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut edges = Vec::new();

    for task in tasks {
        for dep in &task.depends_on {
            if dep == &task.id || !known.contains(dep.as_str()) {
                continue;
            }
            if seen.insert((dep.as_str(), task.id.as_str())) {
                edges.push(DependencyEdge {
                    from: dep.clone(),
                    to: task.id.clone(),
                });
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> GanttTask {
        let mut t = GanttTask::new(id, id);
        t.depends_on = deps.iter().map(|d| d.to_string()).collect();
        t
    }

    #[test]
    fn one_edge_per_dependency() {
        let tasks = vec![task("A", &[]), task("B", &["A"])];
        let edges = extract_dependencies(&tasks);
        assert_eq!(
            edges,
            vec![DependencyEdge {
                from: "A".into(),
                to: "B".into()
            }]
        );
    }

    #[test]
    fn self_reference_is_excluded() {
        let tasks = vec![task("A", &["A"])];
        assert!(extract_dependencies(&tasks).is_empty());
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let tasks = vec![task("A", &["GHOST"])];
        assert!(extract_dependencies(&tasks).is_empty());
    }

    #[test]
    fn duplicate_entries_collapse() {
        let tasks = vec![task("A", &[]), task("B", &["A", "A"])];
        assert_eq!(extract_dependencies(&tasks).len(), 1);
    }

    #[test]
    fn dependency_cycles_are_tolerated() {
        let tasks = vec![task("A", &["B"]), task("B", &["A"])];
        let edges = extract_dependencies(&tasks);
        assert_eq!(edges.len(), 2);
    }
}
