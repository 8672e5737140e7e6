//! JQL composition.
//!
//! Substring matches on task summaries look for `[Kind Name]: `. Brackets are
//! Lucene metacharacters, so the pattern is `\[Kind Name\]: `, and inside a JQL
//! string literal every backslash is doubled once more.

/// Escape a value for use inside a double-quoted JQL literal.
pub fn literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn assignee(assignee: &str) -> String {
    format!("assignee = \"{}\"", literal(assignee))
}

/// Join the present clauses with `AND`. Returns `None` when nothing is left.
pub fn all<I>(clauses: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let clauses: Vec<String> = clauses
        .into_iter()
        .flatten()
        .filter(|c| !c.trim().is_empty())
        .collect();
    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(" AND "))
    }
}

/// Non-task, non-epic issues of `project` without linked tasks of the given kinds.
pub fn without_linked_tasks(kind_names: &[String], project: &str) -> String {
    let summaries = kind_names
        .iter()
        .map(|name| format!("summary ~ '{}'", name.replace('\'', "\\'")))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!(
        "issueFunction not in linkedIssuesOf(\"type = Task AND ({summaries})\") AND type not in (Task, Epic) AND project = \"{}\"",
        literal(project)
    )
}

/// Disjunction of `summary ~ "\\[Name\\]: "` clauses, one per kind name.
///
/// An empty slice still yields a valid clause, `summary ~ "\\[\\]: "`, which
/// matches no real task. Callers should not poll without kinds.
pub fn linked_task_summary(kind_names: &[String]) -> String {
    if kind_names.is_empty() {
        return summary_tag("");
    }
    kind_names
        .iter()
        .map(|name| summary_tag(name))
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn summary_tag(name: &str) -> String {
    format!("summary ~ \"{}\"", literal(&format!("\\[{name}\\]: ")))
}

pub fn linked_tasks(issue_key: &str, kind_names: &[String]) -> String {
    format!(
        "issue in linkedIssues(\"{}\") AND type = Task AND status = New AND ({})",
        literal(issue_key),
        linked_task_summary(kind_names)
    )
}
