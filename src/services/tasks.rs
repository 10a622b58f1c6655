// Tasks service — open-task selection, due-date ordering, urgent list.

use chrono::NaiveDate;

use crate::helpers::contains_ci;
use crate::types::{Task, TASK_STATUS_COMPLETED, TASK_STATUS_PENDING};

/// Compare two optional `YYYY-MM-DD` due dates.
///
/// Earlier dates rank higher. Missing or unparseable dates rank last.
pub fn compare_due_dates(a: Option<&str>, b: Option<&str>) -> std::cmp::Ordering {
    let parse = |s: Option<&str>| s.and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok());
    let a_d = parse(a);
    let b_d = parse(b);

    match (a_d, b_d) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

/// Non-completed tasks related to a company, in input order.
pub fn open_tasks_for_company<'a>(tasks: &'a [Task], company_id: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| !t.is_completed() && t.relates_to(company_id))
        .collect()
}

/// Non-completed tasks ordered by due date (missing dates last), truncated
/// to `limit`. The dashboard shows the first five of these.
pub fn urgent_tasks(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut open: Vec<Task> = tasks.iter().filter(|t| !t.is_completed()).cloned().collect();
    open.sort_by(|a, b| compare_due_dates(a.due_date.as_deref(), b.due_date.as_deref()));
    open.truncate(limit);
    open
}

/// Case-insensitive title search.
pub fn search_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| contains_ci(&t.title, query))
        .collect()
}

/// The status a completion checkbox flips to.
pub fn toggled_status(current: &str) -> &'static str {
    if current == TASK_STATUS_COMPLETED {
        TASK_STATUS_PENDING
    } else {
        TASK_STATUS_COMPLETED
    }
}

/// Tasks due on an exact calendar day (the board's month grid cells).
pub fn tasks_due_on<'a>(tasks: &'a [Task], date: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.due_date.as_deref() == Some(date))
        .collect()
}
