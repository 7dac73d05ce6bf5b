//! Upstream task-list data model.
//!
//! These types mirror the upstream wire shape. Decoding is always
//! checked: a body that does not fit the envelope is a recoverable
//! failure, never a panic.

use serde::{Deserialize, Serialize};

/// Assignee status marking a task as due today.
pub const TODAY_STATUS: &str = "today";

/// One task record from the upstream task list.
///
/// `assignee_status` and `name` default to empty when the upstream
/// omits them; a record without a status simply never matches the
/// filter. Unknown upstream fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Upstream task identifier.
    pub gid: String,
    /// Upstream-defined status label used as the filter key.
    #[serde(default)]
    pub assignee_status: String,
    /// Display name of the task.
    #[serde(default)]
    pub name: String,
}

/// Task-list envelope returned by the upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Task records, in upstream order.
    pub data: Vec<Task>,
}

/// Names of the tasks due today, preserving upstream order.
pub fn due_today_names(list: &TaskList) -> Vec<String> {
    list.data
        .iter()
        .filter(|task| task.assignee_status == TODAY_STATUS)
        .map(|task| task.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(gid: &str, status: &str, name: &str) -> Task {
        Task {
            gid: gid.to_string(),
            assignee_status: status.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_filter_keeps_today_in_order() {
        let list = TaskList {
            data: vec![
                task("1", "today", "A"),
                task("2", "later", "B"),
                task("3", "today", "C"),
            ],
        };

        assert_eq!(due_today_names(&list), vec!["A", "C"]);
    }

    #[test]
    fn test_filter_empty_list() {
        let list = TaskList { data: vec![] };
        assert_eq!(due_today_names(&list), Vec::<String>::new());
    }

    #[test]
    fn test_filter_no_match() {
        let list = TaskList {
            data: vec![task("1", "upcoming", "A"), task("2", "later", "B")],
        };
        assert_eq!(due_today_names(&list), Vec::<String>::new());
    }

    #[test]
    fn test_filter_is_exact_match() {
        let list = TaskList {
            data: vec![task("1", "Today", "A"), task("2", "today ", "B")],
        };
        assert_eq!(due_today_names(&list), Vec::<String>::new());
    }

    #[test]
    fn test_decode_envelope() {
        let body = r#"{"data":[{"gid":"1","assignee_status":"today","name":"A"}]}"#;
        let list: TaskList = serde_json::from_str(body).unwrap();

        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0], task("1", "today", "A"));
    }

    #[test]
    fn test_decode_tolerates_missing_optional_fields() {
        let body = r#"{"data":[{"gid":"1"}]}"#;
        let list: TaskList = serde_json::from_str(body).unwrap();

        assert_eq!(list.data[0].assignee_status, "");
        assert_eq!(list.data[0].name, "");
        assert_eq!(due_today_names(&list), Vec::<String>::new());
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let body = r#"{"data":[{"gid":"1","assignee_status":"today","name":"A","due_on":"2024-01-01"}]}"#;
        let list: TaskList = serde_json::from_str(body).unwrap();

        assert_eq!(due_today_names(&list), vec!["A"]);
    }

    #[test]
    fn test_decode_rejects_non_array_data() {
        let body = r#"{"data":"oops"}"#;
        assert!(serde_json::from_str::<TaskList>(body).is_err());
    }
}
