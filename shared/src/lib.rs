use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Number of tasks the server returns per page. Must match the server's
/// paginator or `total_pages` is wrong.
pub const PAGE_SIZE: u64 = 5;

pub const TITLE_MAX_CHARS: usize = 200;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    /// `None` when the server sent a timestamp we cannot read. One bad row
    /// must not fail the whole page.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// RFC 3339, or a naive `YYYY-MM-DD[T ]HH:MM:SS[.f]` taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

impl Task {
    /// The description, if there is one worth showing.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TaskPage {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<Task>,
}

impl TaskPage {
    pub fn total_pages(&self) -> u32 {
        total_pages(self.count)
    }
}

/// `ceil(count / PAGE_SIZE)`, never less than one.
pub fn total_pages(count: u64) -> u32 {
    let pages = count.div_ceil(PAGE_SIZE).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
}

/// Partial update. Fields left as `None` are not sent.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn completion(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Self::default()
        }
    }

    pub fn content(title: String, description: String) -> Self {
        Self {
            title: Some(title),
            description: Some(description),
            is_completed: None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    /// Value of the `is_completed` query parameter. `All` sends nothing,
    /// which is not the same as sending `false`.
    pub fn completion(self) -> Option<bool> {
        match self {
            Filter::All => None,
            Filter::Pending => Some(false),
            Filter::Completed => Some(true),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Pending => "Pending",
            Filter::Completed => "Completed",
        }
    }

    pub fn scope_label(self) -> &'static str {
        match self {
            Filter::All => "all tasks",
            Filter::Pending => "pending tasks",
            Filter::Completed => "completed tasks",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            Filter::All => "No tasks yet. Create your first task!",
            Filter::Pending => "No pending tasks. Great job!",
            Filter::Completed => "No completed tasks yet.",
        }
    }

    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Pending,
            Filter::Pending => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Filter::All => 0,
            Filter::Pending => 1,
            Filter::Completed => 2,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum TitleError {
    #[error("Title cannot be empty.")]
    Empty,
    #[error("Ensure this field has no more than 200 characters.")]
    TooLong,
}

/// Trims the title and checks it is non-empty and within `TITLE_MAX_CHARS`.
pub fn validate_title(raw: &str) -> Result<String, TitleError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TitleError::Empty);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(TitleError::TooLong);
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(5, 1)]
    #[case(6, 2)]
    #[case(10, 2)]
    #[case(11, 3)]
    fn total_pages_rounds_up_and_never_drops_below_one(#[case] count: u64, #[case] pages: u32) {
        assert_eq!(total_pages(count), pages);
    }

    #[rstest]
    #[case(Filter::All, None)]
    #[case(Filter::Pending, Some(false))]
    #[case(Filter::Completed, Some(true))]
    fn filter_maps_to_completion_param(#[case] filter: Filter, #[case] expected: Option<bool>) {
        assert_eq!(filter.completion(), expected);
    }

    #[test]
    fn filter_cycles_through_every_variant() {
        let mut f = Filter::All;
        for expected in [Filter::Pending, Filter::Completed, Filter::All] {
            f = f.next();
            assert_eq!(f, expected);
        }
        for (i, f) in Filter::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn task_deserializes_server_json() {
        let task: Task = serde_json::from_value(json!({
            "id": 7,
            "title": "Write report",
            "description": null,
            "is_completed": true,
            "created_at": "2025-03-04T10:15:30.123456Z"
        }))
        .unwrap();

        assert_eq!(task.id, TaskId(7));
        assert!(task.is_completed);
        assert_eq!(task.description_text(), None);
    }

    #[test]
    fn empty_description_is_not_shown() {
        let task: Task = serde_json::from_value(json!({
            "id": 1,
            "title": "a",
            "description": "",
            "is_completed": false,
            "created_at": "2025-03-04T10:15:30Z"
        }))
        .unwrap();
        assert_eq!(task.description_text(), None);
    }

    #[rstest]
    #[case("2025-03-04T10:15:30+02:00", Some("2025-03-04T08:15:30Z"))]
    #[case("2025-03-04T10:15:30.5", Some("2025-03-04T10:15:30.500Z"))]
    #[case("2025-03-04 10:15:30", Some("2025-03-04T10:15:30Z"))]
    #[case("yesterday", None)]
    fn parse_timestamp_accepts_naive_server_times(
        #[case] raw: &str,
        #[case] expected: Option<&str>,
    ) {
        let expected = expected.map(|e| e.parse::<DateTime<Utc>>().unwrap());
        assert_eq!(parse_timestamp(raw), expected);
    }

    #[test]
    fn unreadable_timestamp_does_not_fail_the_page() {
        let page: TaskPage = serde_json::from_value(json!({
            "count": 2,
            "results": [
                { "id": 1, "title": "a", "is_completed": false, "created_at": "not a date" },
                { "id": 2, "title": "b", "is_completed": false, "created_at": "2025-03-04T10:15:30Z" }
            ]
        }))
        .unwrap();
        assert_eq!(page.results[0].created_at, None);
        assert!(page.results[1].created_at.is_some());
    }

    #[test]
    fn page_tolerates_missing_links() {
        let page: TaskPage = serde_json::from_value(json!({ "count": 0, "results": [] })).unwrap();
        assert_eq!(page.total_pages(), 1);
        assert!(page.next.is_none());
    }

    #[test]
    fn completion_update_serializes_only_the_flag() {
        let body = serde_json::to_value(UpdateTaskRequest::completion(false)).unwrap();
        assert_eq!(body, json!({ "is_completed": false }));
    }

    #[test]
    fn content_update_leaves_completion_out() {
        let body =
            serde_json::to_value(UpdateTaskRequest::content("t".into(), "".into())).unwrap();
        assert_eq!(body, json!({ "title": "t", "description": "" }));
    }

    #[rstest]
    #[case("", Err(TitleError::Empty))]
    #[case("   \t ", Err(TitleError::Empty))]
    #[case("  Buy milk ", Ok("Buy milk".to_string()))]
    fn validate_title_trims_and_rejects_blank(
        #[case] raw: &str,
        #[case] expected: Result<String, TitleError>,
    ) {
        assert_eq!(validate_title(raw), expected);
    }

    #[test]
    fn validate_title_counts_characters_not_bytes() {
        let at_limit = "é".repeat(TITLE_MAX_CHARS);
        assert!(validate_title(&at_limit).is_ok());
        let over = "x".repeat(TITLE_MAX_CHARS + 1);
        assert_eq!(validate_title(&over), Err(TitleError::TooLong));
    }
}
