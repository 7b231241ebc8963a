use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Todo priority. The derived ordering is scheduling order: `High` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One unit of work. `start_date` is the calendar day the todo is attributed
/// to; the `calendar_*` pair is the precise time range and stays absent until
/// something (an external calendar import, or an applied leveling change)
/// sets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_end: Option<NaiveDateTime>,
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Set by the external-calendar import before todos reach the engine.
    #[serde(default)]
    pub is_external: bool,
}

impl Todo {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        start_date: NaiveDate,
        estimated_hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            start_date,
            calendar_start: None,
            calendar_end: None,
            estimated_hours,
            actual_hours: 0.0,
            assignee_id: None,
            priority: None,
            memo: None,
            is_external: false,
        }
    }
}

/// A task owns an ordered list of todos and a due date. Its implied start is
/// the earliest todo start date; its implied end is the due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub todos: Vec<Todo>,
    pub project_id: String,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        due_date: NaiveDate,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            due_date,
            todos: Vec::new(),
            project_id: project_id.into(),
        }
    }

    pub fn implied_start(&self) -> Option<NaiveDate> {
        self.todos.iter().map(|todo| todo.start_date).min()
    }

    pub fn implied_end(&self) -> NaiveDate {
        self.due_date
    }
}
