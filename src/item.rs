use crate::category::{self, Category};
use crate::task::{Priority, Task, Todo};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Provenance of a schedule entry. Splitting a todo around the break window
/// or across a day boundary produces synthetic fragments; the tag keeps that
/// first-class instead of encoding it in derived id suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    /// The todo as authored (possibly trimmed to the slice placed before a split).
    Whole,
    /// The part of a split todo resuming after the break window.
    AfterBreak,
    /// Hours that did not fit the day and carry over to the next one.
    Overflow,
}

/// A todo viewed through its owning task, as it appears in a computed
/// schedule. Items are derived per scheduling pass and never written back to
/// the source `Todo`; fragments of one todo share its `todo_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub todo_id: String,
    pub kind: FragmentKind,
    pub text: String,
    pub completed: bool,
    pub task_id: String,
    pub task_title: String,
    pub due_date: NaiveDate,
    pub priority: Option<Priority>,
    pub assignee_id: Option<String>,
    /// Hours carried by this fragment. Fragments of one todo always sum to
    /// the todo's original estimate.
    pub hours: f64,
    pub start_date: NaiveDate,
    /// Hour of day assigned by daily placement; `None` until placed.
    pub start_hour: Option<f64>,
    pub calendar_start: Option<NaiveDateTime>,
    pub calendar_end: Option<NaiveDateTime>,
    pub is_external: bool,
    /// Today's top incomplete item, for display emphasis only.
    pub is_next: bool,
    pub category: Option<Category>,
}

impl ScheduledItem {
    pub fn from_todo(task: &Task, todo: &Todo) -> Self {
        let mut item = Self {
            todo_id: todo.id.clone(),
            kind: FragmentKind::Whole,
            text: todo.text.clone(),
            completed: todo.completed,
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            due_date: task.due_date,
            priority: todo.priority,
            assignee_id: todo.assignee_id.clone(),
            hours: todo.estimated_hours,
            start_date: todo.start_date,
            start_hour: None,
            calendar_start: todo.calendar_start,
            calendar_end: todo.calendar_end,
            is_external: todo.is_external,
            is_next: false,
            category: None,
        };
        item.category = Some(category::classify(&item));
        item
    }

    /// Derive a synthetic fragment carrying `hours`. Placement state is
    /// cleared; identity and classification metadata carry over.
    pub(crate) fn fragment(&self, kind: FragmentKind, hours: f64) -> Self {
        Self {
            kind,
            hours,
            start_hour: None,
            calendar_start: None,
            calendar_end: None,
            is_next: false,
            ..self.clone()
        }
    }

    /// Move an overflow fragment to the day it carried over to.
    pub(crate) fn retarget(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    /// Precise placed time range, when both ends are known.
    pub fn interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.calendar_start, self.calendar_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// One computed schedule: every date that received at least one item, mapped
/// to that day's placed fragments in placement order. Rebuilt from scratch on
/// every pass.
pub type ScheduleMap = BTreeMap<NaiveDate, Vec<ScheduledItem>>;

fn priority_rank(priority: Option<Priority>) -> u8 {
    match priority {
        Some(Priority::High) => 0,
        Some(Priority::Medium) => 1,
        Some(Priority::Low) => 2,
        None => 3,
    }
}

/// Within-day ordering: items with an explicit time first (by that time),
/// then priority (high first), then due date. Used with a stable sort so
/// arrival order breaks any remaining ties.
pub(crate) fn day_order(a: &ScheduledItem, b: &ScheduledItem) -> Ordering {
    match (a.calendar_start, b.calendar_start) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => priority_rank(a.priority)
            .cmp(&priority_rank(b.priority))
            .then_with(|| a.due_date.cmp(&b.due_date)),
    }
}
