use crate::task::{Task, Todo};
use chrono::{Duration, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const DEFAULT_DAILY_CAP_HOURS: f64 = 8.0;

/// Leveling starts looking this close to the due date and packs backward.
const LEVELING_START_OFFSET_DAYS: i64 = 1;
/// A todo may land at most this many days before its task's due date; past
/// that the run fails, since silent truncation would lose hours.
const MAX_RETREAT_DAYS: i64 = 365;
/// Load-table key for todos without an assignee.
const UNASSIGNED: &str = "unassigned";

const DISPLAY_START_HOUR: u32 = 9;
/// Display duration is clamped to one working day; informational only.
const DISPLAY_MAX_HOURS: f64 = 8.0;

/// One proposed move: a todo's start date before and after leveling. Emitted
/// only when the two dates differ, and applied only on explicit approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleChange {
    pub task_id: String,
    pub task_title: String,
    pub todo_id: String,
    pub todo_title: String,
    pub old_date: NaiveDate,
    pub new_date: NaiveDate,
}

/// Result of a leveling run: the diff plus the fully leveled deep copy of the
/// input tasks (ordered by due date). The caller's tasks are never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelingOutcome {
    pub changes: Vec<ScheduleChange>,
    pub tasks: Vec<Task>,
}

#[derive(Debug)]
pub enum LevelingError {
    InvalidCap { cap: f64 },
    DeadlineExceeded { todo_id: String, days_moved: i64 },
}

impl fmt::Display for LevelingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelingError::InvalidCap { cap } => {
                write!(f, "daily cap must be positive, got {cap}")
            }
            LevelingError::DeadlineExceeded { todo_id, days_moved } => write!(
                f,
                "todo {todo_id} found no date with capacity within {days_moved} days"
            ),
        }
    }
}

impl std::error::Error for LevelingError {}

fn set_display_window(todo: &mut Todo, date: NaiveDate) {
    let start = date.and_hms_opt(DISPLAY_START_HOUR, 0, 0).unwrap();
    let span_hours = todo.estimated_hours.min(DISPLAY_MAX_HOURS);
    todo.calendar_start = Some(start);
    todo.calendar_end = Some(start + Duration::milliseconds((span_hours * 3_600_000.0).round() as i64));
}

/// Redistribute todos backward from each task's due date so that no assignee
/// exceeds `daily_cap` hours on any single day.
///
/// Tasks are processed in due-date order. Within a task the working date
/// starts the day before the due date; a todo whose hours would overload any
/// of its assignees on that date retreats one day at a time until a date with
/// capacity is found. Accepted placements update a shared per-assignee load
/// table, so parallel tasks compete for the same capacity. After a task's
/// todos settle, its due date is pulled in to the latest todo end time.
pub fn level_schedule(tasks: &[Task], daily_cap: f64) -> Result<LevelingOutcome, LevelingError> {
    if daily_cap <= 0.0 {
        return Err(LevelingError::InvalidCap { cap: daily_cap });
    }

    let mut leveled: Vec<Task> = tasks.to_vec();
    leveled.sort_by_key(|task| task.due_date);

    let mut loads: HashMap<(String, NaiveDate), f64> = HashMap::new();
    let mut changes = Vec::new();

    for task in leveled.iter_mut() {
        let due = task.due_date;
        let mut working = due - Duration::days(LEVELING_START_OFFSET_DAYS);
        for todo in task.todos.iter_mut() {
            let assignee = todo
                .assignee_id
                .clone()
                .unwrap_or_else(|| UNASSIGNED.to_string());

            loop {
                let load = loads
                    .get(&(assignee.clone(), working))
                    .copied()
                    .unwrap_or(0.0);
                if load + todo.estimated_hours <= daily_cap + f64::EPSILON {
                    break;
                }
                working -= Duration::days(1);
                let moved = (due - working).num_days() - LEVELING_START_OFFSET_DAYS;
                if moved > MAX_RETREAT_DAYS {
                    return Err(LevelingError::DeadlineExceeded {
                        todo_id: todo.id.clone(),
                        days_moved: moved,
                    });
                }
            }

            if todo.start_date != working {
                changes.push(ScheduleChange {
                    task_id: task.id.clone(),
                    task_title: task.title.clone(),
                    todo_id: todo.id.clone(),
                    todo_title: todo.text.clone(),
                    old_date: todo.start_date,
                    new_date: working,
                });
            }

            *loads.entry((assignee, working)).or_default() += todo.estimated_hours;
            todo.start_date = working;
            set_display_window(todo, working);
        }

        if let Some(latest_end) = task.todos.iter().filter_map(|todo| todo.calendar_end).max() {
            task.due_date = latest_end.date();
        }
    }

    debug!(
        "leveling proposed {} change(s) across {} task(s)",
        changes.len(),
        leveled.len()
    );
    Ok(LevelingOutcome {
        changes,
        tasks: leveled,
    })
}

/// Apply approved changes to a fresh copy of `tasks`. Only todos named in an
/// approved change move; everything else, including their other fields, stays
/// untouched.
pub fn apply_changes(tasks: &[Task], approved: &[ScheduleChange]) -> Vec<Task> {
    let approved_by_todo: HashMap<&str, &ScheduleChange> = approved
        .iter()
        .map(|change| (change.todo_id.as_str(), change))
        .collect();

    let mut out = tasks.to_vec();
    for task in out.iter_mut() {
        for todo in task.todos.iter_mut() {
            if let Some(change) = approved_by_todo.get(todo.id.as_str()) {
                todo.start_date = change.new_date;
                set_display_window(todo, change.new_date);
            }
        }
    }
    out
}
