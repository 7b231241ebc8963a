pub mod day;

use crate::config::{BusinessHours, BusinessHoursError};
use crate::item::{ScheduleMap, ScheduledItem};
use crate::task::Task;
use chrono::NaiveDate;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use day::{DayPlacement, HOUR_EPSILON, place_day};

/// Assignee filter applied before any grouping: items that fail it never
/// enter the schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleFilter {
    pub selected_assignee_ids: Vec<String>,
    pub include_unassigned: bool,
}

impl ScheduleFilter {
    pub fn matches(&self, assignee_id: Option<&str>) -> bool {
        match assignee_id {
            Some(id) => self.selected_assignee_ids.iter().any(|sel| sel == id),
            None => self.include_unassigned,
        }
    }
}

/// Overflow processing is bounded at this many day-iterations per input item.
/// Valid input never gets near the bound; hitting it is a fatal error rather
/// than a silently truncated schedule.
const OVERFLOW_ITERATION_FACTOR: usize = 4;
const OVERFLOW_ITERATION_FLOOR: usize = 16;

#[derive(Debug)]
pub enum SchedulingError {
    Config(BusinessHoursError),
    OverflowBudgetExceeded { iterations: usize, budget: usize },
    DateOutOfRange { date: NaiveDate },
}

impl fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingError::Config(err) => write!(f, "invalid business hours: {err}"),
            SchedulingError::OverflowBudgetExceeded { iterations, budget } => write!(
                f,
                "overflow processing did not settle after {iterations} iterations (budget {budget})"
            ),
            SchedulingError::DateOutOfRange { date } => {
                write!(f, "cannot carry overflow past {date}")
            }
        }
    }
}

impl std::error::Error for SchedulingError {}

impl From<BusinessHoursError> for SchedulingError {
    fn from(value: BusinessHoursError) -> Self {
        Self::Config(value)
    }
}

/// Build the full schedule for every day that has items, directly or via
/// carried overflow.
///
/// Todos are flattened through the filter, grouped by start date, and days
/// are placed in ascending order; overflow from a day joins the next day's
/// bucket before that day is placed, so each day is placed exactly once with
/// all of its inputs present. `today` marks the first incomplete item of that
/// date as `is_next` and is an explicit argument so that identical inputs
/// always produce identical schedules.
pub fn build_schedule(
    tasks: &[Task],
    filter: &ScheduleFilter,
    hours: &BusinessHours,
    today: NaiveDate,
) -> Result<ScheduleMap, SchedulingError> {
    hours.validate()?;

    let mut pending: BTreeMap<NaiveDate, Vec<ScheduledItem>> = BTreeMap::new();
    let mut total_items = 0_usize;
    for task in tasks {
        for todo in &task.todos {
            if !filter.matches(todo.assignee_id.as_deref()) {
                continue;
            }
            pending
                .entry(todo.start_date)
                .or_default()
                .push(ScheduledItem::from_todo(task, todo));
            total_items += 1;
        }
    }

    let budget = total_items
        .saturating_mul(OVERFLOW_ITERATION_FACTOR)
        .max(OVERFLOW_ITERATION_FLOOR);
    let mut iterations = 0_usize;
    let mut placed = ScheduleMap::new();

    while let Some((date, items)) = pending.pop_first() {
        iterations += 1;
        if iterations > budget {
            return Err(SchedulingError::OverflowBudgetExceeded { iterations, budget });
        }

        let day = day::place_day(items, hours);
        if !day.overflow.is_empty() {
            let next = date
                .succ_opt()
                .ok_or(SchedulingError::DateOutOfRange { date })?;
            trace!(
                "{date}: carrying {} overflow fragment(s) to {next}",
                day.overflow.len()
            );
            pending
                .entry(next)
                .or_default()
                .extend(day.overflow.into_iter().map(|frag| frag.retarget(next)));
        }
        placed.insert(date, day.placed);
    }

    mark_next_todo(&mut placed, today);
    debug!(
        "scheduled {total_items} item(s) across {} day(s)",
        placed.len()
    );
    Ok(placed)
}

/// Flag today's top incomplete item. Display emphasis only; no scheduling
/// effect.
fn mark_next_todo(map: &mut ScheduleMap, today: NaiveDate) {
    if let Some(items) = map.get_mut(&today) {
        if let Some(item) = items.iter_mut().find(|item| !item.completed) {
            item.is_next = true;
        }
    }
}
