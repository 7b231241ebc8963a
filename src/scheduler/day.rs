use crate::config::BusinessHours;
use crate::item::{FragmentKind, ScheduledItem, day_order};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::VecDeque;

/// Tolerance for hour arithmetic; fragments of one todo must sum back to its
/// estimate within this bound.
pub const HOUR_EPSILON: f64 = 1e-9;

/// Result of placing one day: the fragments that fit, in placement order,
/// and the overflow carried to the next day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayPlacement {
    pub placed: Vec<ScheduledItem>,
    pub overflow: Vec<ScheduledItem>,
}

fn hour_to_datetime(date: NaiveDate, hour: f64) -> NaiveDateTime {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    midnight + Duration::milliseconds((hour * 3_600_000.0).round() as i64)
}

fn place_at(item: &mut ScheduledItem, start_hour: f64) {
    item.start_hour = Some(start_hour);
    let start = hour_to_datetime(item.start_date, start_hour);
    item.calendar_start = Some(start);
    item.calendar_end = Some(start + Duration::milliseconds((item.hours * 3_600_000.0).round() as i64));
}

/// Place one day's items within business hours.
///
/// Items are sorted once by the day ordering rule, then consumed from an
/// explicit work queue: a cursor walks forward from the start of business,
/// skipping the break window. An item that would exceed the daily cap is
/// trimmed to the remaining capacity and the excess becomes an overflow
/// fragment; an item straddling the break is split, with the after-break
/// piece re-queued behind everything already waiting today.
pub fn place_day(items: Vec<ScheduledItem>, hours: &BusinessHours) -> DayPlacement {
    let mut queue: VecDeque<ScheduledItem> = {
        let mut sorted = items;
        sorted.sort_by(day_order);
        sorted.into()
    };

    let mut cursor = hours.start_hour;
    let mut worked = 0.0_f64;
    let mut placed = Vec::new();
    let mut overflow = Vec::new();

    while let Some(mut item) = queue.pop_front() {
        // The break window is never worked.
        if cursor >= hours.break_start - HOUR_EPSILON && cursor < hours.break_end {
            cursor = hours.break_end;
        }

        let mut share = item.hours;

        // Daily cap: trim to what still fits and carry the rest over.
        if worked + share > hours.max_daily_hours + HOUR_EPSILON {
            let remaining = hours.max_daily_hours - worked;
            if remaining <= HOUR_EPSILON {
                overflow.push(item.fragment(FragmentKind::Overflow, share));
                continue;
            }
            overflow.push(item.fragment(FragmentKind::Overflow, share - remaining));
            share = remaining;
            item.hours = remaining;
        }

        // Straddling the break splits the item; the tail resumes at break end
        // but only after everything already queued for today.
        if cursor < hours.break_start - HOUR_EPSILON && cursor + share > hours.break_start + HOUR_EPSILON
        {
            let before = hours.break_start - cursor;
            let mut head = item.fragment(item.kind, before);
            place_at(&mut head, cursor);
            placed.push(head);
            queue.push_back(item.fragment(FragmentKind::AfterBreak, share - before));
            cursor = hours.break_start;
            worked += before;
            continue;
        }

        place_at(&mut item, cursor);
        placed.push(item);
        cursor += share;
        worked += share;
    }

    DayPlacement { placed, overflow }
}
