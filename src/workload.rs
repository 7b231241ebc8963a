use crate::category::{Category, classify};
use crate::config::utilization;
use crate::dates::{date_range, is_weekday, month_key, week_key, weekdays_in_month};
use crate::item::{ScheduleMap, ScheduledItem};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Additive hour buckets for one period. `free_hours` is derived after the
/// per-item pass and is never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadSummary {
    pub external_hours: f64,
    pub internal_hours: f64,
    pub buffer_hours: f64,
    pub free_hours: f64,
    pub total_hours: f64,
}

impl WorkloadSummary {
    fn add(&mut self, category: Category, hours: f64) {
        match category {
            Category::External => self.external_hours += hours,
            Category::Internal => self.internal_hours += hours,
            Category::Buffer => self.buffer_hours += hours,
        }
        self.total_hours += hours;
    }

    fn absorb(&mut self, other: &WorkloadSummary) {
        self.external_hours += other.external_hours;
        self.internal_hours += other.internal_hours;
        self.buffer_hours += other.buffer_hours;
        self.total_hours += other.total_hours;
    }

    /// Load as a fraction of `capacity`; 0 when capacity is not positive.
    pub fn utilization(&self, capacity: f64) -> f64 {
        utilization(self.total_hours, capacity)
    }
}

/// Daily, weekly and monthly summaries over one date range. Keys are the day
/// itself, the ISO week ("2025-W07") and the year-month ("2025-02").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadByPeriod {
    pub daily: BTreeMap<NaiveDate, WorkloadSummary>,
    pub weekly: BTreeMap<String, WorkloadSummary>,
    pub monthly: BTreeMap<String, WorkloadSummary>,
}

const WEEKDAYS_PER_WEEK: f64 = 5.0;

fn summarize_day(items: &[ScheduledItem]) -> WorkloadSummary {
    let mut summary = WorkloadSummary::default();
    for item in items {
        summary.add(classify(item), item.hours);
    }
    summary
}

/// Aggregate a computed schedule over `[start, end]` (inclusive).
///
/// Every date in the range gets a daily entry and contributes to its week and
/// month buckets, even when empty. Free capacity counts weekdays only: a
/// weekend day keeps `free_hours` at 0 regardless of load, weeks assume five
/// weekday slots, and months use their actual weekday count. The schedule map
/// itself is read-only here.
pub fn aggregate_workload(
    map: &ScheduleMap,
    start: NaiveDate,
    end: NaiveDate,
    daily_capacity: f64,
) -> WorkloadByPeriod {
    let days = date_range(start, end);

    // Days summarize independently; the fold below walks them in date order,
    // keeping float totals identical from run to run.
    let per_day: Vec<(NaiveDate, WorkloadSummary)> = days
        .par_iter()
        .map(|date| {
            let items = map.get(date).map(Vec::as_slice).unwrap_or(&[]);
            (*date, summarize_day(items))
        })
        .collect();

    let mut periods = WorkloadByPeriod::default();
    let mut month_sample: BTreeMap<String, NaiveDate> = BTreeMap::new();
    for (date, summary) in &per_day {
        periods.daily.entry(*date).or_default().absorb(summary);
        periods
            .weekly
            .entry(week_key(*date))
            .or_default()
            .absorb(summary);
        let month = month_key(*date);
        month_sample.entry(month.clone()).or_insert(*date);
        periods.monthly.entry(month).or_default().absorb(summary);
    }

    for (date, summary) in periods.daily.iter_mut() {
        if is_weekday(*date) {
            summary.free_hours = (daily_capacity - summary.total_hours).max(0.0);
        }
    }
    for summary in periods.weekly.values_mut() {
        summary.free_hours = (daily_capacity * WEEKDAYS_PER_WEEK - summary.total_hours).max(0.0);
    }
    for (month, summary) in periods.monthly.iter_mut() {
        if let Some(sample) = month_sample.get(month) {
            let weekdays = weekdays_in_month(*sample) as f64;
            summary.free_hours = (daily_capacity * weekdays - summary.total_hours).max(0.0);
        }
    }

    periods
}
