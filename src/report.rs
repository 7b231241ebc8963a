use crate::category::classify;
use crate::item::{FragmentKind, ScheduleMap};
use crate::leveling::ScheduleChange;
use crate::workload::{WorkloadByPeriod, WorkloadSummary};
use chrono::NaiveDate;
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use std::io::Write;

fn date_to_i32(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    (date - epoch).num_days() as i32
}

fn kind_label(kind: FragmentKind) -> &'static str {
    match kind {
        FragmentKind::Whole => "whole",
        FragmentKind::AfterBreak => "after-break",
        FragmentKind::Overflow => "overflow",
    }
}

/// Flatten a computed schedule into one DataFrame row per placed fragment.
pub fn schedule_to_dataframe(map: &ScheduleMap) -> PolarsResult<DataFrame> {
    let mut dates: Vec<i32> = Vec::new();
    let mut todo_ids: Vec<&str> = Vec::new();
    let mut fragments: Vec<&str> = Vec::new();
    let mut task_ids: Vec<&str> = Vec::new();
    let mut task_titles: Vec<&str> = Vec::new();
    let mut texts: Vec<&str> = Vec::new();
    let mut start_hours: Vec<Option<f64>> = Vec::new();
    let mut hours: Vec<f64> = Vec::new();
    let mut categories: Vec<&str> = Vec::new();
    let mut assignees: Vec<Option<&str>> = Vec::new();
    let mut completed: Vec<bool> = Vec::new();

    for (date, items) in map {
        for item in items {
            dates.push(date_to_i32(*date));
            todo_ids.push(item.todo_id.as_str());
            fragments.push(kind_label(item.kind));
            task_ids.push(item.task_id.as_str());
            task_titles.push(item.task_title.as_str());
            texts.push(item.text.as_str());
            start_hours.push(item.start_hour);
            hours.push(item.hours);
            categories.push(classify(item).as_str());
            assignees.push(item.assignee_id.as_deref());
            completed.push(item.completed);
        }
    }

    let columns = vec![
        Series::new(PlSmallStr::from_static("date"), dates)
            .cast(&DataType::Date)?
            .into_column(),
        Series::new(PlSmallStr::from_static("todo_id"), todo_ids).into_column(),
        Series::new(PlSmallStr::from_static("fragment"), fragments).into_column(),
        Series::new(PlSmallStr::from_static("task_id"), task_ids).into_column(),
        Series::new(PlSmallStr::from_static("task_title"), task_titles).into_column(),
        Series::new(PlSmallStr::from_static("text"), texts).into_column(),
        Series::new(PlSmallStr::from_static("start_hour"), start_hours).into_column(),
        Series::new(PlSmallStr::from_static("hours"), hours).into_column(),
        Series::new(PlSmallStr::from_static("category"), categories).into_column(),
        Series::new(PlSmallStr::from_static("assignee_id"), assignees).into_column(),
        Series::new(PlSmallStr::from_static("completed"), completed).into_column(),
    ];

    DataFrame::new(columns)
}

/// One DataFrame row per period bucket, across all three granularities.
pub fn workload_to_dataframe(periods: &WorkloadByPeriod) -> PolarsResult<DataFrame> {
    let mut granularities: Vec<&str> = Vec::new();
    let mut keys: Vec<String> = Vec::new();
    let mut external: Vec<f64> = Vec::new();
    let mut internal: Vec<f64> = Vec::new();
    let mut buffer: Vec<f64> = Vec::new();
    let mut free: Vec<f64> = Vec::new();
    let mut total: Vec<f64> = Vec::new();

    let mut push = |granularity: &'static str, key: String, summary: &WorkloadSummary| {
        granularities.push(granularity);
        keys.push(key);
        external.push(summary.external_hours);
        internal.push(summary.internal_hours);
        buffer.push(summary.buffer_hours);
        free.push(summary.free_hours);
        total.push(summary.total_hours);
    };

    for (date, summary) in &periods.daily {
        push("daily", date.to_string(), summary);
    }
    for (key, summary) in &periods.weekly {
        push("weekly", key.clone(), summary);
    }
    for (key, summary) in &periods.monthly {
        push("monthly", key.clone(), summary);
    }

    let key_strs: Vec<&str> = keys.iter().map(String::as_str).collect();
    let columns = vec![
        Series::new(PlSmallStr::from_static("granularity"), granularities).into_column(),
        Series::new(PlSmallStr::from_static("period"), key_strs).into_column(),
        Series::new(PlSmallStr::from_static("external_hours"), external).into_column(),
        Series::new(PlSmallStr::from_static("internal_hours"), internal).into_column(),
        Series::new(PlSmallStr::from_static("buffer_hours"), buffer).into_column(),
        Series::new(PlSmallStr::from_static("free_hours"), free).into_column(),
        Series::new(PlSmallStr::from_static("total_hours"), total).into_column(),
    ];

    DataFrame::new(columns)
}

/// Write the leveling diff as CSV for review outside the app.
pub fn write_changes_csv<W: Write>(
    changes: &[ScheduleChange],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for change in changes {
        csv_writer.serialize(change)?;
    }
    csv_writer.flush()?;
    Ok(())
}
