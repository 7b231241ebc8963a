use chrono::NaiveDate;
use planboard::{BusinessHours, FragmentKind, ScheduledItem, Task, Todo, place_day};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn item(id: &str, hours: f64) -> ScheduledItem {
    let task = Task::new("t1", "Release", d(2025, 3, 10), "p1");
    let todo = Todo::new(id, format!("step {id}"), d(2025, 3, 3), hours);
    ScheduledItem::from_todo(&task, &todo)
}

#[test]
fn ten_hour_todo_splits_around_break_and_overflows() {
    // 09:00-18:00, break 12:00-13:00, 8h cap: a 10h todo becomes a 3h
    // pre-break piece, a 5h post-break piece and 2h of overflow.
    let hours = BusinessHours::default();
    let day = place_day(vec![item("a", 10.0)], &hours);

    assert_eq!(day.placed.len(), 2);
    let head = &day.placed[0];
    assert_eq!(head.kind, FragmentKind::Whole);
    assert_eq!(head.start_hour, Some(9.0));
    assert!((head.hours - 3.0).abs() < 1e-9);
    assert_eq!(
        head.calendar_end,
        d(2025, 3, 3).and_hms_opt(12, 0, 0)
    );

    let tail = &day.placed[1];
    assert_eq!(tail.kind, FragmentKind::AfterBreak);
    assert_eq!(tail.start_hour, Some(13.0));
    assert!((tail.hours - 5.0).abs() < 1e-9);

    assert_eq!(day.overflow.len(), 1);
    assert_eq!(day.overflow[0].kind, FragmentKind::Overflow);
    assert!((day.overflow[0].hours - 2.0).abs() < 1e-9);
}

#[test]
fn item_fitting_before_break_is_not_split() {
    let hours = BusinessHours::default();
    let day = place_day(vec![item("a", 3.0)], &hours);
    assert_eq!(day.placed.len(), 1);
    assert_eq!(day.placed[0].start_hour, Some(9.0));
    assert!(day.overflow.is_empty());
}

#[test]
fn cursor_landing_on_break_snaps_to_break_end() {
    let hours = BusinessHours::default();
    let day = place_day(vec![item("a", 3.0), item("b", 2.0)], &hours);
    assert_eq!(day.placed.len(), 2);
    // First item ends exactly at 12:00; the next one starts at 13:00.
    assert_eq!(day.placed[1].start_hour, Some(13.0));
}

#[test]
fn after_break_piece_waits_behind_queued_items() {
    // a (4h) straddles the break; its tail must come after b, which was
    // already queued for today.
    let hours = BusinessHours::default();
    let day = place_day(vec![item("a", 4.0), item("b", 2.0)], &hours);

    let order: Vec<(&str, FragmentKind)> = day
        .placed
        .iter()
        .map(|it| (it.todo_id.as_str(), it.kind))
        .collect();
    assert_eq!(
        order,
        vec![
            ("a", FragmentKind::Whole),
            ("b", FragmentKind::Whole),
            ("a", FragmentKind::AfterBreak),
        ]
    );
    assert_eq!(day.placed[1].start_hour, Some(13.0));
    assert_eq!(day.placed[2].start_hour, Some(15.0));
}

#[test]
fn full_day_pushes_whole_items_to_overflow() {
    let hours = BusinessHours::default();
    let day = place_day(vec![item("a", 8.0), item("b", 2.5)], &hours);

    let placed_total: f64 = day.placed.iter().map(|it| it.hours).sum();
    assert!((placed_total - 8.0).abs() < 1e-9);
    let overflow_total: f64 = day.overflow.iter().map(|it| it.hours).sum();
    assert!((overflow_total - 2.5).abs() < 1e-9);
}

#[test]
fn daily_cap_is_never_exceeded() {
    let hours = BusinessHours::default();
    let day = place_day(
        vec![item("a", 3.5), item("b", 3.5), item("c", 3.5), item("d", 0.5)],
        &hours,
    );
    let placed_total: f64 = day.placed.iter().map(|it| it.hours).sum();
    assert!(placed_total <= hours.max_daily_hours + 1e-9);
}

#[test]
fn fragment_hours_sum_to_original_estimate() {
    let hours = BusinessHours::default();
    let inputs = vec![item("a", 6.25), item("b", 4.0), item("c", 1.75)];
    let expected: f64 = inputs.iter().map(|it| it.hours).sum();
    let day = place_day(inputs, &hours);

    let total: f64 = day
        .placed
        .iter()
        .chain(day.overflow.iter())
        .map(|it| it.hours)
        .sum();
    assert!((total - expected).abs() < 1e-9);
}

#[test]
fn zero_hour_item_is_placed_without_advancing_the_cursor() {
    let hours = BusinessHours::default();
    let day = place_day(vec![item("a", 0.0), item("b", 2.0)], &hours);
    assert_eq!(day.placed[0].start_hour, Some(9.0));
    assert_eq!(day.placed[1].start_hour, Some(9.0));
    assert!(day.overflow.is_empty());
}
