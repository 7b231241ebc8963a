use chrono::NaiveDate;
use planboard::{ScheduledItem, Task, Todo, assign_lanes};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn timed(id: &str, start: (u32, u32), end: (u32, u32)) -> ScheduledItem {
    let date = d(2025, 3, 3);
    let task = Task::new("t1", "Sprint", d(2025, 3, 14), "p1");
    let mut todo = Todo::new(id, format!("slot {id}"), date, 1.0);
    todo.calendar_start = date.and_hms_opt(start.0, start.1, 0);
    todo.calendar_end = date.and_hms_opt(end.0, end.1, 0);
    ScheduledItem::from_todo(&task, &todo)
}

fn untimed(id: &str) -> ScheduledItem {
    let date = d(2025, 3, 3);
    let task = Task::new("t1", "Sprint", d(2025, 3, 14), "p1");
    ScheduledItem::from_todo(&task, &Todo::new(id, "unplaced", date, 1.0))
}

#[test]
fn overlapping_items_take_separate_lanes() {
    // [09:00,10:00) vs [09:30,10:30) need two lanes; [10:00,11:00) reuses
    // the first lane because intervals are half-open.
    let items = vec![
        timed("a", (9, 0), (10, 0)),
        timed("b", (9, 30), (10, 30)),
        timed("c", (10, 0), (11, 0)),
    ];
    let assignment = assign_lanes(&items);
    assert_eq!(assignment.lane_count(), 2);
    assert_eq!(assignment.lanes[0], vec![0, 2]);
    assert_eq!(assignment.lanes[1], vec![1]);
}

#[test]
fn disjoint_items_share_one_lane() {
    let items = vec![
        timed("a", (9, 0), (10, 0)),
        timed("b", (10, 0), (11, 0)),
        timed("c", (11, 0), (12, 0)),
    ];
    let assignment = assign_lanes(&items);
    assert_eq!(assignment.lane_count(), 1);
    assert_eq!(assignment.lanes[0], vec![0, 1, 2]);
}

#[test]
fn lanes_are_internally_disjoint() {
    let items = vec![
        timed("a", (9, 0), (11, 0)),
        timed("b", (9, 30), (10, 0)),
        timed("c", (10, 0), (12, 0)),
        timed("d", (10, 30), (11, 30)),
        timed("e", (11, 30), (13, 0)),
        timed("f", (9, 0), (9, 30)),
    ];
    let assignment = assign_lanes(&items);

    for lane in &assignment.lanes {
        for (i, &a) in lane.iter().enumerate() {
            for &b in &lane[i + 1..] {
                let (a_start, a_end) = items[a].interval().unwrap();
                let (b_start, b_end) = items[b].interval().unwrap();
                assert!(
                    !(a_start < b_end && a_end > b_start),
                    "items {a} and {b} overlap in one lane"
                );
            }
        }
    }
}

#[test]
fn items_without_times_are_left_out_of_lanes() {
    let items = vec![
        timed("a", (9, 0), (10, 0)),
        untimed("b"),
        timed("c", (9, 30), (10, 30)),
    ];
    let assignment = assign_lanes(&items);
    assert_eq!(assignment.unplaced, vec![1]);
    assert_eq!(assignment.lane_count(), 2);
    let laned: usize = assignment.lanes.iter().map(Vec::len).sum();
    assert_eq!(laned, 2);
}

#[test]
fn empty_input_yields_no_lanes() {
    let assignment = assign_lanes(&[]);
    assert_eq!(assignment.lane_count(), 0);
    assert!(assignment.unplaced.is_empty());
}
