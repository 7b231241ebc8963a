pub mod category;
pub mod config;
pub mod dates;
pub mod item;
pub mod lanes;
pub mod leveling;
pub mod report;
pub mod scheduler;
pub mod task;
pub mod workload;

pub use category::{Category, classify};
pub use config::{BusinessHours, BusinessHoursError, utilization};
pub use dates::MalformedDateError;
pub use item::{FragmentKind, ScheduleMap, ScheduledItem};
pub use lanes::{LaneAssignment, assign_lanes};
pub use leveling::{
    DEFAULT_DAILY_CAP_HOURS, LevelingError, LevelingOutcome, ScheduleChange, apply_changes,
    level_schedule,
};
pub use report::{schedule_to_dataframe, workload_to_dataframe, write_changes_csv};
pub use scheduler::{DayPlacement, ScheduleFilter, SchedulingError, build_schedule, place_day};
pub use task::{Priority, Task, Todo};
pub use workload::{WorkloadByPeriod, WorkloadSummary, aggregate_workload};
