use crate::item::ScheduledItem;
use serde::{Deserialize, Serialize};

/// Workload category of a scheduled item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Imported calendar event.
    External,
    /// Regular project todo.
    Internal,
    /// Explicitly reserved slack time.
    Buffer,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::External => "external",
            Category::Internal => "internal",
            Category::Buffer => "buffer",
        }
    }
}

/// Substrings (matched case-insensitively) that mark a todo as buffer time.
const BUFFER_MARKERS: [&str; 2] = ["buffer", "バッファ"];

/// Classify an item. Idempotent: an already-classified item passes through
/// unchanged.
pub fn classify(item: &ScheduledItem) -> Category {
    if let Some(category) = item.category {
        return category;
    }
    if item.is_external {
        return Category::External;
    }
    let text = item.text.to_lowercase();
    let title = item.task_title.to_lowercase();
    if BUFFER_MARKERS
        .iter()
        .any(|marker| text.contains(marker) || title.contains(marker))
    {
        Category::Buffer
    } else {
        Category::Internal
    }
}
