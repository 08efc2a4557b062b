//! Catalog Index - course id to credit-unit lookup.
//!
//! Built from the latest `listUpdate` event and fully replaced (never merged)
//! on each one. Lookups are best-effort by design: a course missing from the
//! snapshot, or one whose `units` field is absent or non-numeric, resolves to
//! zero units rather than an error.
//!
//! Known risk: a zero-unit registration request may itself be rejected
//! server-side. That surfaces as an ordinary per-course failure, not a crash.

use std::collections::HashMap;

use serde_json::Value;

/// Immutable snapshot of the course catalog at one `listUpdate` event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    units_by_course: HashMap<String, u32>,
}

impl CatalogSnapshot {
    /// Builds a snapshot from the raw catalog entries of a `listUpdate`
    /// message. Entries without a string `id` or a numeric `units` field are
    /// skipped; affected courses fall back to zero units on lookup.
    pub fn from_entries(entries: &[Value]) -> Self {
        let mut units_by_course = HashMap::with_capacity(entries.len());
        for entry in entries {
            let Some(id) = entry.get("id").and_then(Value::as_str) else {
                continue;
            };
            let Some(units) = entry.get("units").and_then(Value::as_f64) else {
                continue;
            };
            units_by_course.insert(id.to_string(), units as u32);
        }
        Self { units_by_course }
    }

    /// Unit count for a course, or `0` when the course is unknown.
    ///
    /// Total by contract: absence is a valid, silent outcome.
    pub fn units_for(&self, course_id: &str) -> u32 {
        self.units_by_course.get(course_id).copied().unwrap_or(0)
    }

    /// Number of courses in the snapshot.
    pub fn len(&self) -> usize {
        self.units_by_course.len()
    }

    /// Whether the snapshot holds no courses.
    pub fn is_empty(&self) -> bool {
        self.units_by_course.is_empty()
    }
}
