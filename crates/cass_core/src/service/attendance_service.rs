//! Attendance log grouping.
//!
//! # Responsibility
//! - Group clock records by calendar month for display.
//!
//! # Invariants
//! - Groups appear in order of their first record; records keep input order.
//! - `MonthKey` (year, month) is the stable sort key; the label is display only.

use crate::model::attendance::AttendanceRecord;
use chrono::Datelike;

/// Sortable `(year, month)` key, month in `1..=12`.
pub type MonthKey = (i32, u32);

/// Records of one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub key: MonthKey,
    /// E.g. `June 2024`.
    pub label: String,
    pub records: Vec<AttendanceRecord>,
}

/// Groups records by the UTC month of `created_at`.
pub fn group_by_month(records: &[AttendanceRecord]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for record in records {
        let key = (record.created_at.year(), record.created_at.month());
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.records.push(record.clone()),
            None => groups.push(MonthGroup {
                key,
                label: record.created_at.format("%B %Y").to_string(),
                records: vec![record.clone()],
            }),
        }
    }
    groups
}
