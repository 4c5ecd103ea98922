//! Day grouping: consecutive slot columns sharing a day number form one
//! calendar day. Groups span the carry-over columns too, so the rest rules
//! can count days across the month boundary.

use crate::model::Worksheet;
use serde::{Deserialize, Serialize};

/// Ordered day groups over all slot columns plus the slot→day reverse index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayGroups {
    groups: Vec<Vec<usize>>,
    day_of: Vec<usize>,
    first_current_day: usize,
}

impl DayGroups {
    /// Single left-to-right scan; a new group starts whenever the day number
    /// changes.
    pub fn build(sheet: &Worksheet) -> Self {
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut day_of = Vec::with_capacity(sheet.slots.len());
        let mut prev = None;
        for (idx, slot) in sheet.slots.iter().enumerate() {
            if prev != Some(slot.day_number) {
                groups.push(Vec::new());
            }
            day_of.push(groups.len() - 1);
            if let Some(group) = groups.last_mut() {
                group.push(idx);
            }
            prev = Some(slot.day_number);
        }
        let first_current_day = day_of.get(sheet.first_current).copied().unwrap_or(0);
        Self {
            groups,
            day_of,
            first_current_day,
        }
    }

    /// Day index of a slot.
    pub fn day_of(&self, slot: usize) -> usize {
        self.day_of[slot]
    }

    /// Slot indices of one day, in column order.
    pub fn group(&self, day: usize) -> &[usize] {
        &self.groups[day]
    }

    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Largest day index.
    pub fn last_day(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }

    /// Day index of the first current-month slot.
    pub fn first_current_day(&self) -> usize {
        self.first_current_day
    }

    pub fn day_count(&self) -> usize {
        self.groups.len()
    }
}
