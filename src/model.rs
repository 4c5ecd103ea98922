use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Weekday label of slots that receive no coverage requirement.
///
/// Matched by exact literal: a worksheet produced with a different locale
/// silently loses the exemption.
pub const THURSDAY: &str = "木";

/// Preference code for one person × slot cell.
///
/// The numeric order is part of the contract: carry-over cells at
/// `Want` or above mean the person actually worked that slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pref {
    /// "×": must not be assigned.
    Forbid = 0,
    /// Blank, space or ideographic space: acceptable second choice.
    None = 1,
    /// "〇": first choice.
    Want = 2,
    /// "輪番": pre-declared mandatory assignment, outside the normal
    /// coverage and required-count rules.
    Rotation = 3,
}

impl Pref {
    /// Decodes a raw cell by exact match; anything unrecognized is `None`.
    pub fn from_cell(cell: &str) -> Self {
        match cell {
            "×" => Pref::Forbid,
            "〇" => Pref::Want,
            "輪番" => Pref::Rotation,
            " " | "\u{3000}" => Pref::None,
            _ => Pref::None,
        }
    }

    /// Objective weight of an assignment on this cell.
    pub fn weight(self) -> i64 {
        self as i64
    }
}

/// Day or night shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftKind {
    Day,
    Night,
}

impl ShiftKind {
    /// "昼" is a day shift; everything else (including blank) is night.
    pub fn from_cell(cell: &str) -> Self {
        match cell {
            "昼" => ShiftKind::Day,
            _ => ShiftKind::Night,
        }
    }
}

/// One column of the calendar: a single day or night shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    /// Day number from the worksheet; equal numbers on adjacent columns
    /// mean the same calendar day.
    pub day_number: i64,
    /// Raw weekday label ("月".."日", "祝").
    pub weekday: String,
    pub kind: ShiftKind,
    /// False for carry-over columns from the previous month.
    pub current: bool,
}

impl Slot {
    pub fn is_thursday(&self) -> bool {
        self.weekday == THURSDAY
    }

    pub fn is_night(&self) -> bool {
        self.kind == ShiftKind::Night
    }
}

/// Physician on the duty list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    /// Number of regular shifts this person must take this month.
    pub required: u32,
    /// Exempt from the day→next-night rest rule.
    #[serde(default)]
    pub exempt_day_to_night: bool,
}

impl Person {
    pub fn new<N: Into<String>>(name: N, required: u32) -> Self {
        Self {
            name: name.into(),
            required,
            exempt_day_to_night: false,
        }
    }
}

/// Fully decoded input worksheet: people, slot columns (carry-over first,
/// then current month) and the preference matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    pub people: Vec<Person>,
    pub slots: Vec<Slot>,
    /// `prefs[p][s]` for every person and every slot column.
    pub prefs: Vec<Vec<Pref>>,
    /// Index of the first current-month slot; everything before it is
    /// carry-over.
    pub first_current: usize,
    /// The four header rows, current-month columns only, kept verbatim for
    /// the output grid.
    pub header: Vec<Vec<String>>,
}

impl Worksheet {
    /// Slot indices of the current month.
    pub fn current_range(&self) -> Range<usize> {
        self.first_current..self.slots.len()
    }

    /// Number of current-month slots.
    pub fn current_count(&self) -> usize {
        self.slots.len() - self.first_current
    }

    pub fn pref(&self, person: usize, slot: usize) -> Pref {
        self.prefs[person][slot]
    }

    pub fn find_person(&self, name: &str) -> Option<usize> {
        self.people.iter().position(|p| p.name == name)
    }
}
