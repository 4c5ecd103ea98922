//! Decoding of the raw cell table into a [`Worksheet`].
//!
//! The table comes from an external reader as a rectangular matrix of
//! strings. Layout contract: row 0 carries the "past"/"start"/"end" column
//! markers, rows 1–3 the weekday / day-number / shift-type headers, column 0
//! the required shift counts and column 1 the names, delimited by "start" and
//! "end" cells.

use crate::error::ScheduleError;
use crate::model::{Person, Pref, ShiftKind, Slot, Worksheet};

const REQUIRED_COL: usize = 0;
const NAMES_COL: usize = 1;
const WEEKDAY_ROW: usize = 1;
const DAY_NUMBER_ROW: usize = 2;
const SHIFT_TYPE_ROW: usize = 3;
const HEADER_ROWS: usize = 4;

/// Ragged-row safe cell access; missing cells read as empty.
fn cell<'a>(table: &'a [Vec<String>], row: usize, col: usize) -> &'a str {
    table
        .get(row)
        .and_then(|r| r.get(col))
        .map(String::as_str)
        .unwrap_or("")
}

fn numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

impl Worksheet {
    /// Decodes an extracted table. `exempt` lists the names freed from the
    /// day→next-night rest rule; an unknown name is an input error.
    pub fn from_table(table: &[Vec<String>], exempt: &[String]) -> Result<Self, ScheduleError> {
        let (past_col, start_col, end_col) = column_markers(table)?;
        let (name_start, name_end) = name_range(table)?;

        if start_col < past_col || end_col <= start_col {
            return Err(ScheduleError::MalformedHeader(
                "column markers out of order (expected past <= start < end)",
            ));
        }

        let slots: Vec<Slot> = (past_col..end_col)
            .map(|col| Slot {
                day_number: numeric(cell(table, DAY_NUMBER_ROW, col))
                    .map(|v| v as i64)
                    .unwrap_or(0),
                weekday: cell(table, WEEKDAY_ROW, col).to_string(),
                kind: ShiftKind::from_cell(cell(table, SHIFT_TYPE_ROW, col)),
                current: col >= start_col,
            })
            .collect();

        let people: Vec<Person> = (name_start..name_end)
            .map(|row| {
                let required = numeric(cell(table, row, REQUIRED_COL))
                    .map(|v| v.max(0.0) as u32)
                    .unwrap_or(0);
                Person::new(cell(table, row, NAMES_COL), required)
            })
            .collect();

        let prefs: Vec<Vec<Pref>> = (name_start..name_end)
            .map(|row| {
                (past_col..end_col)
                    .map(|col| Pref::from_cell(cell(table, row, col)))
                    .collect()
            })
            .collect();

        let header: Vec<Vec<String>> = (0..HEADER_ROWS)
            .map(|row| {
                (start_col..end_col)
                    .map(|col| cell(table, row, col).to_string())
                    .collect()
            })
            .collect();

        let mut sheet = Worksheet {
            people,
            slots,
            prefs,
            first_current: start_col - past_col,
            header,
        };

        for name in exempt {
            match sheet.find_person(name) {
                Some(idx) => sheet.people[idx].exempt_day_to_night = true,
                None => return Err(ScheduleError::ExemptNotFound(name.clone())),
            }
        }

        Ok(sheet)
    }
}

/// Locates "past", "start" and "end" in row 0. "end" marks one past the last
/// current-month column.
fn column_markers(table: &[Vec<String>]) -> Result<(usize, usize, usize), ScheduleError> {
    let mut past_col = None;
    let mut start_col = None;
    let mut end_col = None;
    if let Some(row0) = table.first() {
        for (idx, val) in row0.iter().enumerate() {
            match val.as_str() {
                "past" => past_col = Some(idx),
                "start" => start_col = Some(idx),
                "end" => end_col = Some(idx + 1),
                _ => {}
            }
        }
    }
    Ok((
        past_col.ok_or(ScheduleError::MissingMarker("past"))?,
        start_col.ok_or(ScheduleError::MissingMarker("start"))?,
        end_col.ok_or(ScheduleError::MissingMarker("end"))?,
    ))
}

/// Finds the inclusive-exclusive name row range delimited by "start"/"end"
/// cells in the name column.
fn name_range(table: &[Vec<String>]) -> Result<(usize, usize), ScheduleError> {
    let mut name_start = None;
    let mut name_end = None;
    for (idx, row) in table.iter().enumerate() {
        match row.get(NAMES_COL).map(String::as_str) {
            Some("start") => name_start = Some(idx + 1),
            Some("end") => name_end = Some(idx),
            _ => {}
        }
    }
    let start = name_start.ok_or(ScheduleError::MissingMarker("name start"))?;
    let end = name_end.ok_or(ScheduleError::MissingMarker("name end"))?;
    if end < start {
        return Err(ScheduleError::MalformedHeader("name range is inverted"));
    }
    Ok((start, end))
}
