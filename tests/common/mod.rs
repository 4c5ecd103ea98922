#![allow(dead_code)]
use std::sync::Mutex;
use toban::{ScheduleError, Solution, SolveConfig, Solver, Worksheet};

/// Preference cell shorthands.
pub const N: &str = "";
pub const W: &str = "〇";
pub const X: &str = "×";
pub const R: &str = "輪番";

// Cbc keeps process-global state; serialize solves across test threads.
static SOLVE_LOCK: Mutex<()> = Mutex::new(());

pub fn solve(sheet: &Worksheet) -> Result<Solution, ScheduleError> {
    let _guard = SOLVE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    Solver::new(sheet, SolveConfig::default()).solve()
}

/// Builds a raw table in the worksheet layout: column 0 = required counts,
/// column 1 = names, slot columns from column 2 on; row 0 carries the
/// "past"/"start"/"end" markers, rows 1–3 the weekday / day-number /
/// shift-type headers. `carry` is the number of carry-over slot columns and
/// must be at least 1 so the "past" and "start" markers land on distinct
/// cells, as on the real sheet.
pub fn build_table(
    carry: usize,
    slots: &[(i64, &str, &str)],
    people: &[(&str, u32, &[&str])],
) -> Vec<Vec<String>> {
    assert!(carry >= 1 && carry < slots.len());
    let past_col = 2;
    let start_col = 2 + carry;
    let end_col = 2 + slots.len();
    let width = end_col + 1;

    let mut row0 = vec![String::new(); width];
    row0[past_col] = "past".into();
    row0[start_col] = "start".into();
    row0[end_col] = "end".into();

    let mut row1 = vec![String::new(); width];
    let mut row2 = vec![String::new(); width];
    let mut row3 = vec![String::new(); width];
    for (i, (day, weekday, kind)) in slots.iter().enumerate() {
        row1[2 + i] = weekday.to_string();
        row2[2 + i] = day.to_string();
        row3[2 + i] = kind.to_string();
    }

    let mut table = vec![row0, row1, row2, row3];

    let mut start_row = vec![String::new(); width];
    start_row[1] = "start".into();
    table.push(start_row);

    for (name, required, prefs) in people {
        assert_eq!(prefs.len(), slots.len(), "pref row width mismatch");
        let mut row = vec![String::new(); width];
        row[0] = required.to_string();
        row[1] = name.to_string();
        for (i, cell) in prefs.iter().enumerate() {
            row[2 + i] = cell.to_string();
        }
        table.push(row);
    }

    let mut end_row = vec![String::new(); width];
    end_row[1] = "end".into();
    table.push(end_row);

    table
}

/// Decodes a built table, panicking on input errors.
pub fn sheet(
    carry: usize,
    slots: &[(i64, &str, &str)],
    people: &[(&str, u32, &[&str])],
    exempt: &[&str],
) -> Worksheet {
    let exempt: Vec<String> = exempt.iter().map(|s| s.to_string()).collect();
    Worksheet::from_table(&build_table(carry, slots, people), &exempt).unwrap()
}

/// Renders a table as CSV text for the CLI tests.
pub fn to_csv(table: &[Vec<String>]) -> String {
    let mut out = String::new();
    for row in table {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
