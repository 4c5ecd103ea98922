use crate::model::Worksheet;
use serde::{Deserialize, Serialize};

/// Objective weight of one preference point.
pub const PREF_WEIGHT: i64 = 1;
/// Objective weight of granting a person at least one first-choice slot.
/// Dominates any realistic per-person preference total.
pub const COVERAGE_WEIGHT: i64 = 1000;

/// Solver driver options.
#[derive(Debug, Clone)]
pub struct SolveConfig {
    /// Keep the LNS-style improvement heuristics on.
    pub lns_only: bool,
    /// Backend log level; 0 is silent.
    pub log_level: u32,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            lns_only: true,
            log_level: 0,
        }
    }
}

/// Terminal solver outcomes accepted as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    Optimal,
    /// An incumbent without an optimality proof (interrupted search).
    Feasible,
}

/// One cell of the output grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    /// Regular assignment, rendered "〇".
    Assigned,
    /// Pre-declared rotation, rendered "輪番".
    Rotation,
    Empty,
}

impl Mark {
    pub fn as_str(self) -> &'static str {
        match self {
            Mark::Assigned => "〇",
            Mark::Rotation => "輪番",
            Mark::Empty => "",
        }
    }

    pub fn from_cell(cell: &str) -> Self {
        match cell {
            "〇" => Mark::Assigned,
            "輪番" => Mark::Rotation,
            _ => Mark::Empty,
        }
    }

    pub fn is_worked(self) -> bool {
        self != Mark::Empty
    }
}

/// Result of a successful solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub status: SolveStatus,
    pub objective: i64,
    /// `objective / 1000`: people granted at least one first-choice slot.
    pub covered_count: i64,
    /// `objective % 1000`: linear preference score.
    pub pref_sum: i64,
    /// `marks[p][j]` with `j` running over current-month slots.
    pub marks: Vec<Vec<Mark>>,
}

impl Solution {
    /// Splits an objective value into (covered people, preference score).
    pub fn decompose(objective: i64) -> (i64, i64) {
        (objective / COVERAGE_WEIGHT, objective % COVERAGE_WEIGHT)
    }

    /// Output grid: the four header rows copied from the input followed by
    /// one row per person in name order.
    pub fn to_grid(&self, sheet: &Worksheet) -> Vec<Vec<String>> {
        let mut grid = sheet.header.clone();
        for row in &self.marks {
            grid.push(row.iter().map(|m| m.as_str().to_string()).collect());
        }
        grid
    }
}
