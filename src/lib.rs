#![forbid(unsafe_code)]
//! Toban — monthly on-call duty roster optimization (lib + CLI).
//!
//! - Decodes the availability worksheet extracted by an external reader.
//! - Hard labor/rest constraints over a boolean person × slot matrix.
//! - Two-tier weighted objective solved by a 0-1 ILP backend (Cbc).
//! - CSV in/out; post-hoc verification of any materialized grid.

pub mod calendar;
pub mod error;
pub mod input;
pub mod io;
pub mod model;
pub mod solver;

pub use calendar::DayGroups;
pub use error::ScheduleError;
pub use model::{Person, Pref, ShiftKind, Slot, Worksheet, THURSDAY};
pub use solver::{
    verify, Mark, Solution, SolveConfig, SolveStatus, Solver, Violation, ViolationKind,
};
