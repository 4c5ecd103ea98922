mod constraints;
mod objective;
mod types;
mod vars;
mod verify;

pub use types::{Mark, Solution, SolveConfig, SolveStatus, COVERAGE_WEIGHT, PREF_WEIGHT};
pub use verify::{verify, Violation, ViolationKind};

use crate::calendar::DayGroups;
use crate::error::ScheduleError;
use crate::model::{Pref, Worksheet};
use coin_cbc::{raw::Status, Model};
use tracing::debug;
use vars::VarTable;

/// Builds and solves the duty-assignment model for one worksheet.
pub struct Solver<'a> {
    sheet: &'a Worksheet,
    days: DayGroups,
    config: SolveConfig,
}

impl<'a> Solver<'a> {
    pub fn new(sheet: &'a Worksheet, config: SolveConfig) -> Self {
        let days = DayGroups::build(sheet);
        Self {
            sheet,
            days,
            config,
        }
    }

    pub fn days(&self) -> &DayGroups {
        &self.days
    }

    /// Single solve, no time limit; optimal and feasible incumbents are
    /// success, anything else surfaces as an error.
    pub fn solve(&self) -> Result<Solution, ScheduleError> {
        let mut model = Model::default();
        let vars = VarTable::build(&mut model, self.sheet);
        constraints::emit_all(&mut model, &vars, self.sheet, &self.days);
        objective::apply(&mut model, &vars, self.sheet);

        model.set_parameter("logLevel", &self.config.log_level.to_string());
        if self.config.lns_only {
            // nearest Cbc analogue of a pure LNS search
            model.set_parameter("rins", "on");
            model.set_parameter("dins", "on");
        }

        debug!(
            people = self.sheet.people.len(),
            slots = self.sheet.current_count(),
            days = self.days.day_count(),
            "solving duty model"
        );

        let cbc = model.solve();
        let raw = cbc.raw();
        let status = if raw.is_proven_optimal() {
            SolveStatus::Optimal
        } else if raw.is_proven_infeasible() {
            return Err(ScheduleError::Infeasible);
        } else {
            match raw.status() {
                Status::Stopped => SolveStatus::Feasible,
                Status::Finished => return Err(ScheduleError::Infeasible),
                other => {
                    return Err(ScheduleError::Solver(format!(
                        "unexpected backend status: {other:?}"
                    )))
                }
            }
        };

        let objective = raw.obj_value().round() as i64;
        let (covered_count, pref_sum) = Solution::decompose(objective);
        let marks = self.extract(&cbc, &vars);

        Ok(Solution {
            status,
            objective,
            covered_count,
            pref_sum,
            marks,
        })
    }

    fn extract(&self, cbc: &coin_cbc::Solution, vars: &VarTable) -> Vec<Vec<Mark>> {
        (0..self.sheet.people.len())
            .map(|p| {
                self.sheet
                    .current_range()
                    .map(|s| {
                        if self.sheet.pref(p, s) == Pref::Rotation {
                            Mark::Rotation
                        } else if cbc.col(vars.x(p, s)) > 0.5 {
                            Mark::Assigned
                        } else {
                            Mark::Empty
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
