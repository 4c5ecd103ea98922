//! Two-tier weighted objective: a linear preference reward on every
//! non-rotation assignment, plus a large bonus per person who receives at
//! least one first-choice slot.

use super::types::{COVERAGE_WEIGHT, PREF_WEIGHT};
use super::vars::VarTable;
use crate::model::{Pref, Worksheet};
use coin_cbc::{Model, Sense};

pub(super) fn apply(model: &mut Model, vars: &VarTable, sheet: &Worksheet) {
    let current = sheet.current_count() as f64;
    for p in 0..sheet.people.len() {
        // want_count[p] = sum of x over this person's first-choice cells
        let def = model.add_row();
        model.set_row_lower(def, 0.0);
        model.set_row_upper(def, 0.0);
        model.set_weight(def, vars.want_count[p], 1.0);
        for s in sheet.current_range() {
            if sheet.pref(p, s) == Pref::Want {
                model.set_weight(def, vars.x(p, s), -1.0);
            }
        }

        // covered[p] = 1 exactly when want_count[p] >= 1, by channeling:
        // want_count <= S * covered  and  covered <= want_count
        let cap = model.add_row();
        model.set_row_upper(cap, 0.0);
        model.set_weight(cap, vars.want_count[p], 1.0);
        model.set_weight(cap, vars.covered[p], -current);

        let floor = model.add_row();
        model.set_row_upper(floor, 0.0);
        model.set_weight(floor, vars.covered[p], 1.0);
        model.set_weight(floor, vars.want_count[p], -1.0);

        model.set_obj_coeff(vars.covered[p], COVERAGE_WEIGHT as f64);
        for s in sheet.current_range() {
            let pref = sheet.pref(p, s);
            if pref == Pref::Rotation {
                continue;
            }
            let weight = PREF_WEIGHT * pref.weight();
            if weight != 0 {
                model.set_obj_coeff(vars.x(p, s), weight as f64);
            }
        }
    }
    model.set_obj_sense(Sense::Maximize);
}
