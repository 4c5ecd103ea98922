//! Hard constraints over the assignment matrix.
//!
//! Fixed cells are pinned through column bounds; every pair rule is an
//! `x1 + x2 <= 1` row. Day distances are day-group distances, so carry-over
//! days count toward the rest windows across the month boundary.

use super::vars::VarTable;
use crate::calendar::DayGroups;
use crate::model::{Pref, ShiftKind, Worksheet};
use coin_cbc::{Col, Model};
use tracing::warn;

pub(super) fn emit_all(model: &mut Model, vars: &VarTable, sheet: &Worksheet, days: &DayGroups) {
    pin_fixed_cells(model, vars, sheet);
    cover_slots(model, vars, sheet);
    required_counts(model, vars, sheet);
    night_window_rest(model, vars, sheet, days);
    adjacent_slot_rules(model, vars, sheet);
    day_window_rest(model, vars, sheet, days);
    carry_over_rest(model, vars, sheet, days);
    post_rotation_rest(model, vars, sheet, days);
}

fn at_most_one(model: &mut Model, a: Col, b: Col) {
    let row = model.add_row();
    model.set_row_upper(row, 1.0);
    model.set_weight(row, a, 1.0);
    model.set_weight(row, b, 1.0);
}

/// Forbidden cells are pinned to 0, rotation cells to 1.
fn pin_fixed_cells(model: &mut Model, vars: &VarTable, sheet: &Worksheet) {
    for p in 0..sheet.people.len() {
        for s in sheet.current_range() {
            match sheet.pref(p, s) {
                Pref::Forbid => model.set_col_upper(vars.x(p, s), 0.0),
                Pref::Rotation => model.set_col_lower(vars.x(p, s), 1.0),
                _ => {}
            }
        }
    }
}

/// Exactly one non-rotation assignee per current-month slot. Thursdays are
/// covered externally and get no constraint; rotations still stand.
fn cover_slots(model: &mut Model, vars: &VarTable, sheet: &Worksheet) {
    for s in sheet.current_range() {
        if sheet.slots[s].is_thursday() {
            continue;
        }
        let row = model.add_row();
        model.set_row_lower(row, 1.0);
        model.set_row_upper(row, 1.0);
        for p in 0..sheet.people.len() {
            if sheet.pref(p, s) != Pref::Rotation {
                model.set_weight(row, vars.x(p, s), 1.0);
            }
        }
    }
}

/// Each person's non-rotation assignments add up to the required count.
fn required_counts(model: &mut Model, vars: &VarTable, sheet: &Worksheet) {
    for (p, person) in sheet.people.iter().enumerate() {
        let row = model.add_row();
        model.set_row_lower(row, f64::from(person.required));
        model.set_row_upper(row, f64::from(person.required));
        for s in sheet.current_range() {
            if sheet.pref(p, s) != Pref::Rotation {
                model.set_weight(row, vars.x(p, s), 1.0);
            }
        }
    }
}

/// No two duties within a seven-day window when at least one is a night
/// shift. Rotation cells are exempt; their rest is handled separately.
fn night_window_rest(model: &mut Model, vars: &VarTable, sheet: &Worksheet, days: &DayGroups) {
    for s1 in sheet.current_range() {
        let d1 = days.day_of(s1);
        if d1 == days.last_day() {
            continue;
        }
        let hi = (d1 + 6).min(days.last_day());
        for d2 in (d1 + 1)..=hi {
            for &s2 in days.group(d2) {
                if !sheet.slots[s2].current {
                    continue;
                }
                if !sheet.slots[s1].is_night() && !sheet.slots[s2].is_night() {
                    continue;
                }
                for p in 0..sheet.people.len() {
                    if sheet.pref(p, s1) == Pref::Rotation || sheet.pref(p, s2) == Pref::Rotation {
                        continue;
                    }
                    at_most_one(model, vars.x(p, s1), vars.x(p, s2));
                }
            }
        }
    }
}

/// Consecutive-slot rules:
/// night then day is always excluded; day then night is excluded for
/// everyone but the exempt people; a day shift followed by the next slot is
/// only allowed as a voluntary double when both cells are first choice.
fn adjacent_slot_rules(model: &mut Model, vars: &VarTable, sheet: &Worksheet) {
    for s in sheet.current_range() {
        let next = s + 1;
        if next >= sheet.slots.len() {
            break;
        }
        let night_then_day =
            sheet.slots[s].is_night() && sheet.slots[next].kind == ShiftKind::Day;
        let day_then_night =
            sheet.slots[s].kind == ShiftKind::Day && sheet.slots[next].is_night();
        let day_first = sheet.slots[s].kind == ShiftKind::Day;

        for (p, person) in sheet.people.iter().enumerate() {
            if night_then_day {
                at_most_one(model, vars.x(p, s), vars.x(p, next));
            }
            if day_then_night && !person.exempt_day_to_night {
                at_most_one(model, vars.x(p, s), vars.x(p, next));
            }
            if day_first
                && !(sheet.pref(p, s) == Pref::Want && sheet.pref(p, next) == Pref::Want)
            {
                at_most_one(model, vars.x(p, s), vars.x(p, next));
            }
        }
    }
}

/// No two day shifts within a six-day window.
fn day_window_rest(model: &mut Model, vars: &VarTable, sheet: &Worksheet, days: &DayGroups) {
    for s1 in sheet.current_range() {
        if sheet.slots[s1].kind != ShiftKind::Day {
            continue;
        }
        let d1 = days.day_of(s1);
        if d1 == days.last_day() {
            continue;
        }
        let hi = (d1 + 5).min(days.last_day());
        for d2 in (d1 + 1)..=hi {
            for &s2 in days.group(d2) {
                if !sheet.slots[s2].current || sheet.slots[s2].kind != ShiftKind::Day {
                    continue;
                }
                for p in 0..sheet.people.len() {
                    at_most_one(model, vars.x(p, s1), vars.x(p, s2));
                }
            }
        }
    }
}

/// No night duty within six days after a previous-month duty, unless the
/// night is itself a pre-declared rotation. A window day falling before the
/// sheet means the carry-over data is too short; that day is skipped.
fn carry_over_rest(model: &mut Model, vars: &VarTable, sheet: &Worksheet, days: &DayGroups) {
    let first_day = days.first_current_day();
    for s1 in sheet.current_range() {
        if !sheet.slots[s1].is_night() {
            continue;
        }
        let d1 = days.day_of(s1);
        if d1 > first_day + 5 {
            continue;
        }
        for back in 1..=6usize {
            let Some(d2) = d1.checked_sub(back) else {
                warn!(
                    slot = s1,
                    offset = back,
                    "carry-over window reaches before the sheet; skipping"
                );
                continue;
            };
            for &s2 in days.group(d2) {
                if sheet.slots[s2].current {
                    continue;
                }
                for p in 0..sheet.people.len() {
                    if sheet.pref(p, s1) == Pref::Rotation {
                        continue;
                    }
                    if sheet.pref(p, s2) >= Pref::Want {
                        model.set_col_upper(vars.x(p, s1), 0.0);
                    }
                }
            }
        }
    }
}

/// A rotation blocks the same person's night duties for the following six
/// days. Day slots after a rotation stay unrestricted.
fn post_rotation_rest(model: &mut Model, vars: &VarTable, sheet: &Worksheet, days: &DayGroups) {
    for p in 0..sheet.people.len() {
        for s in sheet.current_range() {
            if sheet.pref(p, s) != Pref::Rotation {
                continue;
            }
            let d = days.day_of(s);
            let hi = (d + 6).min(days.last_day());
            for d2 in (d + 1)..=hi {
                for &s2 in days.group(d2) {
                    if !sheet.slots[s2].current || !sheet.slots[s2].is_night() {
                        continue;
                    }
                    model.set_col_upper(vars.x(p, s2), 0.0);
                }
            }
        }
    }
}
