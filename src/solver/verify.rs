//! Post-hoc verification of a materialized assignment grid against every
//! hard constraint. Used by the CLI `check` command and by the property
//! tests; a fresh solve must always verify clean.

use super::types::Mark;
use crate::calendar::DayGroups;
use crate::model::{Person, Pref, ShiftKind, Worksheet};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationKind {
    /// Assignment on a "×" cell.
    ForbiddenCell,
    /// Rotation cell not rendered as rotation, or the reverse.
    RotationMismatch,
    /// A non-Thursday slot without exactly one regular assignee.
    Coverage,
    /// Regular assignments do not match the required count.
    RequiredCount,
    /// Two duties within seven days, at least one a night shift.
    NightWindow,
    /// Two day shifts within six days.
    DayWindow,
    /// Night shift followed by the next day shift.
    NightThenDay,
    /// Day shift followed by the next night shift, person not exempt.
    DayThenNight,
    /// Day-then-next double without first choice on both cells.
    UnwantedDouble,
    /// Night duty too close to a previous-month duty.
    CarryOverRest,
    /// Night duty within six days after a rotation.
    PostRotationRest,
}

/// One broken rule, with the person (when person-level) and the absolute
/// slot indices involved.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub person: Option<String>,
    pub slots: Vec<usize>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.person {
            Some(name) => write!(f, "{:?} | {} | slots {:?}", self.kind, name, self.slots),
            None => write!(f, "{:?} | slots {:?}", self.kind, self.slots),
        }
    }
}

/// Checks `marks[p][j]` (current-month columns, person order of the sheet)
/// against the full rule set. The grid shape must match the sheet.
pub fn verify(sheet: &Worksheet, days: &DayGroups, marks: &[Vec<Mark>]) -> Vec<Violation> {
    let mut out = Vec::new();
    let mark = |p: usize, s: usize| marks[p][s - sheet.first_current];

    fixed_cells(sheet, marks, &mut out);
    coverage(sheet, marks, &mut out);
    required_counts(sheet, marks, &mut out);

    for (p, person) in sheet.people.iter().enumerate() {
        // pair rules over day windows
        for s1 in sheet.current_range() {
            if !mark(p, s1).is_worked() {
                continue;
            }
            let d1 = days.day_of(s1);
            for s2 in (s1 + 1)..sheet.slots.len() {
                if !mark(p, s2).is_worked() {
                    continue;
                }
                let gap = days.day_of(s2) - d1;
                let night_pair = sheet.slots[s1].is_night() || sheet.slots[s2].is_night();
                let rotation_pair = sheet.pref(p, s1) == Pref::Rotation
                    || sheet.pref(p, s2) == Pref::Rotation;
                if night_pair && !rotation_pair && (1..=6).contains(&gap) {
                    out.push(violation(ViolationKind::NightWindow, person, &[s1, s2]));
                }
                if sheet.slots[s1].kind == ShiftKind::Day
                    && sheet.slots[s2].kind == ShiftKind::Day
                    && (1..=5).contains(&gap)
                {
                    out.push(violation(ViolationKind::DayWindow, person, &[s1, s2]));
                }
            }
        }

        // consecutive-slot rules
        for s in sheet.current_range() {
            let next = s + 1;
            if next >= sheet.slots.len() {
                break;
            }
            if !(mark(p, s).is_worked() && mark(p, next).is_worked()) {
                continue;
            }
            if sheet.slots[s].is_night() && sheet.slots[next].kind == ShiftKind::Day {
                out.push(violation(ViolationKind::NightThenDay, person, &[s, next]));
            }
            if sheet.slots[s].kind == ShiftKind::Day
                && sheet.slots[next].is_night()
                && !person.exempt_day_to_night
            {
                out.push(violation(ViolationKind::DayThenNight, person, &[s, next]));
            }
            if sheet.slots[s].kind == ShiftKind::Day
                && !(sheet.pref(p, s) == Pref::Want && sheet.pref(p, next) == Pref::Want)
            {
                out.push(violation(ViolationKind::UnwantedDouble, person, &[s, next]));
            }
        }

        carry_over(sheet, days, p, marks, &mut out);
        post_rotation(sheet, days, p, marks, &mut out);
    }

    out
}

fn violation(kind: ViolationKind, person: &Person, slots: &[usize]) -> Violation {
    Violation {
        kind,
        person: Some(person.name.clone()),
        slots: slots.to_vec(),
    }
}

fn fixed_cells(sheet: &Worksheet, marks: &[Vec<Mark>], out: &mut Vec<Violation>) {
    for (p, person) in sheet.people.iter().enumerate() {
        for s in sheet.current_range() {
            let mark = marks[p][s - sheet.first_current];
            let pref = sheet.pref(p, s);
            if pref == Pref::Forbid && mark == Mark::Assigned {
                out.push(violation(ViolationKind::ForbiddenCell, person, &[s]));
            }
            if (pref == Pref::Rotation) != (mark == Mark::Rotation) {
                out.push(violation(ViolationKind::RotationMismatch, person, &[s]));
            }
        }
    }
}

fn coverage(sheet: &Worksheet, marks: &[Vec<Mark>], out: &mut Vec<Violation>) {
    for s in sheet.current_range() {
        if sheet.slots[s].is_thursday() {
            continue;
        }
        let assignees = (0..sheet.people.len())
            .filter(|&p| marks[p][s - sheet.first_current] == Mark::Assigned)
            .count();
        if assignees != 1 {
            out.push(Violation {
                kind: ViolationKind::Coverage,
                person: None,
                slots: vec![s],
            });
        }
    }
}

fn required_counts(sheet: &Worksheet, marks: &[Vec<Mark>], out: &mut Vec<Violation>) {
    for (p, person) in sheet.people.iter().enumerate() {
        let assigned = marks[p].iter().filter(|m| **m == Mark::Assigned).count();
        if assigned != person.required as usize {
            out.push(violation(ViolationKind::RequiredCount, person, &[]));
        }
    }
}

fn carry_over(
    sheet: &Worksheet,
    days: &DayGroups,
    p: usize,
    marks: &[Vec<Mark>],
    out: &mut Vec<Violation>,
) {
    // a worked carry-over slot within six days before a non-rotation night
    // forbids that night entirely
    let first_day = days.first_current_day();
    for s1 in sheet.current_range() {
        if !sheet.slots[s1].is_night() || sheet.pref(p, s1) == Pref::Rotation {
            continue;
        }
        if marks[p][s1 - sheet.first_current] != Mark::Assigned {
            continue;
        }
        let d1 = days.day_of(s1);
        if d1 > first_day + 5 {
            continue;
        }
        for back in 1..=6usize {
            let Some(d2) = d1.checked_sub(back) else {
                continue;
            };
            for &s2 in days.group(d2) {
                if sheet.slots[s2].current || sheet.pref(p, s2) < Pref::Want {
                    continue;
                }
                out.push(violation(
                    ViolationKind::CarryOverRest,
                    &sheet.people[p],
                    &[s1, s2],
                ));
            }
        }
    }
}

fn post_rotation(
    sheet: &Worksheet,
    days: &DayGroups,
    p: usize,
    marks: &[Vec<Mark>],
    out: &mut Vec<Violation>,
) {
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
                if marks[p][s2 - sheet.first_current].is_worked() {
                    out.push(violation(
                        ViolationKind::PostRotationRest,
                        &sheet.people[p],
                        &[s, s2],
                    ));
                }
            }
        }
    }
}
