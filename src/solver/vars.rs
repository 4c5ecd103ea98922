use crate::model::Worksheet;
use coin_cbc::{Col, Model};

/// Boolean assignment matrix `x[p][s]` over current-month slots, plus the
/// two auxiliary families used by the objective.
pub(super) struct VarTable {
    x: Vec<Vec<Col>>,
    pub covered: Vec<Col>,
    pub want_count: Vec<Col>,
    first_current: usize,
}

impl VarTable {
    pub fn build(model: &mut Model, sheet: &Worksheet) -> Self {
        let people = sheet.people.len();
        let current = sheet.current_count();

        let x = (0..people)
            .map(|_| (0..current).map(|_| model.add_binary()).collect())
            .collect();
        let covered = (0..people).map(|_| model.add_binary()).collect();
        let want_count = (0..people)
            .map(|_| {
                let col = model.add_integer();
                model.set_col_lower(col, 0.0);
                model.set_col_upper(col, current as f64);
                col
            })
            .collect();

        Self {
            x,
            covered,
            want_count,
            first_current: sheet.first_current,
        }
    }

    /// Column for a person and an absolute slot index (current month only).
    pub fn x(&self, person: usize, slot: usize) -> Col {
        self.x[person][slot - self.first_current]
    }
}
