use thiserror::Error;

/// Crate-wide error taxonomy.
///
/// `MissingMarker`, `MalformedHeader` and `ExemptNotFound` are input errors
/// and abort before any solving; `Infeasible` and `Solver` come out of the
/// solve itself. Constraints are never relaxed on infeasibility.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A structural marker cell is absent from the input table.
    #[error("input marker '{0}' not found")]
    MissingMarker(&'static str),
    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),
    /// A configured exempt name does not appear in the name column.
    #[error("designated person not found: {0}")]
    ExemptNotFound(String),
    /// The solver proved that no assignment satisfies the hard constraints.
    #[error("no feasible assignment exists")]
    Infeasible,
    #[error("solver failure: {0}")]
    Solver(String),
}
