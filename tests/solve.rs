#![forbid(unsafe_code)]
mod common;

use common::{sheet, solve, N, R, W, X};
use toban::{verify, DayGroups, Mark, ScheduleError, SolveStatus, ViolationKind};

/// Seven consecutive night slots (days 1–7) behind one carry-over column;
/// C holds a rotation on day 4 and days 5–7 are Thursdays.
fn rotation_month() -> toban::Worksheet {
    let slots = [
        (25, "金", "夜"),
        (1, "月", "夜"),
        (2, "火", "夜"),
        (3, "水", "夜"),
        (4, "金", "夜"),
        (5, "木", "夜"),
        (6, "木", "夜"),
        (7, "木", "夜"),
    ];
    sheet(
        1,
        &slots,
        &[
            ("A", 1, &[N, W, N, N, N, N, N, N]),
            ("B", 1, &[N, N, W, N, N, N, N, N]),
            ("C", 1, &[N, N, N, N, R, N, N, N]),
            ("D", 1, &[N, N, N, N, N, N, N, N]),
        ],
        &[],
    )
}

#[test]
fn undercovered_month_is_infeasible() {
    // three nights to cover, only two required shifts between two people
    let slots = [
        (31, "日", "夜"),
        (1, "月", "夜"),
        (2, "月", "夜"),
        (3, "月", "夜"),
    ];
    let sheet = sheet(
        1,
        &slots,
        &[("A", 1, &[N, W, N, N]), ("B", 1, &[N, N, N, W])],
        &[],
    );
    assert!(matches!(solve(&sheet), Err(ScheduleError::Infeasible)));
}

#[test]
fn two_nights_within_a_week_are_infeasible() {
    // counts now add up, but A would need two nights three days apart
    let slots = [
        (31, "日", "夜"),
        (1, "月", "夜"),
        (2, "月", "夜"),
        (3, "月", "夜"),
    ];
    let sheet = sheet(
        1,
        &slots,
        &[("A", 2, &[N, W, N, N]), ("B", 1, &[N, N, N, W])],
        &[],
    );
    assert!(matches!(solve(&sheet), Err(ScheduleError::Infeasible)));
}

#[test]
fn rotation_is_pinned_and_shields_the_following_nights() {
    let sheet = rotation_month();
    let solution = solve(&sheet).unwrap();

    assert_eq!(solution.status, SolveStatus::Optimal);
    // A and B take their first choices, C must fall back to day 3 because
    // the rotation blocks its own coverage slot, D covers day 4
    assert_eq!(solution.marks[0][0], Mark::Assigned);
    assert_eq!(solution.marks[1][1], Mark::Assigned);
    assert_eq!(solution.marks[2][2], Mark::Assigned);
    assert_eq!(solution.marks[2][3], Mark::Rotation);
    assert_eq!(solution.marks[3][3], Mark::Assigned);
    // post-rotation rest: no C duty on days 5-7
    assert_eq!(solution.marks[2][4], Mark::Empty);
    assert_eq!(solution.marks[2][5], Mark::Empty);
    assert_eq!(solution.marks[2][6], Mark::Empty);

    // score decomposition: two first-choice grants, four preference points
    // from wants plus two from second choices
    assert_eq!(solution.objective, 2006);
    assert_eq!(solution.covered_count, 2);
    assert_eq!(solution.pref_sum, 6);
    assert_eq!(
        solution.objective,
        solution.covered_count * 1000 + solution.pref_sum
    );

    let days = DayGroups::build(&sheet);
    assert!(verify(&sheet, &days, &solution.marks).is_empty());
}

#[test]
fn thursdays_need_no_coverage() {
    let slots = [(25, "金", "夜"), (1, "木", "夜")];
    let sheet = sheet(1, &slots, &[("A", 0, &[N, N])], &[]);
    let solution = solve(&sheet).unwrap();
    assert_eq!(solution.marks[0][0], Mark::Empty);
    assert_eq!(solution.objective, 0);
}

#[test]
fn exempt_person_may_take_a_wanted_day_night_double() {
    let slots = [(25, "金", "夜"), (1, "月", "昼"), (1, "月", "夜")];
    let people: [(&str, u32, &[&str]); 2] =
        [("E", 2, &[N, W, W]), ("F", 0, &[N, N, N])];

    let sheet_exempt = sheet(1, &slots, &people, &["E"]);
    let solution = solve(&sheet_exempt).unwrap();
    assert_eq!(solution.marks[0][0], Mark::Assigned);
    assert_eq!(solution.marks[0][1], Mark::Assigned);
    assert_eq!(solution.objective, 1004);

    // same sheet without the exemption: the double is forbidden
    let sheet_plain = sheet(1, &slots, &people, &[]);
    assert!(matches!(solve(&sheet_plain), Err(ScheduleError::Infeasible)));

    // exempt but without first choice on both cells: still forbidden
    let half_want: [(&str, u32, &[&str]); 2] =
        [("E", 2, &[N, W, N]), ("F", 0, &[N, N, N])];
    let sheet_half = sheet(1, &slots, &half_want, &["E"]);
    assert!(matches!(solve(&sheet_half), Err(ScheduleError::Infeasible)));
}

#[test]
fn carry_over_duty_blocks_the_first_nights() {
    // A worked three days before the month starts; seven people cover seven
    // consecutive nights, so A must land on day 5 or later
    let slots = [
        (26, "金", "夜"),
        (27, "土", "夜"),
        (28, "日", "夜"),
        (1, "月", "夜"),
        (2, "月", "夜"),
        (3, "月", "夜"),
        (4, "月", "夜"),
        (5, "月", "夜"),
        (6, "月", "夜"),
        (7, "月", "夜"),
    ];
    let carry_worked: &[&str] = &[W, N, N, N, N, N, N, N, N, N];
    let free: &[&str] = &[N, N, N, N, N, N, N, N, N, N];
    let sheet = sheet(
        3,
        &slots,
        &[
            ("A", 1, carry_worked),
            ("B", 1, free),
            ("C", 1, free),
            ("D", 1, free),
            ("E", 1, free),
            ("F", 1, free),
            ("G", 1, free),
        ],
        &[],
    );
    let solution = solve(&sheet).unwrap();

    for j in 0..4 {
        assert_eq!(solution.marks[0][j], Mark::Empty, "day {} must rest", j + 1);
    }
    let taken: Vec<usize> = (0..7)
        .filter(|&j| solution.marks[0][j] == Mark::Assigned)
        .collect();
    assert_eq!(taken.len(), 1);
    assert!(taken[0] >= 4);

    let days = DayGroups::build(&sheet);
    assert!(verify(&sheet, &days, &solution.marks).is_empty());
}

#[test]
fn day_shifts_need_six_days_apart() {
    // two wanted day shifts for the sole person; Thursdays in between carry
    // no coverage. Two days apart the six-day rest forbids the pair, six
    // days apart it goes through.
    let close = [
        (25, "金", "夜"),
        (1, "月", "昼"),
        (2, "木", "昼"),
        (3, "月", "昼"),
    ];
    let close_prefs: [(&str, u32, &[&str]); 1] = [("A", 2, &[N, W, N, W])];
    assert!(matches!(
        solve(&sheet(1, &close, &close_prefs, &[])),
        Err(ScheduleError::Infeasible)
    ));

    let apart = [
        (25, "金", "夜"),
        (1, "月", "昼"),
        (2, "木", "昼"),
        (3, "木", "昼"),
        (4, "木", "昼"),
        (5, "木", "昼"),
        (6, "木", "昼"),
        (7, "月", "昼"),
    ];
    let apart_prefs: [(&str, u32, &[&str]); 1] =
        [("A", 2, &[N, W, N, N, N, N, N, W])];
    let solution = solve(&sheet(1, &apart, &apart_prefs, &[])).unwrap();
    assert_eq!(solution.marks[0][0], Mark::Assigned);
    assert_eq!(solution.marks[0][6], Mark::Assigned);
    assert_eq!(solution.objective, 1004);
}

#[test]
fn row_order_does_not_change_the_objective() {
    let slots = [
        (25, "金", "夜"),
        (1, "月", "夜"),
        (2, "火", "夜"),
        (3, "水", "夜"),
        (4, "金", "夜"),
        (5, "木", "夜"),
        (6, "木", "夜"),
        (7, "木", "夜"),
    ];
    let rows: [(&str, u32, &[&str]); 4] = [
        ("A", 1, &[N, W, N, N, N, N, N, N]),
        ("B", 1, &[N, N, W, N, N, N, N, N]),
        ("C", 1, &[N, N, N, N, R, N, N, N]),
        ("D", 1, &[N, N, N, N, N, N, N, N]),
    ];
    let forward = sheet(1, &slots, &rows, &[]);
    let mut reversed_rows = rows;
    reversed_rows.reverse();
    let reversed = sheet(1, &slots, &reversed_rows, &[]);

    let a = solve(&forward).unwrap();
    let b = solve(&reversed).unwrap();
    assert_eq!(a.objective, b.objective);
}

#[test]
fn forbidding_a_wanted_cell_never_helps() {
    let slots = [(31, "日", "夜"), (1, "月", "夜"), (2, "月", "夜")];
    let open: [(&str, u32, &[&str]); 2] =
        [("A", 1, &[N, W, N]), ("B", 1, &[N, N, N])];
    let blocked: [(&str, u32, &[&str]); 2] =
        [("A", 1, &[N, X, N]), ("B", 1, &[N, N, N])];

    let before = solve(&sheet(1, &slots, &open, &[])).unwrap();
    let after = solve(&sheet(1, &slots, &blocked, &[])).unwrap();
    assert!(after.objective <= before.objective);
    // with the want cell gone, nobody holds a first choice any more
    assert_eq!(after.covered_count, 0);
}

#[test]
fn verifier_flags_broken_grids() {
    let sheet = rotation_month();
    let solution = solve(&sheet).unwrap();
    let days = DayGroups::build(&sheet);

    // give A a second night right after the first
    let mut marks = solution.marks.clone();
    marks[0][1] = Mark::Assigned;
    let violations = verify(&sheet, &days, &marks);
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::NightWindow));
    assert!(violations.iter().any(|v| v.kind == ViolationKind::Coverage));
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::RequiredCount));

    // erase the rotation cell
    let mut marks = solution.marks.clone();
    marks[2][3] = Mark::Empty;
    let violations = verify(&sheet, &days, &marks);
    assert!(violations
        .iter()
        .any(|v| v.kind == ViolationKind::RotationMismatch));
}
