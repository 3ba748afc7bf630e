use sitebook::core::attendance::AttendanceLogic;
use sitebook::core::roster::RosterLogic;
use sitebook::core::week::WeekLogic;
use sitebook::db::attendance::{count_attendance_by_labour, load_assignments, load_attendance_for_entry};
use sitebook::db::weeks::load_entries;
use sitebook::errors::AppError;
use sitebook::models::assignment::RosterEntry;
use sitebook::models::attendance::AttendanceInput;

mod common;
use common::{add_labour, add_site, add_week, d, dec, first_saturday, open_db, roster};

#[test]
fn roster_creates_seven_rows_per_labourer() {
    let mut pool = open_db("roster_rows");
    let site = add_site(&mut pool);
    let a = add_labour(&mut pool, &site, "Arjun", "0");
    let b = add_labour(&mut pool, &site, "Bhavna", "0");
    let week = add_week(&mut pool, &site, first_saturday());

    roster(&mut pool, &week.id, &[(&a.id, "500"), (&b.id, "450")]);

    let mut counts = count_attendance_by_labour(&pool.conn, &week.id).unwrap();
    counts.sort();
    let mut expected = vec![(a.id.clone(), 7), (b.id.clone(), 7)];
    expected.sort();
    assert_eq!(counts, expected);

    let day = &load_entries(&pool.conn, &week.id).unwrap()[0];
    for row in load_attendance_for_entry(&pool.conn, &day.id).unwrap() {
        assert!(!row.is_present);
        assert!(row.advance_taken.is_zero());
        assert_eq!(row.multiplier, dec("1"));
    }
}

#[test]
fn setting_the_same_roster_twice_changes_nothing() {
    let mut pool = open_db("roster_idempotent");
    let site = add_site(&mut pool);
    let a = add_labour(&mut pool, &site, "Arjun", "0");
    let week = add_week(&mut pool, &site, first_saturday());

    roster(&mut pool, &week.id, &[(&a.id, "500")]);
    let before = load_assignments(&pool.conn, &week.id).unwrap();
    roster(&mut pool, &week.id, &[(&a.id, "500")]);
    let after = load_assignments(&pool.conn, &week.id).unwrap();

    assert_eq!(before.len(), 1);
    assert_eq!(before[0].id, after[0].id);
    assert_eq!(
        count_attendance_by_labour(&pool.conn, &week.id).unwrap(),
        vec![(a.id.clone(), 7)]
    );
}

#[test]
fn removed_then_readded_labourer_starts_fresh() {
    let mut pool = open_db("roster_readd");
    let site = add_site(&mut pool);
    let a = add_labour(&mut pool, &site, "Arjun", "0");
    let b = add_labour(&mut pool, &site, "Bhavna", "0");
    let week = add_week(&mut pool, &site, first_saturday());
    roster(&mut pool, &week.id, &[(&a.id, "500"), (&b.id, "500")]);

    let saturday = load_entries(&pool.conn, &week.id).unwrap()[0].clone();
    AttendanceLogic::submit(
        &mut pool,
        &saturday.id,
        &[
            AttendanceInput::present(a.id.clone()).with_advance(dec("100")),
            AttendanceInput::present(b.id.clone()),
        ],
        false,
        first_saturday(),
    )
    .unwrap();

    roster(&mut pool, &week.id, &[(&b.id, "500")]);
    assert_eq!(
        count_attendance_by_labour(&pool.conn, &week.id).unwrap(),
        vec![(b.id.clone(), 7)]
    );

    roster(&mut pool, &week.id, &[(&a.id, "550"), (&b.id, "500")]);
    let rows = load_attendance_for_entry(&pool.conn, &saturday.id).unwrap();
    let arjun = rows.iter().find(|r| r.labour_id == a.id).unwrap();
    assert!(!arjun.is_present);
    assert!(arjun.advance_taken.is_zero());
    let bhavna = rows.iter().find(|r| r.labour_id == b.id).unwrap();
    assert!(bhavna.is_present);
}

#[test]
fn wage_change_keeps_assignment() {
    let mut pool = open_db("roster_wage");
    let site = add_site(&mut pool);
    let a = add_labour(&mut pool, &site, "Arjun", "0");
    let week = add_week(&mut pool, &site, first_saturday());
    roster(&mut pool, &week.id, &[(&a.id, "500")]);
    let id = load_assignments(&pool.conn, &week.id).unwrap()[0].id.clone();

    roster(&mut pool, &week.id, &[(&a.id, "650")]);
    let after = load_assignments(&pool.conn, &week.id).unwrap();
    assert_eq!(after[0].id, id);
    assert_eq!(after[0].weekly_daily_wage, dec("650"));

    let updated = RosterLogic::update_wage(&mut pool, &id, dec("700.555")).unwrap();
    assert_eq!(updated.weekly_daily_wage, dec("700.56"));
}

#[test]
fn invalid_rosters_are_rejected() {
    let mut pool = open_db("roster_invalid");
    let site = add_site(&mut pool);
    let other_site = add_site(&mut pool);
    let a = add_labour(&mut pool, &site, "Arjun", "0");
    let stranger = add_labour(&mut pool, &other_site, "Zed", "0");
    let week = add_week(&mut pool, &site, first_saturday());

    let dup = [
        RosterEntry::new(a.id.clone(), dec("500")),
        RosterEntry::new(a.id.clone(), dec("600")),
    ];
    assert!(matches!(
        RosterLogic::set_roster(&mut pool, &week.id, &dup),
        Err(AppError::Validation { .. })
    ));

    let foreign = [RosterEntry::new(stranger.id.clone(), dec("500"))];
    assert!(matches!(
        RosterLogic::set_roster(&mut pool, &week.id, &foreign),
        Err(AppError::Validation { .. })
    ));

    let negative = [RosterEntry::new(a.id.clone(), dec("-1"))];
    assert!(matches!(
        RosterLogic::set_roster(&mut pool, &week.id, &negative),
        Err(AppError::Validation { .. })
    ));

    assert!(load_assignments(&pool.conn, &week.id).unwrap().is_empty());
}

#[test]
fn locked_week_refuses_roster_changes() {
    let mut pool = open_db("roster_locked");
    let site = add_site(&mut pool);
    let a = add_labour(&mut pool, &site, "Arjun", "0");
    let week = add_week(&mut pool, &site, first_saturday());
    WeekLogic::set_locked(&mut pool, &week.id, true).unwrap();

    let err = RosterLogic::assign(&mut pool, &week.id, &a.id, dec("500")).unwrap_err();
    assert!(matches!(err, AppError::NotEditable(_)));
}

#[test]
fn assign_and_unassign_one_by_one() {
    let mut pool = open_db("roster_single");
    let site = add_site(&mut pool);
    let a = add_labour(&mut pool, &site, "Arjun", "0");
    let week = add_week(&mut pool, &site, d(2025, 3, 8));

    RosterLogic::assign(&mut pool, &week.id, &a.id, dec("500")).unwrap();
    assert!(matches!(
        RosterLogic::assign(&mut pool, &week.id, &a.id, dec("500")),
        Err(AppError::Validation { .. })
    ));
    assert_eq!(
        count_attendance_by_labour(&pool.conn, &week.id).unwrap(),
        vec![(a.id.clone(), 7)]
    );

    RosterLogic::unassign(&mut pool, &week.id, &a.id).unwrap();
    assert!(count_attendance_by_labour(&pool.conn, &week.id).unwrap().is_empty());
    assert!(matches!(
        RosterLogic::unassign(&mut pool, &week.id, &a.id),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
fn wage_edits_beyond_the_column_width_are_rejected() {
    let mut pool = open_db("roster_wage_bounds");
    let site = add_site(&mut pool);
    let a = add_labour(&mut pool, &site, "Arjun", "0");
    let week = add_week(&mut pool, &site, first_saturday());
    roster(&mut pool, &week.id, &[(&a.id, "500")]);
    let assignment = load_assignments(&pool.conn, &week.id).unwrap()[0].id.clone();

    let err = RosterLogic::update_wage(&mut pool, &assignment, dec("10000000000000000000000000"))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    let err = RosterLogic::update_wage(&mut pool, &assignment, dec("100000000")).unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let kept = RosterLogic::update_wage(&mut pool, &assignment, dec("99999999.99")).unwrap();
    assert_eq!(kept.weekly_daily_wage, dec("99999999.99"));
}
