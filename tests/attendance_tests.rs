use sitebook::core::attendance::AttendanceLogic;
use sitebook::core::detail::DetailLogic;
use sitebook::core::week::WeekLogic;
use sitebook::db::attendance::load_attendance_for_entry;
use sitebook::db::pool::DbPool;
use sitebook::db::weeks::{get_entry, load_entries};
use sitebook::errors::AppError;
use sitebook::models::attendance::AttendanceInput;
use sitebook::models::labour::Labour;
use sitebook::models::week::{DailyEntry, Week};

mod common;
use common::{add_labour, add_site, add_week, d, dec, first_saturday, open_db, roster};

struct Fixture {
    pool: DbPool,
    week: Week,
    a: Labour,
    b: Labour,
    days: Vec<DailyEntry>,
}

fn fixture(name: &str) -> Fixture {
    let mut pool = open_db(name);
    let site = add_site(&mut pool);
    let a = add_labour(&mut pool, &site, "Arjun", "0");
    let b = add_labour(&mut pool, &site, "Bhavna", "0");
    let week = add_week(&mut pool, &site, first_saturday());
    roster(&mut pool, &week.id, &[(&a.id, "500"), (&b.id, "500")]);
    let days = load_entries(&pool.conn, &week.id).unwrap();
    Fixture {
        pool,
        week,
        a,
        b,
        days,
    }
}

#[test]
fn same_day_submit_saves_and_closes_the_day() {
    let mut f = fixture("att_same_day");
    let monday = f.days[2].clone();
    assert_eq!(monday.date, d(2025, 3, 3));

    let saved = AttendanceLogic::submit(
        &mut f.pool,
        &monday.id,
        &[
            AttendanceInput::present(f.a.id.clone()).with_advance(dec("200")),
            AttendanceInput::absent(f.b.id.clone()),
        ],
        false,
        monday.date,
    )
    .unwrap();
    assert!(saved.is_saved);
    assert!(!saved.admin_unlocked);

    let rows = load_attendance_for_entry(&f.pool.conn, &monday.id).unwrap();
    assert_eq!(rows.len(), 2);
    let arjun = rows.iter().find(|r| r.labour_id == f.a.id).unwrap();
    assert!(arjun.is_present);
    assert_eq!(arjun.advance_taken, dec("200"));

    let again = AttendanceLogic::submit(
        &mut f.pool,
        &monday.id,
        &[AttendanceInput::absent(f.a.id.clone())],
        false,
        monday.date,
    );
    assert!(matches!(again, Err(AppError::NotEditable(_))));
}

#[test]
fn other_days_are_closed_without_admin() {
    let mut f = fixture("att_other_day");
    let monday = f.days[2].clone();

    let err = AttendanceLogic::submit(
        &mut f.pool,
        &monday.id,
        &[AttendanceInput::present(f.a.id.clone())],
        false,
        d(2025, 3, 4),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotEditable(_)));

    // nothing was written
    let rows = load_attendance_for_entry(&f.pool.conn, &monday.id).unwrap();
    assert!(rows.iter().all(|r| !r.is_present));
}

#[test]
fn admin_unlock_reopens_until_next_ordinary_save() {
    let mut f = fixture("att_admin");
    let sunday = f.days[1].clone();
    let later = d(2025, 3, 6);

    let opened = AttendanceLogic::submit(
        &mut f.pool,
        &sunday.id,
        &[AttendanceInput::present(f.a.id.clone())],
        true,
        later,
    )
    .unwrap();
    assert!(opened.admin_unlocked);
    assert!(!opened.is_saved);

    let day = DetailLogic::day_detail(&f.pool.conn, &sunday.id, later).unwrap();
    assert!(day.is_editable);

    let closed = AttendanceLogic::submit(
        &mut f.pool,
        &sunday.id,
        &[AttendanceInput::present(f.a.id.clone()).with_multiplier(dec("0.5"))],
        false,
        later,
    )
    .unwrap();
    assert!(closed.is_saved);
    assert!(!closed.admin_unlocked);

    let day = DetailLogic::day_detail(&f.pool.conn, &sunday.id, later).unwrap();
    assert!(!day.is_editable);
    let arjun = day.attendance.iter().find(|r| r.labour_id == f.a.id).unwrap();
    assert_eq!(arjun.multiplier, dec("0.5"));
}

#[test]
fn empty_submit_only_changes_state() {
    let mut f = fixture("att_empty");
    let saturday = f.days[0].clone();

    AttendanceLogic::submit(
        &mut f.pool,
        &saturday.id,
        &[AttendanceInput::present(f.a.id.clone())],
        true,
        d(2025, 3, 2),
    )
    .unwrap();
    AttendanceLogic::submit(&mut f.pool, &saturday.id, &[], false, d(2025, 3, 2)).unwrap();

    let entry = get_entry(&f.pool.conn, &saturday.id).unwrap();
    assert!(entry.is_saved);
    let rows = load_attendance_for_entry(&f.pool.conn, &saturday.id).unwrap();
    let arjun = rows.iter().find(|r| r.labour_id == f.a.id).unwrap();
    assert!(arjun.is_present);
}

#[test]
fn missing_labourers_fall_back_to_defaults() {
    let mut f = fixture("att_partial");
    let saturday = f.days[0].clone();

    AttendanceLogic::submit(
        &mut f.pool,
        &saturday.id,
        &[AttendanceInput::present(f.a.id.clone())],
        false,
        saturday.date,
    )
    .unwrap();

    let rows = load_attendance_for_entry(&f.pool.conn, &saturday.id).unwrap();
    assert_eq!(rows.len(), 2);
    let bhavna = rows.iter().find(|r| r.labour_id == f.b.id).unwrap();
    assert!(!bhavna.is_present);
    assert!(bhavna.advance_taken.is_zero());
}

#[test]
fn locked_week_refuses_ordinary_submit() {
    let mut f = fixture("att_locked");
    let saturday = f.days[0].clone();
    WeekLogic::set_locked(&mut f.pool, &f.week.id, true).unwrap();

    let err = AttendanceLogic::submit(
        &mut f.pool,
        &saturday.id,
        &[AttendanceInput::present(f.a.id.clone())],
        false,
        saturday.date,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotEditable(_)));

    assert!(
        AttendanceLogic::submit(
            &mut f.pool,
            &saturday.id,
            &[AttendanceInput::present(f.a.id.clone())],
            true,
            saturday.date,
        )
        .is_ok()
    );

    // the day itself is reopened, the week lock is reported on its own
    let day = DetailLogic::day_detail(&f.pool.conn, &saturday.id, saturday.date).unwrap();
    assert!(day.is_editable);
    assert!(day.week_locked);

    let err = AttendanceLogic::submit(
        &mut f.pool,
        &saturday.id,
        &[AttendanceInput::absent(f.a.id.clone())],
        false,
        saturday.date,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotEditable(_)));

    WeekLogic::set_locked(&mut f.pool, &f.week.id, false).unwrap();
    let day = DetailLogic::day_detail(&f.pool.conn, &saturday.id, saturday.date).unwrap();
    assert!(!day.week_locked);
}

#[test]
fn stranger_rows_are_rejected() {
    let mut f = fixture("att_stranger");
    let saturday = f.days[0].clone();

    let err = AttendanceLogic::submit(
        &mut f.pool,
        &saturday.id,
        &[AttendanceInput::present("not-on-roster")],
        false,
        saturday.date,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let entry = get_entry(&f.pool.conn, &saturday.id).unwrap();
    assert!(!entry.is_saved);
}

#[test]
fn unknown_entry_is_not_found() {
    let mut f = fixture("att_unknown");
    let err = AttendanceLogic::submit(&mut f.pool, "nope", &[], false, first_saturday()).unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}
