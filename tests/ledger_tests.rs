use sitebook::core::attendance::AttendanceLogic;
use sitebook::core::detail::DetailLogic;
use sitebook::core::labour::LabourLogic;
use sitebook::core::payment::PaymentLogic;
use sitebook::core::rate_work::RateWorkLogic;
use sitebook::core::roster::RosterLogic;
use sitebook::db::attendance::load_assignments;
use sitebook::db::pool::DbPool;
use sitebook::db::weeks::find_entry_by_date;
use sitebook::errors::AppError;
use sitebook::models::assignment::RosterEntry;
use sitebook::models::attendance::AttendanceInput;
use sitebook::models::labour::Labour;
use sitebook::models::payment_type::PaymentType;
use sitebook::models::rate_work::RateWorkFields;
use sitebook::models::week::Week;
use sitebook::models::week_detail::LabourBalance;

mod common;
use common::{add_labour, add_site, add_week, d, dec, first_saturday, open_db, roster};

struct Books {
    pool: DbPool,
    labour: Labour,
    w1: Week,
    w2: Week,
}

fn mark(pool: &mut DbPool, week: &Week, date: chrono::NaiveDate, row: AttendanceInput) {
    let entry = find_entry_by_date(&pool.conn, &week.id, &date)
        .unwrap()
        .expect("day of week");
    AttendanceLogic::submit(pool, &entry.id, &[row], false, date).unwrap();
}

/// Balance 1000; week 1 at 500/day, present Mon-Wed with 200 advance on
/// Tuesday; week 2 at 600/day, half day on its Saturday.
fn books(name: &str) -> Books {
    let mut pool = open_db(name);
    let site = add_site(&mut pool);
    let labour = add_labour(&mut pool, &site, "Arjun", "1000");

    let w1 = add_week(&mut pool, &site, first_saturday());
    roster(&mut pool, &w1.id, &[(&labour.id, "500")]);
    mark(&mut pool, &w1, d(2025, 3, 3), AttendanceInput::present(labour.id.clone()));
    mark(
        &mut pool,
        &w1,
        d(2025, 3, 4),
        AttendanceInput::present(labour.id.clone()).with_advance(dec("200")),
    );
    mark(&mut pool, &w1, d(2025, 3, 5), AttendanceInput::present(labour.id.clone()));

    let w2 = add_week(&mut pool, &site, d(2025, 3, 8));
    roster(&mut pool, &w2.id, &[(&labour.id, "600")]);
    mark(
        &mut pool,
        &w2,
        d(2025, 3, 8),
        AttendanceInput::present(labour.id.clone()).with_multiplier(dec("0.5")),
    );

    Books {
        pool,
        labour,
        w1,
        w2,
    }
}

fn balance(pool: &mut DbPool, week: &Week) -> LabourBalance {
    let detail = DetailLogic::week_detail(pool, &week.id, d(2025, 3, 20)).unwrap();
    assert_eq!(detail.labours.len(), 1);
    detail.labours[0].clone()
}

#[test]
fn first_week_starts_from_previous_balance() {
    let mut b = books("ledger_first_week");
    let w1 = b.w1.clone();
    let bal = balance(&mut b.pool, &w1);

    assert_eq!(bal.opening_balance, dec("1000"));
    assert_eq!(bal.days_present, dec("3"));
    assert_eq!(bal.current_earned, dec("1500"));
    assert_eq!(bal.current_advance, dec("200"));
    assert_eq!(bal.current_week_net, dec("1300"));
    assert_eq!(bal.total_due_to_date, dec("2300"));
    assert_eq!(bal.balance_after_payment, dec("2300"));
}

#[test]
fn past_days_use_their_own_week_wage() {
    let mut b = books("ledger_second_week");
    let w2 = b.w2.clone();
    let bal = balance(&mut b.pool, &w2);

    assert_eq!(bal.labour_id, b.labour.id);
    assert_eq!(bal.weekly_daily_wage, dec("600"));
    assert_eq!(bal.historical_earned, dec("1500"));
    assert_eq!(bal.historical_advance, dec("200"));
    assert_eq!(bal.historical_paid, dec("0"));
    assert_eq!(bal.opening_balance, dec("2300"));
    assert_eq!(bal.current_earned, dec("300"));
    assert_eq!(bal.total_due_to_date, dec("2600"));
}

#[test]
fn payouts_carry_into_later_weeks() {
    let mut b = books("ledger_payouts");
    let a1 = load_assignments(&b.pool.conn, &b.w1.id).unwrap()[0].id.clone();
    PaymentLogic::record(&mut b.pool, &a1, dec("800"), PaymentType::Cash).unwrap();

    let w1 = b.w1.clone();
    let bal1 = balance(&mut b.pool, &w1);
    assert_eq!(bal1.amount_paid, dec("800"));
    assert_eq!(bal1.balance_after_payment, dec("1500"));

    let w2 = b.w2.clone();
    let bal2 = balance(&mut b.pool, &w2);
    assert_eq!(bal2.historical_paid, dec("800"));
    assert_eq!(bal2.opening_balance, dec("1500"));
    assert_eq!(bal2.total_due_to_date, dec("1800"));

    // recording again replaces the payout
    PaymentLogic::record(&mut b.pool, &a1, dec("100"), PaymentType::BankTransfer).unwrap();
    assert_eq!(balance(&mut b.pool, &w2).opening_balance, dec("2200"));

    PaymentLogic::clear(&mut b.pool, &a1).unwrap();
    assert_eq!(balance(&mut b.pool, &w2).opening_balance, dec("2300"));
}

#[test]
fn week_detail_lists_every_day() {
    let mut b = books("ledger_detail_days");
    let detail = DetailLogic::week_detail(&mut b.pool, &b.w2.id, d(2025, 3, 9)).unwrap();

    assert_eq!(detail.days.len(), 7);
    assert_eq!(detail.end_date, d(2025, 3, 14));
    for day in &detail.days {
        assert_eq!(day.attendance.len(), 1);
    }
    // Saturday was saved, Sunday is today and still open
    assert!(!detail.days[0].is_editable);
    assert!(detail.days[1].is_editable);
    assert!(!detail.days[2].is_editable);
}

#[test]
fn deleting_a_labourer_drops_their_books() {
    let mut b = books("ledger_delete_labour");
    LabourLogic::delete(&mut b.pool, &b.labour.id).unwrap();

    let detail = DetailLogic::week_detail(&mut b.pool, &b.w1.id, d(2025, 3, 20)).unwrap();
    assert!(detail.labours.is_empty());
    assert!(detail.days.iter().all(|day| day.attendance.is_empty()));
}

#[test]
fn rate_work_outstanding_amount() {
    let mut b = books("ledger_rate_work");
    let today = d(2025, 3, 10);

    RateWorkLogic::create(
        &mut b.pool,
        &b.labour.id,
        RateWorkFields {
            name: Some("Plastering".into()),
            quantity: Some(dec("120.5")),
            unit: Some("sqft".into()),
            cost_per_unit: Some(dec("12")),
            ..Default::default()
        },
        today,
    )
    .unwrap();
    let tiles = RateWorkLogic::create(
        &mut b.pool,
        &b.labour.id,
        RateWorkFields {
            name: Some("Tiling".into()),
            quantity: Some(dec("10")),
            unit: Some("sqft".into()),
            cost_per_unit: Some(dec("50")),
            ..Default::default()
        },
        today,
    )
    .unwrap();
    RateWorkLogic::pay(&mut b.pool, &b.labour.id, dec("1000"), "first", today).unwrap();

    let s = RateWorkLogic::summary(&b.pool.conn, &b.labour.id).unwrap();
    assert_eq!(s.works.len(), 2);
    assert_eq!(s.total_cost, dec("1946"));
    assert_eq!(s.paid, dec("1000"));
    assert_eq!(s.outstanding, dec("946"));

    let done = RateWorkLogic::complete(&mut b.pool, &tiles.id).unwrap();
    assert!(done.is_completed);

    RateWorkLogic::delete(&mut b.pool, &tiles.id).unwrap();
    let s = RateWorkLogic::summary(&b.pool.conn, &b.labour.id).unwrap();
    assert_eq!(s.outstanding, dec("446"));

    // rate work never touches the weekly ledger
    let w1 = b.w1.clone();
    assert_eq!(balance(&mut b.pool, &w1).total_due_to_date, dec("2300"));
}

#[test]
fn labourer_can_start_in_debt() {
    let mut pool = open_db("ledger_negative_opening");
    let site = add_site(&mut pool);
    let labour = add_labour(&mut pool, &site, "Meena", "-1500");
    assert_eq!(labour.previous_balance, dec("-1500"));

    let week = add_week(&mut pool, &site, first_saturday());
    roster(&mut pool, &week.id, &[(&labour.id, "500")]);
    mark(&mut pool, &week, d(2025, 3, 3), AttendanceInput::present(labour.id.clone()));

    let bal = balance(&mut pool, &week);
    assert_eq!(bal.opening_balance, dec("-1500"));
    assert_eq!(bal.current_earned, dec("500"));
    assert_eq!(bal.total_due_to_date, dec("-1000"));
}

#[test]
fn oversized_inputs_are_refused_before_they_reach_the_ledger() {
    let mut pool = open_db("ledger_bounds");
    let site = add_site(&mut pool);
    let labour = add_labour(&mut pool, &site, "Arjun", "0");
    let week = add_week(&mut pool, &site, first_saturday());

    let huge = [RosterEntry::new(labour.id.clone(), dec("10000000000000000000000000"))];
    assert!(matches!(
        RosterLogic::set_roster(&mut pool, &week.id, &huge),
        Err(AppError::Validation { .. })
    ));

    roster(&mut pool, &week.id, &[(&labour.id, "99999999.99")]);
    let saturday = find_entry_by_date(&pool.conn, &week.id, &first_saturday())
        .unwrap()
        .unwrap();
    let err = AttendanceLogic::submit(
        &mut pool,
        &saturday.id,
        &[AttendanceInput::present(labour.id.clone()).with_multiplier(dec("1000000"))],
        false,
        first_saturday(),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let a = load_assignments(&pool.conn, &week.id).unwrap()[0].id.clone();
    assert!(matches!(
        PaymentLogic::record(&mut pool, &a, dec("100000000"), PaymentType::Cash),
        Err(AppError::Validation { .. })
    ));

    // the largest accepted figures still aggregate
    AttendanceLogic::submit(
        &mut pool,
        &saturday.id,
        &[AttendanceInput::present(labour.id.clone())
            .with_multiplier(dec("10"))
            .with_advance(dec("99999999.99"))],
        false,
        first_saturday(),
    )
    .unwrap();
    let bal = balance(&mut pool, &week);
    assert_eq!(bal.current_earned, dec("999999999.90"));
}
