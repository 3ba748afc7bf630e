//! Weekly balance aggregation.
//!
//! Every figure is built from three fetched fact sets (past attendance,
//! past payouts, this week's attendance) folded per labourer in one pass
//! each. A past day is always priced at the wage of the assignment that
//! links the labourer to *that day's* week, never the wage of the week
//! being viewed.

use crate::db::attendance::{
    load_assignments, load_history_facts, load_history_payments, load_payments_for_week,
    load_week_facts,
};
use crate::db::queries::get_labour;
use crate::errors::AppResult;
use crate::models::assignment::WeekLabourAssignment;
use crate::models::labour::Labour;
use crate::models::ledger::{AttendanceFact, PaymentFact};
use crate::models::week::Week;
use crate::models::week_detail::LabourBalance;
use crate::utils::money::round_money;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Copy)]
struct History {
    earned: Decimal,
    advance: Decimal,
    paid: Decimal,
}

#[derive(Debug, Default, Clone, Copy)]
struct Current {
    days: Decimal,
    advance: Decimal,
}

/// Inputs of one aggregation pass, already fetched.
pub struct LedgerFacts<'a> {
    pub roster: &'a [(WeekLabourAssignment, Labour)],
    pub history: &'a [AttendanceFact],
    pub history_payments: &'a [PaymentFact],
    pub current: &'a [AttendanceFact],
    /// assignment id → amount paid for this week
    pub payouts: &'a HashMap<String, Decimal>,
}

/// Compute the ledger figures of every roster entry of `week`.
///
/// Rows outside the relevant window are ignored, so callers may pass a
/// superset of facts. Sums over no rows are zero.
pub fn aggregate(week: &Week, facts: &LedgerFacts<'_>) -> Vec<LabourBalance> {
    let mut history: HashMap<&str, History> = HashMap::new();
    for f in facts.history.iter().filter(|f| f.date < week.start_date) {
        let h = history.entry(f.labour_id.as_str()).or_default();
        if f.is_present {
            h.earned += f.wage.unwrap_or(Decimal::ZERO) * f.multiplier;
        }
        h.advance += f.advance_taken;
    }

    for p in facts
        .history_payments
        .iter()
        .filter(|p| p.week_start < week.start_date)
    {
        history.entry(p.labour_id.as_str()).or_default().paid += p.amount;
    }

    let mut current: HashMap<&str, Current> = HashMap::new();
    for f in facts.current.iter().filter(|f| f.week_id == week.id) {
        let c = current.entry(f.labour_id.as_str()).or_default();
        if f.is_present {
            c.days += f.multiplier;
        }
        c.advance += f.advance_taken;
    }

    facts
        .roster
        .iter()
        .map(|(assignment, labour)| {
            let h = history
                .get(labour.id.as_str())
                .copied()
                .unwrap_or_default();
            let c = current
                .get(labour.id.as_str())
                .copied()
                .unwrap_or_default();
            let amount_paid = facts
                .payouts
                .get(&assignment.id)
                .copied()
                .unwrap_or(Decimal::ZERO);

            let opening_balance = labour.previous_balance + h.earned - h.advance - h.paid;
            let current_earned = c.days * assignment.weekly_daily_wage;
            let current_week_net = current_earned - c.advance;
            let total_due_to_date = opening_balance + current_week_net;

            LabourBalance {
                assignment_id: assignment.id.clone(),
                labour_id: labour.id.clone(),
                name: labour.name.clone(),
                kind: labour.kind,
                gender: labour.gender,
                weekly_daily_wage: assignment.weekly_daily_wage,
                previous_balance: labour.previous_balance,
                historical_earned: round_money(h.earned),
                historical_advance: round_money(h.advance),
                historical_paid: round_money(h.paid),
                opening_balance: round_money(opening_balance),
                days_present: c.days,
                current_earned: round_money(current_earned),
                current_advance: round_money(c.advance),
                current_week_net: round_money(current_week_net),
                total_due_to_date: round_money(total_due_to_date),
                amount_paid: round_money(amount_paid),
                balance_after_payment: round_money(total_due_to_date - amount_paid),
            }
        })
        .collect()
}

pub struct LedgerLogic;

impl LedgerLogic {
    /// Fetch the facts for `week` and aggregate them.
    pub fn week_balances(conn: &Connection, week: &Week) -> AppResult<Vec<LabourBalance>> {
        let assignments = load_assignments(conn, &week.id)?;

        let mut roster = Vec::with_capacity(assignments.len());
        for a in assignments {
            let labour = get_labour(conn, &a.labour_id)?;
            roster.push((a, labour));
        }

        let labour_ids: Vec<String> = roster.iter().map(|(a, _)| a.labour_id.clone()).collect();

        let history = load_history_facts(conn, &labour_ids, &week.start_date)?;
        let history_payments = load_history_payments(conn, &labour_ids, &week.start_date)?;
        let current = load_week_facts(conn, &week.id)?;
        let payouts: HashMap<String, Decimal> = load_payments_for_week(conn, &week.id)?
            .into_iter()
            .map(|p| (p.assignment_id, p.amount_paid))
            .collect();

        tracing::debug!(
            week = %week.id,
            roster = roster.len(),
            history_rows = history.len(),
            history_payments = history_payments.len(),
            current_rows = current.len(),
            "aggregating week ledger"
        );

        Ok(aggregate(
            week,
            &LedgerFacts {
                roster: &roster,
                history: &history,
                history_payments: &history_payments,
                current: &current,
                payouts: &payouts,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::labour::{Gender, LabourType};
    use chrono::{Duration, NaiveDate};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn labour(id: &str, previous_balance: &str) -> Labour {
        Labour {
            id: id.into(),
            site_id: "site".into(),
            name: id.to_uppercase(),
            previous_balance: dec(previous_balance),
            kind: LabourType::DailyWork,
            gender: Gender::Male,
            pan_number: String::new(),
            aadhar_number: String::new(),
            bank_account_number: String::new(),
            ifsc_code: String::new(),
            branch_name: String::new(),
            photo: String::new(),
        }
    }

    fn week(id: &str, start: NaiveDate) -> Week {
        Week {
            id: id.into(),
            site_id: "site".into(),
            start_date: start,
            admin_unlocked: true,
        }
    }

    fn assignment(id: &str, week_id: &str, labour_id: &str, wage: &str) -> WeekLabourAssignment {
        WeekLabourAssignment {
            id: id.into(),
            week_id: week_id.into(),
            labour_id: labour_id.into(),
            weekly_daily_wage: dec(wage),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fact(
        labour_id: &str,
        week_id: &str,
        date: NaiveDate,
        present: bool,
        advance: &str,
        multiplier: &str,
        wage: Option<&str>,
    ) -> AttendanceFact {
        AttendanceFact {
            labour_id: labour_id.into(),
            week_id: week_id.into(),
            date,
            is_present: present,
            advance_taken: dec(advance),
            multiplier: dec(multiplier),
            wage: wage.map(dec),
        }
    }

    fn sat() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    /// W1 @500: present 3 days, 200 advanced.
    fn w1_facts() -> Vec<AttendanceFact> {
        let w1 = sat();
        (0..7)
            .map(|i| {
                let d = w1 + Duration::days(i);
                let present = (2..5).contains(&i);
                let advance = if i == 3 { "200" } else { "0" };
                fact("l1", "w1", d, present, advance, "1", Some("500"))
            })
            .collect()
    }

    #[test]
    fn first_week_has_no_history() {
        let w1 = week("w1", sat());
        let roster = vec![(assignment("a1", "w1", "l1", "500"), labour("l1", "1000"))];
        let current = w1_facts();
        let payouts = HashMap::new();

        let out = aggregate(
            &w1,
            &LedgerFacts {
                roster: &roster,
                history: &[],
                history_payments: &[],
                current: &current,
                payouts: &payouts,
            },
        );

        let b = &out[0];
        assert_eq!(b.opening_balance, dec("1000"));
        assert_eq!(b.current_earned, dec("1500"));
        assert_eq!(b.current_advance, dec("200"));
        assert_eq!(b.current_week_net, dec("1300"));
        assert_eq!(b.total_due_to_date, dec("2300"));
    }

    #[test]
    fn second_week_carries_first_week_at_its_own_wage() {
        let w2_start = sat() + Duration::days(7);
        let w2 = week("w2", w2_start);
        let roster = vec![(assignment("a2", "w2", "l1", "600"), labour("l1", "1000"))];
        let history = w1_facts();
        let current = vec![fact("l1", "w2", w2_start, true, "0", "0.5", Some("600"))];
        let payouts = HashMap::new();

        let out = aggregate(
            &w2,
            &LedgerFacts {
                roster: &roster,
                history: &history,
                history_payments: &[],
                current: &current,
                payouts: &payouts,
            },
        );

        let b = &out[0];
        assert_eq!(b.historical_earned, dec("1500"));
        assert_eq!(b.historical_advance, dec("200"));
        assert_eq!(b.historical_paid, dec("0"));
        assert_eq!(b.opening_balance, dec("2300"));
        assert_eq!(b.current_earned, dec("300"));
        assert_eq!(b.total_due_to_date, dec("2600"));
    }

    #[test]
    fn past_payouts_reduce_opening_balance() {
        let w2_start = sat() + Duration::days(7);
        let w2 = week("w2", w2_start);
        let roster = vec![(assignment("a2", "w2", "l1", "600"), labour("l1", "1000"))];
        let history = w1_facts();
        let payments = vec![
            PaymentFact {
                labour_id: "l1".into(),
                week_start: sat(),
                amount: dec("800"),
            },
            // same-week payout is not history
            PaymentFact {
                labour_id: "l1".into(),
                week_start: w2_start,
                amount: dec("999"),
            },
        ];
        let payouts = HashMap::from([("a2".to_string(), dec("100"))]);

        let out = aggregate(
            &w2,
            &LedgerFacts {
                roster: &roster,
                history: &history,
                history_payments: &payments,
                current: &[],
                payouts: &payouts,
            },
        );

        let b = &out[0];
        assert_eq!(b.historical_paid, dec("800"));
        assert_eq!(b.opening_balance, dec("1500"));
        assert_eq!(b.total_due_to_date, dec("1500"));
        assert_eq!(b.amount_paid, dec("100"));
        assert_eq!(b.balance_after_payment, dec("1400"));
    }

    #[test]
    fn no_rows_means_previous_balance() {
        let w = week("w1", sat());
        let roster = vec![(assignment("a1", "w1", "l1", "450"), labour("l1", "123.45"))];
        let payouts = HashMap::new();

        let out = aggregate(
            &w,
            &LedgerFacts {
                roster: &roster,
                history: &[],
                history_payments: &[],
                current: &[],
                payouts: &payouts,
            },
        );

        assert_eq!(out[0].opening_balance, dec("123.45"));
        assert_eq!(out[0].total_due_to_date, dec("123.45"));
        assert_eq!(out[0].days_present, Decimal::ZERO);
    }

    #[test]
    fn advances_can_push_balance_negative() {
        let w = week("w1", sat());
        let roster = vec![(assignment("a1", "w1", "l1", "400"), labour("l1", "0"))];
        let current = vec![
            fact("l1", "w1", sat(), true, "700", "1", Some("400")),
            fact("l1", "w1", sat() + Duration::days(1), false, "150.50", "1", Some("400")),
        ];
        let payouts = HashMap::new();

        let out = aggregate(
            &w,
            &LedgerFacts {
                roster: &roster,
                history: &[],
                history_payments: &[],
                current: &current,
                payouts: &payouts,
            },
        );

        assert_eq!(out[0].current_week_net, dec("-450.50"));
        assert_eq!(out[0].total_due_to_date, dec("-450.50"));
    }

    #[test]
    fn past_day_without_assignment_earns_nothing_but_advance_counts() {
        let w2_start = sat() + Duration::days(7);
        let w2 = week("w2", w2_start);
        let roster = vec![(assignment("a2", "w2", "l1", "600"), labour("l1", "0"))];
        let history = vec![fact("l1", "w1", sat(), true, "50", "1", None)];
        let payouts = HashMap::new();

        let out = aggregate(
            &w2,
            &LedgerFacts {
                roster: &roster,
                history: &history,
                history_payments: &[],
                current: &[],
                payouts: &payouts,
            },
        );

        assert_eq!(out[0].historical_earned, Decimal::ZERO);
        assert_eq!(out[0].historical_advance, dec("50"));
        assert_eq!(out[0].opening_balance, dec("-50"));
    }

    #[test]
    fn labourers_are_kept_apart() {
        let w = week("w1", sat());
        let roster = vec![
            (assignment("a1", "w1", "l1", "500"), labour("l1", "0")),
            (assignment("a2", "w1", "l2", "700"), labour("l2", "10")),
        ];
        let current = vec![
            fact("l1", "w1", sat(), true, "0", "1", Some("500")),
            fact("l2", "w1", sat(), true, "0", "1.5", Some("700")),
            fact("l2", "w1", sat() + Duration::days(1), false, "20", "1", Some("700")),
        ];
        let payouts = HashMap::new();

        let out = aggregate(
            &w,
            &LedgerFacts {
                roster: &roster,
                history: &[],
                history_payments: &[],
                current: &current,
                payouts: &payouts,
            },
        );

        assert_eq!(out[0].current_earned, dec("500"));
        assert_eq!(out[1].current_earned, dec("1050"));
        assert_eq!(out[1].total_due_to_date, dec("1040"));
    }
}
