use crate::db::db_utils::new_id;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::get_labour;
use crate::db::rate_work::{
    delete_payment, delete_rate_work, get_rate_work, insert_payment, insert_rate_work,
    load_payments, load_rate_works, update_rate_work,
};
use crate::errors::{AppError, AppResult};
use crate::models::rate_work::{Payment, PaymentKind, RateWork, RateWorkFields, RateWorkSummary};
use crate::utils::money::{MAX_BALANCE, check_amount};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::Connection;

/// Piecework jobs billed by quantity, and the money paid against them.
pub struct RateWorkLogic;

fn non_empty(field: &str, v: &str) -> AppResult<String> {
    let v = v.trim();
    if v.is_empty() {
        return Err(AppError::validation(field, "must not be empty"));
    }
    Ok(v.to_string())
}

fn apply_fields(w: &mut RateWork, f: RateWorkFields) -> AppResult<()> {
    if let Some(name) = f.name {
        w.name = non_empty("name", &name)?;
    }
    if let Some(unit) = f.unit {
        w.unit = non_empty("unit", &unit)?;
    }
    if let Some(q) = f.quantity {
        w.quantity = check_amount("quantity", q, MAX_BALANCE)?;
    }
    if let Some(c) = f.cost_per_unit {
        w.cost_per_unit = check_amount("cost_per_unit", c, MAX_BALANCE)?;
    }
    if let Some(done) = f.is_completed {
        w.is_completed = done;
    }
    Ok(())
}

/// Totals over a labourer's jobs and payments.
pub fn summarize(labour_id: &str, works: Vec<RateWork>, payments: Vec<Payment>) -> RateWorkSummary {
    let total_cost: Decimal = works.iter().map(RateWork::total_cost).sum();
    let paid: Decimal = payments.iter().map(|p| p.amount).sum();
    RateWorkSummary {
        labour_id: labour_id.to_string(),
        works,
        payments,
        total_cost,
        paid,
        outstanding: total_cost - paid,
    }
}

impl RateWorkLogic {
    pub fn create(
        pool: &mut DbPool,
        labour_id: &str,
        fields: RateWorkFields,
        today: NaiveDate,
    ) -> AppResult<RateWork> {
        let name = fields
            .name
            .as_deref()
            .ok_or_else(|| AppError::validation("name", "rate work name is required"))?;
        let unit = fields
            .unit
            .as_deref()
            .ok_or_else(|| AppError::validation("unit", "unit is required"))?;

        let mut work = RateWork {
            id: new_id(),
            labour_id: labour_id.to_string(),
            name: non_empty("name", name)?,
            quantity: Decimal::ZERO,
            unit: non_empty("unit", unit)?,
            cost_per_unit: Decimal::ZERO,
            is_completed: false,
            date_created: today,
        };
        apply_fields(&mut work, fields)?;

        let tx = pool.write_tx()?;
        get_labour(&tx, labour_id)?;
        insert_rate_work(&tx, &work)?;
        audit(
            &tx,
            "rate_work_add",
            &work.id,
            &format!("{}: {} {} @ {}", work.name, work.quantity, work.unit, work.cost_per_unit),
        )?;
        tx.commit()?;

        tracing::info!(rate_work = %work.id, labour = %labour_id, "rate work created");
        Ok(work)
    }

    pub fn list(conn: &Connection, labour_id: &str) -> AppResult<Vec<RateWork>> {
        get_labour(conn, labour_id)?;
        load_rate_works(conn, labour_id)
    }

    pub fn show(conn: &Connection, id: &str) -> AppResult<RateWork> {
        get_rate_work(conn, id)
    }

    /// Jobs, payments and outstanding amount of one labourer.
    pub fn summary(conn: &Connection, labour_id: &str) -> AppResult<RateWorkSummary> {
        let works = Self::list(conn, labour_id)?;
        let payments = load_payments(conn, PaymentKind::RateWork, labour_id)?;
        Ok(summarize(labour_id, works, payments))
    }

    pub fn update(pool: &mut DbPool, id: &str, fields: RateWorkFields) -> AppResult<RateWork> {
        let tx = pool.write_tx()?;
        let mut work = get_rate_work(&tx, id)?;
        apply_fields(&mut work, fields)?;
        update_rate_work(&tx, &work)?;
        audit(&tx, "rate_work_edit", id, &work.name)?;
        tx.commit()?;

        tracing::info!(rate_work = %id, "rate work updated");
        Ok(work)
    }

    pub fn complete(pool: &mut DbPool, id: &str) -> AppResult<RateWork> {
        Self::update(
            pool,
            id,
            RateWorkFields {
                is_completed: Some(true),
                ..Default::default()
            },
        )
    }

    pub fn delete(pool: &mut DbPool, id: &str) -> AppResult<()> {
        let tx = pool.write_tx()?;
        let work = get_rate_work(&tx, id)?;
        delete_rate_work(&tx, id)?;
        audit(&tx, "rate_work_del", id, &work.name)?;
        tx.commit()?;

        tracing::info!(rate_work = %id, "rate work deleted");
        Ok(())
    }

    pub fn pay(
        pool: &mut DbPool,
        labour_id: &str,
        amount: Decimal,
        note: &str,
        today: NaiveDate,
    ) -> AppResult<Payment> {
        let amount = check_amount("amount", amount, MAX_BALANCE)?;

        let payment = Payment {
            id: new_id(),
            kind: PaymentKind::RateWork,
            labour_id: labour_id.to_string(),
            amount,
            note: note.trim().to_string(),
            date_created: today,
        };

        let tx = pool.write_tx()?;
        get_labour(&tx, labour_id)?;
        insert_payment(&tx, &payment)?;
        audit(
            &tx,
            "rate_pay",
            labour_id,
            &format!("{} {}", payment.amount, payment.note),
        )?;
        tx.commit()?;

        tracing::info!(labour = %labour_id, amount = %payment.amount, "rate work payment");
        Ok(payment)
    }

    pub fn payments(conn: &Connection, labour_id: &str) -> AppResult<Vec<Payment>> {
        get_labour(conn, labour_id)?;
        load_payments(conn, PaymentKind::RateWork, labour_id)
    }

    pub fn delete_payment(pool: &mut DbPool, labour_id: &str, payment_id: &str) -> AppResult<()> {
        let tx = pool.write_tx()?;
        delete_payment(&tx, labour_id, payment_id)?;
        audit(&tx, "rate_pay_del", labour_id, payment_id)?;
        tx.commit()?;

        tracing::info!(labour = %labour_id, payment = %payment_id, "rate work payment removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(q: &str, c: &str) -> RateWork {
        RateWork {
            id: "w".into(),
            labour_id: "l".into(),
            name: "Tiling".into(),
            quantity: q.parse().unwrap(),
            unit: "sqft".into(),
            cost_per_unit: c.parse().unwrap(),
            is_completed: false,
            date_created: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        }
    }

    fn payment(amount: &str) -> Payment {
        Payment {
            id: "p".into(),
            kind: PaymentKind::RateWork,
            labour_id: "l".into(),
            amount: amount.parse().unwrap(),
            note: String::new(),
            date_created: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        }
    }

    #[test]
    fn summary_totals() {
        let s = summarize(
            "l",
            vec![work("120.5", "12.25"), work("10", "100")],
            vec![payment("500"), payment("250.75")],
        );
        // 120.5 × 12.25 = 1476.125 → 1476.12 (banker's)
        assert_eq!(s.total_cost, "2476.12".parse::<Decimal>().unwrap());
        assert_eq!(s.paid, "750.75".parse::<Decimal>().unwrap());
        assert_eq!(s.outstanding, "1725.37".parse::<Decimal>().unwrap());
    }

    #[test]
    fn update_rejects_negative_quantity() {
        let mut w = work("1", "1");
        let err = apply_fields(
            &mut w,
            RateWorkFields {
                quantity: Some(Decimal::from(-3)),
                ..Default::default()
            },
        );
        assert!(matches!(err, Err(AppError::Validation { .. })));
    }
}
