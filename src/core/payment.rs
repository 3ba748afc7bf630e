use crate::db::attendance::{delete_payment, get_assignment, load_payments_for_week, upsert_payment};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::weeks::get_week;
use crate::errors::{AppError, AppResult};
use crate::models::assignment::LabourPayment;
use crate::models::payment_type::PaymentType;
use crate::utils::money::{MAX_AMOUNT, check_amount};
use rust_decimal::Decimal;
use rusqlite::Connection;

/// Weekly payouts: at most one per assignment.
pub struct PaymentLogic;

impl PaymentLogic {
    /// Record (or replace) the payout of an assignment.
    pub fn record(
        pool: &mut DbPool,
        assignment_id: &str,
        amount: Decimal,
        payment_type: PaymentType,
    ) -> AppResult<LabourPayment> {
        let amount = check_amount("amount_paid", amount, MAX_AMOUNT)?;

        let tx = pool.write_tx()?;
        get_assignment(&tx, assignment_id)?;
        let p = upsert_payment(&tx, assignment_id, amount, payment_type)?;
        audit(
            &tx,
            "pay",
            assignment_id,
            &format!("{} ({})", amount, payment_type.label()),
        )?;
        tx.commit()?;

        tracing::info!(assignment = %assignment_id, %amount, "payout recorded");
        Ok(p)
    }

    pub fn clear(pool: &mut DbPool, assignment_id: &str) -> AppResult<()> {
        let tx = pool.write_tx()?;
        if !delete_payment(&tx, assignment_id)? {
            return Err(AppError::not_found("LabourPayment", assignment_id));
        }
        audit(&tx, "pay_del", assignment_id, "")?;
        tx.commit()?;

        tracing::info!(assignment = %assignment_id, "payout removed");
        Ok(())
    }

    pub fn list_for_week(conn: &Connection, week_id: &str) -> AppResult<Vec<LabourPayment>> {
        get_week(conn, week_id)?;
        load_payments_for_week(conn, week_id)
    }
}
