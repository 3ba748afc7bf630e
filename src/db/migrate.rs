use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step, applied at most once and recorded in the `log` table.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_payroll_schema",
        description: "Created sites, labours, weeks, days, roster, attendance and payouts",
        sql: r#"
        CREATE TABLE IF NOT EXISTS sites (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            address     TEXT NOT NULL DEFAULT '',
            is_active   INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS labours (
            id                   TEXT PRIMARY KEY,
            site_id              TEXT NOT NULL REFERENCES sites(id) ON DELETE CASCADE,
            name                 TEXT NOT NULL,
            previous_balance     TEXT NOT NULL DEFAULT '0',
            type                 TEXT NOT NULL CHECK(type IN ('daily','rate')),
            gender               TEXT NOT NULL CHECK(gender IN ('M','F')),
            pan_number           TEXT NOT NULL DEFAULT '',
            aadhar_number        TEXT NOT NULL DEFAULT '',
            bank_account_number  TEXT NOT NULL DEFAULT '',
            ifsc_code            TEXT NOT NULL DEFAULT '',
            branch_name          TEXT NOT NULL DEFAULT '',
            photo                TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_labours_site ON labours(site_id);

        CREATE TABLE IF NOT EXISTS weeks (
            id              TEXT PRIMARY KEY,
            site_id         TEXT NOT NULL REFERENCES sites(id) ON DELETE CASCADE,
            start_date      TEXT NOT NULL,
            admin_unlocked  INTEGER NOT NULL DEFAULT 1,
            UNIQUE(site_id, start_date)
        );

        CREATE TABLE IF NOT EXISTS daily_entries (
            id              TEXT PRIMARY KEY,
            week_id         TEXT NOT NULL REFERENCES weeks(id) ON DELETE CASCADE,
            date            TEXT NOT NULL,
            admin_unlocked  INTEGER NOT NULL DEFAULT 0,
            is_saved        INTEGER NOT NULL DEFAULT 0,
            UNIQUE(week_id, date)
        );
        CREATE INDEX IF NOT EXISTS idx_daily_entries_date ON daily_entries(date);

        CREATE TABLE IF NOT EXISTS week_labour_assignments (
            id                 TEXT PRIMARY KEY,
            week_id            TEXT NOT NULL REFERENCES weeks(id) ON DELETE CASCADE,
            labour_id          TEXT NOT NULL REFERENCES labours(id) ON DELETE CASCADE,
            weekly_daily_wage  TEXT NOT NULL,
            UNIQUE(week_id, labour_id)
        );
        CREATE INDEX IF NOT EXISTS idx_assignments_labour ON week_labour_assignments(labour_id);

        CREATE TABLE IF NOT EXISTS labour_payments (
            id             TEXT PRIMARY KEY,
            assignment_id  TEXT NOT NULL UNIQUE
                           REFERENCES week_labour_assignments(id) ON DELETE CASCADE,
            amount_paid    TEXT NOT NULL DEFAULT '0',
            payment_type   TEXT NOT NULL DEFAULT 'bank' CHECK(payment_type IN ('bank','cash'))
        );

        CREATE TABLE IF NOT EXISTS labour_attendance (
            id              TEXT PRIMARY KEY,
            daily_entry_id  TEXT NOT NULL REFERENCES daily_entries(id) ON DELETE CASCADE,
            labour_id       TEXT NOT NULL REFERENCES labours(id) ON DELETE CASCADE,
            is_present      INTEGER NOT NULL DEFAULT 0,
            advance_taken   TEXT NOT NULL DEFAULT '0',
            payment_type    TEXT NOT NULL DEFAULT 'bank' CHECK(payment_type IN ('bank','cash')),
            multiplier      TEXT NOT NULL DEFAULT '1',
            UNIQUE(daily_entry_id, labour_id)
        );
        CREATE INDEX IF NOT EXISTS idx_attendance_labour ON labour_attendance(labour_id);
        "#,
    },
    Migration {
        version: "20250412_0002_rate_work",
        description: "Added rate work and the shared payments table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS rate_works (
            id             TEXT PRIMARY KEY,
            labour_id      TEXT NOT NULL REFERENCES labours(id) ON DELETE CASCADE,
            name           TEXT NOT NULL,
            quantity       TEXT NOT NULL DEFAULT '0',
            unit           TEXT NOT NULL DEFAULT '',
            cost_per_unit  TEXT NOT NULL DEFAULT '0',
            is_completed   INTEGER NOT NULL DEFAULT 0,
            date_created   TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_rate_works_labour ON rate_works(labour_id);

        CREATE TABLE IF NOT EXISTS payments (
            id            TEXT PRIMARY KEY,
            kind          TEXT NOT NULL CHECK(kind IN ('rate_work')),
            labour_id     TEXT NOT NULL REFERENCES labours(id) ON DELETE CASCADE,
            amount        TEXT NOT NULL,
            note          TEXT NOT NULL DEFAULT '',
            date_created  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_payments_kind_labour ON payments(kind, labour_id);
        "#,
    },
];

/// Ensure that the `log` table exists. It doubles as the migration ledger.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        rusqlite::params![chrono::Local::now().to_rfc3339(), m.version, m.description],
    )?;
    tx.commit()?;

    tracing::info!(version = m.version, "migration applied");
    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions not yet recorded in the `log` table.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, oldest first.
///
/// Invoked by db::init_db() and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
    }

    Ok(())
}
