use crate::export::ExportFormat;
use crate::models::assignment::RosterEntry;
use crate::models::attendance::AttendanceInput;
use crate::models::labour::{Gender, LabourType};
use crate::models::payment_type::PaymentType;
use crate::utils::date::parse_date_arg;
use crate::utils::money::{parse_amount, parse_signed_amount};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

/// Command-line interface for sitebook: construction-site payroll on SQLite
#[derive(Parser)]
#[command(
    name = "sitebook",
    version = env!("CARGO_PKG_VERSION"),
    about = "Construction-site payroll: labourers, weekly attendance, wages and balances",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(global = true, long = "today", hide = true, value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

fn money_arg(s: &str) -> Result<Decimal, String> {
    parse_amount("amount", s).map_err(|e| e.to_string())
}

fn balance_arg(s: &str) -> Result<Decimal, String> {
    parse_signed_amount("balance", s).map_err(|e| e.to_string())
}

fn labour_type_arg(s: &str) -> Result<LabourType, String> {
    LabourType::from_code(s).ok_or_else(|| format!("'{}' is not daily or rate", s))
}

fn gender_arg(s: &str) -> Result<Gender, String> {
    Gender::from_code(s).ok_or_else(|| format!("'{}' is not M or F", s))
}

fn payment_type_arg(s: &str) -> Result<PaymentType, String> {
    PaymentType::from_code(s).ok_or_else(|| format!("'{}' is not bank or cash", s))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the audit log
    Log {
        #[arg(long = "print", help = "Print rows from the audit log")]
        print: bool,

        #[arg(long = "last", value_name = "N", help = "Only the newest N rows")]
        last: Option<usize>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Compress the backup into a .zip")]
        compress: bool,
    },

    /// Construction sites
    Site {
        #[command(subcommand)]
        action: SiteCmd,
    },

    /// Labourers of a site
    Labour {
        #[command(subcommand)]
        action: LabourCmd,
    },

    /// Payroll weeks (Saturday to Friday)
    Week {
        #[command(subcommand)]
        action: WeekCmd,
    },

    /// Daily attendance
    Day {
        #[command(subcommand)]
        action: DayCmd,
    },

    /// Who works a week, and at what daily wage
    Roster {
        #[command(subcommand)]
        action: RosterCmd,
    },

    /// Weekly payouts
    Pay {
        #[command(subcommand)]
        action: PayCmd,
    },

    /// Piecework jobs and their payments
    #[command(name = "rate-work")]
    RateWork {
        #[command(subcommand)]
        action: RateWorkCmd,
    },

    /// Export a week's ledger
    Export {
        #[arg(long, help = "Week id")]
        week: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum SiteCmd {
    /// Register a site
    Add {
        name: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    /// List sites
    List {
        #[arg(long, help = "Include deactivated sites")]
        all: bool,
    },
    Show {
        id: String,
    },
    Activate {
        id: String,
    },
    Deactivate {
        id: String,
    },
    /// Delete a site with all its labourers and weeks
    Del {
        id: String,
    },
}

/// Labourer attributes; every flag is optional on edit.
#[derive(Args, Clone, Default)]
pub struct LabourArgs {
    #[arg(
        long,
        value_parser = balance_arg,
        allow_hyphen_values = true,
        help = "Opening balance owed to the labourer (negative if they owe)"
    )]
    pub balance: Option<Decimal>,

    #[arg(long = "type", value_parser = labour_type_arg, help = "daily | rate")]
    pub kind: Option<LabourType>,

    #[arg(long, value_parser = gender_arg, help = "M | F")]
    pub gender: Option<Gender>,

    #[arg(long)]
    pub pan: Option<String>,

    #[arg(long)]
    pub aadhar: Option<String>,

    #[arg(long)]
    pub account: Option<String>,

    #[arg(long)]
    pub ifsc: Option<String>,

    #[arg(long)]
    pub branch: Option<String>,

    #[arg(long, help = "Photo path (stored as text)")]
    pub photo: Option<String>,
}

#[derive(Subcommand)]
pub enum LabourCmd {
    Add {
        #[arg(long)]
        site: String,
        name: String,
        #[command(flatten)]
        fields: LabourArgs,
    },
    List {
        #[arg(long)]
        site: String,
        #[arg(long = "type", value_parser = labour_type_arg)]
        kind: Option<LabourType>,
    },
    Show {
        id: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: LabourArgs,
    },
    Del {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum WeekCmd {
    /// Create a week and its 7 days
    Add {
        #[arg(long)]
        site: String,
        #[arg(value_parser = parse_date_arg, help = "Start date (a Saturday)")]
        start: NaiveDate,
    },
    List {
        #[arg(long)]
        site: String,
    },
    /// Days, attendance and ledger of a week
    Show {
        id: String,
        #[arg(long, help = "Print the week as JSON")]
        json: bool,
    },
    /// Lock the week against roster changes and ordinary submissions
    Lock {
        id: String,
    },
    Unlock {
        id: String,
    },
    Del {
        id: String,
    },
}

/// A day, by entry id or by week and date.
#[derive(Args, Clone)]
pub struct DayTarget {
    #[arg(long, conflicts_with_all = ["week", "date"])]
    pub entry: Option<String>,

    #[arg(long, requires = "date")]
    pub week: Option<String>,

    #[arg(long, requires = "week", value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum DayCmd {
    Show {
        #[command(flatten)]
        target: DayTarget,
    },
    /// Save a day's attendance: LABOUR_ID:P|A[:ADVANCE[:MULTIPLIER[:bank|cash]]]
    Submit {
        #[command(flatten)]
        target: DayTarget,

        rows: Vec<AttendanceInput>,

        #[arg(long = "admin-unlock", help = "Bypass the edit window and keep the day open")]
        admin_unlock: bool,
    },
}

#[derive(Subcommand)]
pub enum RosterCmd {
    /// Replace the roster: LABOUR_ID:WAGE ...
    Set {
        week: String,
        entries: Vec<RosterEntry>,
    },
    Add {
        week: String,
        labour: String,
        #[arg(value_parser = money_arg)]
        wage: Decimal,
    },
    Del {
        week: String,
        labour: String,
    },
    /// Change the wage of one assignment
    Wage {
        assignment: String,
        #[arg(value_parser = money_arg)]
        wage: Decimal,
    },
    List {
        week: String,
    },
}

#[derive(Subcommand)]
pub enum PayCmd {
    /// Record (or replace) the payout of an assignment
    Record {
        assignment: String,
        #[arg(value_parser = money_arg)]
        amount: Decimal,
        #[arg(long = "type", value_parser = payment_type_arg, help = "bank | cash (default from config)")]
        payment_type: Option<PaymentType>,
    },
    Clear {
        assignment: String,
    },
    List {
        week: String,
    },
}

/// Piecework attributes; every flag is optional on edit.
#[derive(Args, Clone, Default)]
pub struct RateWorkArgs {
    #[arg(long = "qty", value_parser = money_arg)]
    pub quantity: Option<Decimal>,

    #[arg(long)]
    pub unit: Option<String>,

    #[arg(long = "cost", value_parser = money_arg, help = "Cost per unit")]
    pub cost_per_unit: Option<Decimal>,
}

#[derive(Subcommand)]
pub enum RateWorkCmd {
    Add {
        labour: String,
        name: String,
        #[command(flatten)]
        fields: RateWorkArgs,
    },
    /// Jobs, payments and outstanding amount of a labourer
    List {
        labour: String,
    },
    Show {
        id: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: RateWorkArgs,
    },
    /// Mark a job completed
    Done {
        id: String,
    },
    Del {
        id: String,
    },
    Pay {
        labour: String,
        #[arg(value_parser = money_arg)]
        amount: Decimal,
        #[arg(long, default_value = "")]
        note: String,
    },
    Payments {
        labour: String,
    },
    #[command(name = "del-payment")]
    DelPayment {
        labour: String,
        payment: String,
    },
}
