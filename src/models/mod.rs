pub mod assignment;
pub mod attendance;
pub mod labour;
pub mod ledger;
pub mod payment_type;
pub mod rate_work;
pub mod site;
pub mod week;
pub mod week_detail;
