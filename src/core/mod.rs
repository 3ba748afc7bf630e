//! Business logic. Each `XxxLogic` groups the operations of one area;
//! writes take the pool and run in a single IMMEDIATE transaction with
//! their audit row, reads take a plain connection.

pub mod attendance;
pub mod backup;
pub mod detail;
pub mod labour;
pub mod ledger;
pub mod log;
pub mod payment;
pub mod rate_work;
pub mod roster;
pub mod site;
pub mod week;
