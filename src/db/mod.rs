pub mod attendance;
pub mod db_utils;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod rate_work;
pub mod stats;
pub mod weeks;
