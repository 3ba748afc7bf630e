pub mod colors;
pub mod date;
pub mod money;
pub mod path;
pub mod table;
