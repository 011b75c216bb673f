pub mod table_utils;
pub mod units;
