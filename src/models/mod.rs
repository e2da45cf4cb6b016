pub mod wire_rows;
pub mod rate_table;
