pub mod backup;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod location;
pub mod logging;
pub mod merge;
pub mod models;
pub mod money;
pub mod padding;
pub mod period;
pub mod price;
pub mod readings;
