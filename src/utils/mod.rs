//! Shared helpers for Arrow tables, dates and console/log output

pub mod arrow;
pub mod dates;
pub mod logging;
