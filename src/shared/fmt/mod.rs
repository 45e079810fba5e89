//! Display formatting for prices and timestamps.

pub mod decimal;
pub mod time;
