//! Utilities shared by the Kibitz packages (logging, time).

pub mod logger;
pub mod time;
