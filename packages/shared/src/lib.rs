//! Utilities shared by the chatrelay packages: logging setup and time helpers.

pub mod logger;
pub mod time;
