//! Utility modules for IO, logging and console output

pub mod io;
pub mod logging;
