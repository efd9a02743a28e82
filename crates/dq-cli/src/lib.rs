//! CLI library components for the dq batch checker.

pub mod logging;
