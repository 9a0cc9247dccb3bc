//! CLI library components for invdesk.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
