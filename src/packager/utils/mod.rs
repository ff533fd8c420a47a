//! Shared helpers for the pipeline stages.

pub mod checksum;
pub mod command;
pub mod fs;
