//! Data types for the purge library.

pub mod config;
pub mod page;
pub mod report;
pub mod section;
pub mod stylesheet;
