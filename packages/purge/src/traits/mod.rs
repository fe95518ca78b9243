//! Core trait abstractions for the purge library.
//!
//! These traits define the seams the pipeline is built on: fetching,
//! reduction, and artifact storage.

pub mod fetcher;
pub mod reducer;
pub mod store;
