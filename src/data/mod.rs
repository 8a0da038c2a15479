//! Data fetching
//!
//! Handles:
//! - The `OptionDataSource` seam the collector reads through
//! - Yahoo Finance API for listed equity options (free)
//! - An in-memory source for fixtures and tests

pub mod source;
pub mod yahoo;

pub use source::*;
pub use yahoo::*;
