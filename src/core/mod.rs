//! Core data types
//!
//! - Expiration / OptionChain / ContractQuote: raw chains from a data source
//! - OptionQuoteRecord: one flattened call quote with its time to maturity
//! - Time-to-maturity day counting
//! - Error types

pub mod chain;
pub mod error;
pub mod maturity;
pub mod quote;

pub use chain::*;
pub use error::*;
pub use maturity::*;
pub use quote::*;
