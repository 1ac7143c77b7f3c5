//! Core value types for ntstatus.
//!
//! This crate contains pure value types with no IO, no async, and minimal dependencies.
//! Status-code catalogs and anything else that consumes these types live elsewhere.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod bits;
pub use bits::{ThirtyTwoBits, ThirtyTwoBitsError};
