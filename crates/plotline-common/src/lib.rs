//! # Plotline Common
//!
//! Shared error types, logging bootstrap and utilities for Plotline.
//!
//! This crate provides the foundational types used across all other crates
//! in the Plotline workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use logging::*;
pub use utils::*;
