//! # Plotline Server
//!
//! HTTP front end for the Plotline chart renderer.
//!
//! Serves an index page with the configured samples drawn as an inline PNG,
//! a JSON render endpoint, a health check and fixed error pages. Rendering
//! runs on the blocking thread pool.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod error;
pub mod pages;
pub mod routes;
pub mod server;

pub use cli::*;
pub use error::*;
pub use server::*;
