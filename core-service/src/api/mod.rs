//! API Module
//!
//! Command surface for the presentation layer. Commands return serializable
//! DTOs and `Result<T, String>` so the UI only ever sees plain messages.

pub mod commands;

pub use commands::*;
