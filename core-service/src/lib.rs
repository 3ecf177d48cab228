//! FinShield Core - credit risk scoring pipeline behind the dashboard
//!
//! The presentation layer (charts, chat panel, upload widgets) calls into
//! [`api::commands`] with rows of data and renders whatever comes back.

pub mod api;
pub mod constants;
pub mod logic;
