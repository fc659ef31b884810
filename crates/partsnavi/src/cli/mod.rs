//! Command line client
//!
//! The CLI holds no business logic: every command is a request to a running
//! partsnavi server.

pub mod client;
pub mod commands;
pub mod display;
