//! Partsnavi - Storefront Parts Assistant
//!
//! Answers "which parts fit my car" questions for an auto-parts storefront.
//! Free text goes through a language model for vehicle attributes, the
//! attributes are matched against a fitment table, and the fitting products
//! come back with a short Japanese answer.

pub mod affiliate;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod services;
