//! REST API module for the parts assistant
//!
//! Provides the HTTP endpoints for the chat pipeline, storefront redirects,
//! fixture import and the turn-based assistant. Uses axum for routing and
//! schemars for schema generation of the wire types.

pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod startup;
pub mod state;
pub mod types;
