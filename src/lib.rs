//! libris - a terminal client for a library-management service
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod auth;
pub mod cli;
pub mod cli_output;
pub mod config;
pub mod session;
pub mod traits;
pub mod view_models;
