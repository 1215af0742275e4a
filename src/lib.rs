//! Loupe - a lightweight web viewer for SQLite databases.
//!
//! This library exposes the core modules for use in integration tests.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod web;
