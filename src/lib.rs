//! pgdesk - A small PostgreSQL query console.
//!
//! This library exposes the core modules for use by the binary and the
//! integration tests.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod render;
pub mod shell;
