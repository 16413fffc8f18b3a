//! Integration tests against mock HTTP servers
//!
//! These tests use wiremock to stand in for the EDGAR host and tempfile
//! directories for the SQLite database and exports.

mod common;
mod fetch_tests;
mod pipeline_tests;
mod robots_tests;
