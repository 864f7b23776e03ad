//! Integration test suite entry point.

mod config_tests;
mod fixture;
