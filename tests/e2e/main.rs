//! E2E test suite entry point.

mod ask_workflow;
mod degraded_catalog;
mod fixture;
