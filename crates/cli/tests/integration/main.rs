//! CLI integration tests for broc.

mod build_tests;
mod common;
mod plan_tests;
