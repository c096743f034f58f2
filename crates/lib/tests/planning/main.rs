//! End-to-end planning tests against the public API.

mod module_tests;
