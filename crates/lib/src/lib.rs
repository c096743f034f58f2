//! broc-lib: build-target model and action planner for broc
//!
//! This crate turns declared build units into the shell commands that build
//! them:
//! - `Environment`: per-module toolchain, flags and output layout
//! - `SourceUnit`: one source file and the command that compiles it
//! - `Target`: an application, unit-test application or static library
//! - `ProtoCodegenUnit`: protoc invocations generating C++ sources
//! - `BuildSet`: every unit of a module, planned and run in order

pub mod builder;
pub mod command;
pub mod consts;
pub mod env;
pub mod execute;
pub mod manifest;
pub mod proto;
pub mod source;
pub mod target;
pub mod util;
