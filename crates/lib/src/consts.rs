//! Shared constants.

pub const APP_NAME: &str = "broc";

/// Directory, relative to the workspace, that receives every generated artifact.
pub const DEFAULT_OUTPUT_ROOT: &str = "broc_out";

pub const DEFAULT_CC: &str = "gcc";
pub const DEFAULT_CXX: &str = "g++";
pub const DEFAULT_AR: &str = "ar";
pub const DEFAULT_PROTOC: &str = "protoc";

/// Length of the truncated SHA-256 used for plan fingerprints.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;
