//! Shared utilities.
//!
//! Path normalization, plan fingerprinting and test helpers.

pub mod hash;
pub mod path;

#[cfg(test)]
pub mod testutil;
