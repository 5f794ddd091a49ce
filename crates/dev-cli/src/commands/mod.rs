//! CLI command implementations.

pub mod babel;
pub mod lint;
