//! Shared utilities for burgerclick binaries.

pub mod logger;
pub mod time;
