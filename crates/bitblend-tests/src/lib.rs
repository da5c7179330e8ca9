//! Integration tests for bitblend crates.
//!
//! End-to-end checks of decode -> blend -> encode across the codec and
//! blend crates.
