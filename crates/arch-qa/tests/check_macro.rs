//! Integration tests for the `arch_qa::check!()` macro.
//!
//! Runs this repository's own layout catalog through the full pipeline:
//! macro expansion → config load → evaluation → pass.

arch_qa::check!(config = "crates/arch-qa/tests/test-catalog.toml");
