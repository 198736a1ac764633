//! geobrew-rs
//! ==========
//!
//! Workspace host crate. It re-exports [`geobrew_core`] so the demos under
//! `demos/` can be run with `cargo run --example <name>` from the root.
pub use geobrew_core::*;
