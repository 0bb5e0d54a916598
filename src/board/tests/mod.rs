//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts for move generation
//! - `edge_cases.rs` - Special positions and moves
//! - `proptest.rs` - Property-based tests
