//! Integration tests for rekha over synthetic outcrop clouds.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration -- --nocapture
//!
//! # With search logs
//! RUST_LOG=rekha=debug cargo test --test integration
//! ```

mod fixtures;
mod slots;
mod tracing;
