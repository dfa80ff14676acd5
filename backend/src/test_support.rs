//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and the integration tests in `tests/`
//! (through the `test-support` feature).

mod clock;
mod hasher;
mod memory;

pub use clock::FixedClock;
pub use hasher::PlaintextHasher;
pub use memory::MemoryStore;

/// Signing secret long enough for release-mode validation.
pub const TEST_JWT_SECRET: &[u8] = b"scribe-test-secret-0123456789abcdef";
