//! Clocks, deadlines, and the retry combinator.
//!
//! Every bounded operation in the engine is built from the same three
//! pieces:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Clock`] | Injectable time source: `now` plus an async `sleep` |
//! | [`Deadline`] | Absolute expiry computed once per operation |
//! | [`retry_until_some`] | Poll an action until it yields a value |
//!
//! The clock is a trait so tests drive the loops with a virtual clock
//! instead of real sleeps.

// ============================================================================
// Submodules
// ============================================================================

mod clock;
mod retry;

// ============================================================================
// Re-exports
// ============================================================================

pub use clock::{Clock, Deadline, SystemClock};
pub use retry::retry_until_some;
