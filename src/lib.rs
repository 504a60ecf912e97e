//! dom-pilot - Deterministic interaction primitives over a remote
//! browser-automation session.
//!
//! A remote browser session exposes element lookup, navigation, and
//! script execution as call-and-response operations that fail
//! transiently: elements not yet rendered, pages not yet loaded, DOMs
//! mutated mid-query. This library converts those unreliable
//! single-shot calls into reliable, timeout-bounded operations with
//! well-defined success/failure semantics.
//!
//! # Architecture
//!
//! - A [`Pilot`] exclusively owns one [`RemoteSession`] and the set of
//!   tabs it created; all operations are strictly sequential per pilot.
//! - Every bounded operation computes one absolute deadline up front
//!   and polls at a fixed interval (default 333 ms) against an
//!   injectable [`Clock`].
//! - Transient remote failures during polling are swallowed and
//!   retried; tab-handle misuse fails fast and is never absorbed.
//! - Finders raise [`Error::NotFound`] on timeout; `wait_for_*`
//!   waiters are silent and simply report whether the condition held.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use dom_pilot::{Pilot, RemoteSession, Result, Selector};
//!
//! async fn example(remote: Arc<dyn RemoteSession>) -> Result<()> {
//!     let pilot = Pilot::new(remote);
//!
//!     pilot.goto("https://example.com").await?;
//!     let heading = pilot.find_element(&Selector::css("h1")).await?;
//!     println!("Heading: {}", heading.text().await?);
//!
//!     pilot.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pilot`] | The processor: finders, waiters, tabs, navigation, forms |
//! | [`remote`] | The [`RemoteSession`] trait consumed by the engine |
//! | [`timing`] | Clocks, deadlines, and the retry combinator |
//! | [`selector`] | Element locator strategies |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |

// ============================================================================
// Modules
// ============================================================================

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for remote browser entities.
pub mod identifiers;

/// The interaction processor and its operations.
pub mod pilot;

/// The remote automation interface trait.
pub mod remote;

/// Element locator strategies.
pub mod selector;

/// Clocks, deadlines, and the retry combinator.
pub mod timing;

// ============================================================================
// Re-exports
// ============================================================================

// Pilot types
pub use pilot::{
    Alert, Element, INDEFINITE_WAIT, NavigateOptions, Pilot, PilotConfig, ReadOptions,
};

// Remote interface
pub use remote::RemoteSession;

// Timing types
pub use timing::{Clock, Deadline, SystemClock, retry_until_some};

// Selector types
pub use selector::Selector;

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ElementId, TabHandle};
