//! Error types for the interaction engine.
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`].
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Tab misuse | [`Error::InvalidTab`], [`Error::AmbiguousNewTab`] |
//! | Deadline exhaustion | [`Error::NotFound`], [`Error::NoAlert`], [`Error::Timeout`] |
//! | Navigation | [`Error::NavigationFailed`] |
//! | Option lookup | [`Error::NoSuchOption`] |
//! | Remote channel | [`Error::Stale`], [`Error::Remote`] |
//!
//! Transient remote failures observed *during* a polling loop never
//! surface as errors; the loop swallows them and retries until its
//! deadline. Tab misuse is the opposite: it is a programming error and
//! fails fast without any retry.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::{ElementId, TabHandle};

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes enough context to tell a timeout apart from a
/// logic error: the selector involved, the budget that elapsed, or the
/// attempt count.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Tab Misuse
    // ========================================================================
    /// Operation referenced a tab handle not owned by this pilot.
    ///
    /// Never retried; the registry is left unchanged.
    #[error("Tab not owned by this pilot: {handle}")]
    InvalidTab {
        /// The foreign or already-closed handle.
        handle: TabHandle,
    },

    /// Opening a new tab produced an ambiguous window-handle diff.
    ///
    /// Exactly one new handle must appear after a `new_tab`; zero or
    /// several is surfaced rather than silently resolved.
    #[error("Expected exactly one new window handle, found {appeared}")]
    AmbiguousNewTab {
        /// Number of new handles observed.
        appeared: usize,
    },

    // ========================================================================
    // Deadline Exhaustion
    // ========================================================================
    /// A required element or collection did not appear within its deadline.
    ///
    /// The deadline already represents the retry budget, so this is
    /// final as far as the engine is concerned.
    #[error("Element not found within {timeout_ms}ms: {selector}")]
    NotFound {
        /// Description of the selector that never matched.
        selector: String,
        /// The exhausted budget, in milliseconds.
        timeout_ms: u64,
    },

    /// No alert dialog appeared within the deadline.
    #[error("No alert present within {timeout_ms}ms")]
    NoAlert {
        /// The exhausted budget, in milliseconds.
        timeout_ms: u64,
    },

    /// A retried read never produced a value within its deadline.
    ///
    /// Only synthesized when every attempt returned "nothing" without
    /// erring; if the final attempt erred, that raw error propagates
    /// instead to preserve the root cause.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// The exhausted budget, in milliseconds.
        timeout_ms: u64,
    },

    // ========================================================================
    // Navigation
    // ========================================================================
    /// All navigation attempts exhausted without reaching a non-error page.
    #[error("Navigation to {url} failed after {attempts} attempts")]
    NavigationFailed {
        /// The target URL.
        url: String,
        /// Number of attempts performed.
        attempts: u32,
    },

    // ========================================================================
    // Option Lookup
    // ========================================================================
    /// A `<select>` option lookup matched nothing.
    ///
    /// Raised over an already-enumerated option list, so no deadline is
    /// involved; the count tells the caller what was actually there.
    #[error("Option not found in {selector}: {wanted} ({available} options)")]
    NoSuchOption {
        /// Description of the `<select>`'s selector.
        selector: String,
        /// The criterion that matched nothing.
        wanted: String,
        /// Number of options that were present.
        available: usize,
    },

    // ========================================================================
    // Remote Channel
    // ========================================================================
    /// A previously located element is no longer attached to the DOM.
    #[error("Stale element: {element}")]
    Stale {
        /// The stale element's ID.
        element: ElementId,
    },

    /// Failure reported by the remote automation interface.
    ///
    /// During polling these are swallowed and retried; outside polling
    /// loops they propagate as-is.
    #[error("Remote interface error: {message}")]
    Remote {
        /// Description from the remote end.
        message: String,
    },
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an invalid tab error.
    #[inline]
    pub fn invalid_tab(handle: TabHandle) -> Self {
        Self::InvalidTab { handle }
    }

    /// Creates an ambiguous new-tab error.
    #[inline]
    pub fn ambiguous_new_tab(appeared: usize) -> Self {
        Self::AmbiguousNewTab { appeared }
    }

    /// Creates a not-found error.
    #[inline]
    pub fn not_found(selector: impl Into<String>, timeout_ms: u64) -> Self {
        Self::NotFound {
            selector: selector.into(),
            timeout_ms,
        }
    }

    /// Creates a no-alert error.
    #[inline]
    pub fn no_alert(timeout_ms: u64) -> Self {
        Self::NoAlert { timeout_ms }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates a navigation failed error.
    #[inline]
    pub fn navigation_failed(url: impl Into<String>, attempts: u32) -> Self {
        Self::NavigationFailed {
            url: url.into(),
            attempts,
        }
    }

    /// Creates a no-such-option error.
    #[inline]
    pub fn no_such_option(
        selector: impl Into<String>,
        wanted: impl Into<String>,
        available: usize,
    ) -> Self {
        Self::NoSuchOption {
            selector: selector.into(),
            wanted: wanted.into(),
            available,
        }
    }

    /// Creates a stale element error.
    #[inline]
    pub fn stale(element: ElementId) -> Self {
        Self::Stale { element }
    }

    /// Creates a remote interface error.
    #[inline]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error reports an exhausted deadline.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NoAlert { .. } | Self::Timeout { .. }
        )
    }

    /// Returns `true` if this error may clear up on its own.
    ///
    /// Transient errors are the ones polling loops swallow; a caller
    /// holding one outside a loop may reasonably try again.
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Stale { .. } | Self::Remote { .. })
    }

    /// Returns `true` if this error indicates tab-handle misuse.
    #[inline]
    #[must_use]
    pub fn is_tab_misuse(&self) -> bool {
        matches!(self, Self::InvalidTab { .. } | Self::AmbiguousNewTab { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tab_display() {
        let err = Error::invalid_tab(TabHandle::new("w7"));
        assert_eq!(err.to_string(), "Tab not owned by this pilot: w7");
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("css:#login", 20_000);
        assert_eq!(
            err.to_string(),
            "Element not found within 20000ms: css:#login"
        );
    }

    #[test]
    fn test_navigation_failed_display() {
        let err = Error::navigation_failed("https://example.com", 3);
        assert_eq!(
            err.to_string(),
            "Navigation to https://example.com failed after 3 attempts"
        );
    }

    #[test]
    fn test_no_such_option_display_carries_count_not_timeout() {
        let err = Error::no_such_option("id:country", "index 5", 1);
        assert_eq!(
            err.to_string(),
            "Option not found in id:country: index 5 (1 options)"
        );
        assert!(!err.to_string().contains("ms"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_is_timeout() {
        assert!(Error::not_found("css:#x", 1).is_timeout());
        assert!(Error::no_alert(1).is_timeout());
        assert!(Error::timeout("read", 1).is_timeout());
        assert!(!Error::remote("boom").is_timeout());
    }

    #[test]
    fn test_is_transient() {
        assert!(Error::stale(ElementId::new("el-1")).is_transient());
        assert!(Error::remote("connection reset").is_transient());
        assert!(!Error::invalid_tab(TabHandle::new("w1")).is_transient());
    }

    #[test]
    fn test_is_tab_misuse() {
        assert!(Error::invalid_tab(TabHandle::new("w1")).is_tab_misuse());
        assert!(Error::ambiguous_new_tab(2).is_tab_misuse());
        assert!(!Error::not_found("css:#x", 1).is_tab_misuse());
    }
}
