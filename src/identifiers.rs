//! Type-safe identifiers for remote browser entities.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time.
//! Both wrappers are thin `String` newtypes because the remote end
//! hands out opaque string identifiers.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// TabHandle
// ============================================================================

/// Opaque identifier for one browser window or tab under automation.
///
/// A handle by itself is not ownership-bearing; the pilot's tab registry
/// owns the set of handles it may act on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabHandle(String);

impl TabHandle {
    /// Creates a tab handle from a raw identifier.
    #[inline]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw identifier string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabHandle {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

// ============================================================================
// ElementId
// ============================================================================

/// Opaque identifier for a located DOM element.
///
/// Element IDs become stale when the page mutates; holders must be
/// prepared for any operation on one to fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    /// Creates an element ID from a raw identifier.
    #[inline]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw identifier string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_handle_display() {
        let handle = TabHandle::new("CDwindow-1234");
        assert_eq!(handle.to_string(), "CDwindow-1234");
        assert_eq!(handle.as_str(), "CDwindow-1234");
    }

    #[test]
    fn test_element_id_equality() {
        let a = ElementId::new("el-1");
        let b = ElementId::from("el-1");
        assert_eq!(a, b);
    }
}
