//! DOM element handles.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::identifiers::ElementId;
use crate::remote::RemoteSession;
use crate::selector::Selector;

// ============================================================================
// Element
// ============================================================================

/// A handle to a located DOM element.
///
/// Operations here are single remote calls with no polling; a stale
/// handle errs immediately. Callers who need stale tolerance go
/// through the pilot's read operations with
/// [`crate::ReadOptions::retry_on_stale`] instead.
#[derive(Clone)]
pub struct Element {
    /// The remote-assigned element ID.
    pub(crate) id: ElementId,
    /// The selector this element was located with, kept for context.
    pub(crate) selector: Selector,
    /// The session that owns the element.
    pub(crate) remote: Arc<dyn RemoteSession>,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Element - Constructor & Accessors
// ============================================================================

impl Element {
    /// Creates a new element handle.
    pub(crate) fn new(id: ElementId, selector: Selector, remote: Arc<dyn RemoteSession>) -> Self {
        Self {
            id,
            selector,
            remote,
        }
    }

    /// Returns this element's remote ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Returns the selector this element was located with.
    #[inline]
    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

// ============================================================================
// Element - Actions
// ============================================================================

impl Element {
    /// Clicks the element.
    pub async fn click(&self) -> Result<()> {
        debug!(element = %self.id, selector = %self.selector, "Clicking element");
        self.remote.click(&self.id).await
    }

    /// Types the given keys into the element.
    pub async fn send_keys(&self, keys: &str) -> Result<()> {
        debug!(element = %self.id, keys_len = keys.len(), "Sending keys");
        self.remote.send_keys(&self.id, keys).await
    }

    /// Clears the element's value.
    pub async fn clear(&self) -> Result<()> {
        debug!(element = %self.id, "Clearing element");
        self.remote.clear(&self.id).await
    }
}

// ============================================================================
// Element - Properties
// ============================================================================

impl Element {
    /// Gets the element's visible text.
    pub async fn text(&self) -> Result<String> {
        self.remote.text(&self.id).await
    }

    /// Gets an attribute value, `None` when absent.
    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.remote.attribute(&self.id, name).await
    }

    /// Returns whether the element is rendered and visible.
    pub async fn is_displayed(&self) -> Result<bool> {
        self.remote.is_displayed(&self.id).await
    }

    /// Returns whether the element is selected/checked.
    pub async fn is_selected(&self) -> Result<bool> {
        self.remote.is_selected(&self.id).await
    }
}
