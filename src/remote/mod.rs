//! The remote automation interface.
//!
//! [`RemoteSession`] is the seam between the interaction engine and
//! whatever actually talks to a browser (a WebDriver-protocol client,
//! a DevTools bridge, a fake in tests). The engine treats every call
//! on it as a single unreliable attempt: an element may not be rendered
//! yet, the page may not be loaded, the DOM may mutate mid-query. All
//! reliability is layered on top by the polling loops in [`crate::pilot`].
//!
//! Implementations must not add their own retry or wait semantics;
//! doing so would stretch the engine's deadlines unpredictably.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::identifiers::{ElementId, TabHandle};
use crate::selector::Selector;

// ============================================================================
// RemoteSession
// ============================================================================

/// One live browser-automation session.
///
/// Each method is a single call-and-response against the remote end.
/// Element operations take the [`ElementId`] returned by an earlier
/// lookup and may fail with [`crate::Error::Stale`] if the page has
/// mutated since.
#[async_trait]
pub trait RemoteSession: Send + Sync {
    // ========================================================================
    // Element Lookup
    // ========================================================================

    /// Finds all elements matching `selector` in the focused tab's DOM.
    ///
    /// An empty vector means "no match right now", which during polling
    /// is indistinguishable from "not yet rendered".
    async fn find_elements(&self, selector: &Selector) -> Result<Vec<ElementId>>;

    /// Finds all elements matching `selector` underneath `parent`.
    async fn find_elements_within(
        &self,
        parent: &ElementId,
        selector: &Selector,
    ) -> Result<Vec<ElementId>>;

    // ========================================================================
    // Element State
    // ========================================================================

    /// Returns whether the element is rendered and visible.
    async fn is_displayed(&self, element: &ElementId) -> Result<bool>;

    /// Returns whether the element is selected/checked.
    async fn is_selected(&self, element: &ElementId) -> Result<bool>;

    /// Reads an attribute value, `None` when the attribute is absent.
    async fn attribute(&self, element: &ElementId, name: &str) -> Result<Option<String>>;

    /// Reads the element's visible text content.
    async fn text(&self, element: &ElementId) -> Result<String>;

    // ========================================================================
    // Element Actions
    // ========================================================================

    /// Clicks the element.
    async fn click(&self, element: &ElementId) -> Result<()>;

    /// Types the given keys into the element.
    async fn send_keys(&self, element: &ElementId, keys: &str) -> Result<()>;

    /// Clears the element's value.
    async fn clear(&self, element: &ElementId) -> Result<()>;

    // ========================================================================
    // Navigation & Scripting
    // ========================================================================

    /// Navigates the focused tab to `url`.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Returns the focused tab's current URL.
    async fn current_url(&self) -> Result<String>;

    /// Reloads the focused tab.
    async fn refresh(&self) -> Result<()>;

    /// Executes a script in the focused tab and returns its result.
    async fn execute_script(&self, script: &str, args: &[Value]) -> Result<Value>;

    // ========================================================================
    // Windows
    // ========================================================================

    /// Lists every window handle the session knows about, in the
    /// remote end's own order.
    async fn window_handles(&self) -> Result<Vec<TabHandle>>;

    /// Focuses the window identified by `handle`.
    async fn switch_to_window(&self, handle: &TabHandle) -> Result<()>;

    /// Closes the focused window.
    async fn close_window(&self) -> Result<()>;

    // ========================================================================
    // Alerts
    // ========================================================================

    /// Returns the active alert's text, erring when none is present.
    async fn alert_text(&self) -> Result<String>;

    /// Accepts the active alert.
    async fn accept_alert(&self) -> Result<()>;

    /// Dismisses the active alert.
    async fn dismiss_alert(&self) -> Result<()>;
}
