//! Tab ownership registry and tab lifecycle operations.
//!
//! The registry is the sole arbiter of which window handles this pilot
//! may act on. Invariants:
//!
//! - every registered handle was created by this pilot's
//!   [`Pilot::new_tab`] and has not yet been closed;
//! - the current pointer is either unset or a registered handle;
//! - handles are kept in registration order (teardown closes them in
//!   that order).
//!
//! Referencing a handle outside the registry is a programming error
//! and fails fast with [`crate::Error::InvalidTab`]; it is never
//! retried or absorbed.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::identifiers::TabHandle;

use super::Pilot;

// ============================================================================
// Constants
// ============================================================================

/// Opens a tab from whichever window is focused when it runs.
///
/// Issued against the session's root window so the open is unaffected
/// by where focus happens to sit.
const OPEN_TAB_SCRIPT: &str = "window.open(arguments[0], '_blank');";

// ============================================================================
// TabRegistry
// ============================================================================

/// Insertion-ordered set of owned tab handles plus a current pointer.
#[derive(Debug, Default)]
pub(crate) struct TabRegistry {
    /// Owned handles, in registration order.
    tabs: Vec<TabHandle>,
    /// The handle all DOM operations implicitly bind to.
    current: Option<TabHandle>,
}

impl TabRegistry {
    /// Creates an empty registry.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns whether `handle` is owned by this registry.
    pub(crate) fn contains(&self, handle: &TabHandle) -> bool {
        self.tabs.contains(handle)
    }

    /// Returns the current tab, if one is focused.
    pub(crate) fn current(&self) -> Option<&TabHandle> {
        self.current.as_ref()
    }

    /// Registers a newly created handle and makes it current.
    pub(crate) fn register(&mut self, handle: TabHandle) {
        self.tabs.push(handle.clone());
        self.current = Some(handle);
    }

    /// Points the current pointer at a registered handle.
    pub(crate) fn focus(&mut self, handle: TabHandle) {
        debug_assert!(self.contains(&handle));
        self.current = Some(handle);
    }

    /// Removes a handle; unsets the current pointer when it was the
    /// one removed.
    pub(crate) fn deregister(&mut self, handle: &TabHandle) {
        self.tabs.retain(|h| h != handle);
        if self.current.as_ref() == Some(handle) {
            self.current = None;
        }
    }

    /// Returns all handles in registration order.
    pub(crate) fn handles(&self) -> Vec<TabHandle> {
        self.tabs.clone()
    }

    /// Returns whether no tabs are registered.
    pub(crate) fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

// ============================================================================
// Pilot - Tab Lifecycle
// ============================================================================

impl Pilot {
    /// Opens a new tab at `url`, registers it, and focuses it.
    ///
    /// The open runs as script in the session's root window, then the
    /// window-handle set is diffed before/after to discover the new
    /// handle. Anything other than exactly one new handle is
    /// ambiguous and surfaced as [`crate::Error::AmbiguousNewTab`].
    pub async fn new_tab(&self, url: &str) -> Result<TabHandle> {
        debug!(pilot = %self.uuid, url, "Opening new tab");

        let before = self.remote.window_handles().await?;
        let root = before
            .first()
            .cloned()
            .ok_or_else(|| Error::remote("session has no windows"))?;

        self.remote.switch_to_window(&root).await?;
        self.remote
            .execute_script(OPEN_TAB_SCRIPT, &[Value::String(url.to_string())])
            .await?;

        let after = self.remote.window_handles().await?;
        let mut appeared: Vec<TabHandle> = after
            .into_iter()
            .filter(|handle| !before.contains(handle))
            .collect();
        if appeared.len() != 1 {
            return Err(Error::ambiguous_new_tab(appeared.len()));
        }
        let handle = appeared.remove(0);

        self.remote.switch_to_window(&handle).await?;
        self.tabs.lock().register(handle.clone());

        info!(pilot = %self.uuid, tab = %handle, url, "New tab opened");
        Ok(handle)
    }

    /// Focuses a previously opened tab.
    ///
    /// No remote call is issued when `handle` is already current.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidTab`] when the handle is not owned by
    /// this pilot.
    pub async fn switch_to_tab(&self, handle: &TabHandle) -> Result<()> {
        {
            let tabs = self.tabs.lock();
            if tabs.current() == Some(handle) {
                debug!(pilot = %self.uuid, tab = %handle, "Already focused, no switch issued");
                return Ok(());
            }
            if !tabs.contains(handle) {
                return Err(Error::invalid_tab(handle.clone()));
            }
        }

        self.remote.switch_to_window(handle).await?;
        self.tabs.lock().focus(handle.clone());
        debug!(pilot = %self.uuid, tab = %handle, "Switched tab");
        Ok(())
    }

    /// Closes a previously opened tab and removes it from the registry.
    ///
    /// Closing the current tab leaves focus undefined until the next
    /// explicit switch; callers must not assume focus afterwards.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidTab`] when the handle is not owned by
    /// this pilot; the registry is left unchanged.
    pub async fn close_tab(&self, handle: &TabHandle) -> Result<()> {
        if !self.tabs.lock().contains(handle) {
            return Err(Error::invalid_tab(handle.clone()));
        }

        self.remote.switch_to_window(handle).await?;
        self.remote.close_window().await?;
        self.tabs.lock().deregister(handle);

        info!(pilot = %self.uuid, tab = %handle, "Tab closed");
        Ok(())
    }

    /// Returns the currently focused tab handle, if any.
    #[must_use]
    pub fn current_tab(&self) -> Option<TabHandle> {
        self.tabs.lock().current().cloned()
    }

    /// Returns every owned tab handle in registration order.
    #[must_use]
    pub fn tab_handles(&self) -> Vec<TabHandle> {
        self.tabs.lock().handles()
    }

    /// Closes every owned tab and restores focus to the session's
    /// first surviving window.
    ///
    /// Explicit-release teardown: call this on every exit path instead
    /// of relying on drop order. Idempotent; close failures on
    /// individual tabs are logged and skipped so no owned tab is
    /// leaked behind an early error.
    pub async fn shutdown(&self) -> Result<()> {
        let handles = self.tabs.lock().handles();
        if handles.is_empty() {
            debug!(pilot = %self.uuid, "Shutdown: no tabs to close");
            return Ok(());
        }

        info!(pilot = %self.uuid, tabs = handles.len(), "Shutting down, closing owned tabs");
        for handle in handles {
            let closed = match self.remote.switch_to_window(&handle).await {
                Ok(()) => self.remote.close_window().await,
                Err(error) => Err(error),
            };
            if let Err(error) = closed {
                warn!(pilot = %self.uuid, tab = %handle, error = %error, "Failed to close tab");
            }
            self.tabs.lock().deregister(&handle);
        }

        // Hand focus back to whatever the session has left.
        if let Ok(remaining) = self.remote.window_handles().await
            && let Some(first) = remaining.first()
        {
            if let Err(error) = self.remote.switch_to_window(first).await {
                warn!(pilot = %self.uuid, error = %error, "Failed to restore focus after shutdown");
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_starts_empty() {
        let registry = TabRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.current().is_none());
    }

    #[test]
    fn test_register_sets_current() {
        let mut registry = TabRegistry::new();
        registry.register(TabHandle::new("w1"));
        assert!(registry.contains(&TabHandle::new("w1")));
        assert_eq!(registry.current(), Some(&TabHandle::new("w1")));
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = TabRegistry::new();
        registry.register(TabHandle::new("w1"));
        registry.register(TabHandle::new("w2"));
        registry.register(TabHandle::new("w3"));
        let handles = registry.handles();
        assert_eq!(
            handles,
            vec![
                TabHandle::new("w1"),
                TabHandle::new("w2"),
                TabHandle::new("w3")
            ]
        );
    }

    #[test]
    fn test_deregister_current_unsets_pointer() {
        let mut registry = TabRegistry::new();
        registry.register(TabHandle::new("w1"));
        registry.register(TabHandle::new("w2"));
        registry.deregister(&TabHandle::new("w2"));
        assert!(registry.current().is_none());
        assert!(registry.contains(&TabHandle::new("w1")));
    }

    #[test]
    fn test_deregister_other_keeps_current() {
        let mut registry = TabRegistry::new();
        registry.register(TabHandle::new("w1"));
        registry.register(TabHandle::new("w2"));
        registry.deregister(&TabHandle::new("w1"));
        assert_eq!(registry.current(), Some(&TabHandle::new("w2")));
    }
}
