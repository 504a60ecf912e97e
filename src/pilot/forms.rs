//! Form manipulation helpers.
//!
//! Thin consumers of the element waiter: each helper resolves its
//! target through [`Pilot::find_element`] first, then performs one
//! direct mutation.

// ============================================================================
// Imports
// ============================================================================

use rand::Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::selector::Selector;

use super::Pilot;

// ============================================================================
// Pilot - Text & Checkboxes
// ============================================================================

impl Pilot {
    /// Replaces the text of an input element.
    pub async fn set_text(&self, selector: &Selector, text: &str) -> Result<()> {
        debug!(pilot = %self.uuid, selector = %selector, "Setting text");
        let element = self.find_element(selector).await?;
        element.clear().await?;
        element.send_keys(text).await
    }

    /// Drives a checkbox to the requested state.
    ///
    /// Clicks only when the current state differs, so the call is
    /// idempotent.
    pub async fn update_checkbox(&self, selector: &Selector, checked: bool) -> Result<()> {
        debug!(pilot = %self.uuid, selector = %selector, checked, "Updating checkbox");
        let element = self.find_element(selector).await?;
        if element.is_selected().await? != checked {
            element.click().await?;
        }
        Ok(())
    }
}

// ============================================================================
// Pilot - Select Elements
// ============================================================================

impl Pilot {
    /// Selects the option at `index` within a `<select>` element.
    pub async fn select_option_by_index(&self, selector: &Selector, index: usize) -> Result<()> {
        debug!(pilot = %self.uuid, selector = %selector, index, "Selecting option by index");
        let options = self.select_options(selector).await?;
        let option = options.get(index).ok_or_else(|| {
            Error::no_such_option(selector.to_string(), format!("index {index}"), options.len())
        })?;
        self.remote.click(option).await
    }

    /// Selects the option whose `value` attribute equals `value`.
    pub async fn select_option_by_value(&self, selector: &Selector, value: &str) -> Result<()> {
        debug!(pilot = %self.uuid, selector = %selector, value, "Selecting option by value");
        let options = self.select_options(selector).await?;
        for option in &options {
            if self.remote.attribute(option, "value").await?.as_deref() == Some(value) {
                return self.remote.click(option).await;
            }
        }
        Err(Error::no_such_option(
            selector.to_string(),
            format!("value={value}"),
            options.len(),
        ))
    }

    /// Selects the option whose visible text equals `text`.
    pub async fn select_option_by_text(&self, selector: &Selector, text: &str) -> Result<()> {
        debug!(pilot = %self.uuid, selector = %selector, text, "Selecting option by text");
        let options = self.select_options(selector).await?;
        for option in &options {
            if self.remote.text(option).await?.trim() == text {
                return self.remote.click(option).await;
            }
        }
        Err(Error::no_such_option(
            selector.to_string(),
            format!("text={text}"),
            options.len(),
        ))
    }

    /// Selects a uniformly random option.
    ///
    /// The index is drawn from the pilot-scoped random source over
    /// `[0, option_count)`.
    pub async fn select_random_option(&self, selector: &Selector) -> Result<()> {
        let options = self.select_options(selector).await?;
        let index = self.rng.lock().gen_range(0..options.len());
        debug!(pilot = %self.uuid, selector = %selector, index, "Selecting random option");
        self.remote.click(&options[index]).await
    }

    /// Locates the `<select>` and enumerates its options, requiring at
    /// least one.
    async fn select_options(&self, selector: &Selector) -> Result<Vec<ElementId>> {
        let select = self.find_element(selector).await?;
        let options = self
            .remote
            .find_elements_within(select.id(), &Selector::tag("option"))
            .await?;
        if options.is_empty() {
            return Err(Error::no_such_option(
                selector.to_string(),
                "at least one option",
                0,
            ));
        }
        Ok(options)
    }
}
