//! Element locator strategies.
//!
//! A [`Selector`] is an immutable (mechanism, criteria) pair identifying
//! zero or more DOM nodes relative to the current document.
//!
//! # Example
//!
//! ```ignore
//! use dom_pilot::Selector;
//!
//! // CSS selector (default)
//! let btn = pilot.find_element(&Selector::css("#submit")).await?;
//!
//! // By ID (shorthand for CSS #id)
//! let form = pilot.find_element(&Selector::id("login-form")).await?;
//!
//! // By XPath
//! let btn = pilot.find_element(&Selector::xpath("//button[@type='submit']")).await?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Selector Enum
// ============================================================================

/// Element locator strategy.
///
/// Value-comparable and hashable so callers can use selectors as keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mechanism", content = "criteria")]
pub enum Selector {
    /// CSS selector (most common).
    ///
    /// # Example
    /// ```ignore
    /// Selector::css("#login-button")
    /// Selector::css("button.primary")
    /// ```
    #[serde(rename = "css")]
    Css(String),

    /// XPath expression.
    ///
    /// # Example
    /// ```ignore
    /// Selector::xpath("//button[@type='submit']")
    /// ```
    #[serde(rename = "xpath")]
    XPath(String),

    /// Element ID (shorthand for `#id` CSS selector).
    #[serde(rename = "id")]
    Id(String),

    /// Name attribute (shorthand for `[name='...']`).
    #[serde(rename = "name")]
    Name(String),

    /// Class name (single class).
    #[serde(rename = "class")]
    Class(String),

    /// Tag name.
    #[serde(rename = "tag")]
    Tag(String),

    /// Link text (for `<a>` elements).
    #[serde(rename = "linkText")]
    LinkText(String),

    /// Partial link text (for `<a>` elements).
    #[serde(rename = "partialLinkText")]
    PartialLinkText(String),
}

impl Selector {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a name attribute selector.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Creates a link text selector.
    #[inline]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Creates a partial link text selector.
    #[inline]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }

    /// Returns the mechanism name for the remote protocol.
    #[must_use]
    pub fn mechanism(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::Class(_) => "class",
            Self::Tag(_) => "tag",
            Self::LinkText(_) => "linkText",
            Self::PartialLinkText(_) => "partialLinkText",
        }
    }

    /// Returns the selector criteria.
    #[must_use]
    pub fn criteria(&self) -> &str {
        match self {
            Self::Css(v)
            | Self::XPath(v)
            | Self::Id(v)
            | Self::Name(v)
            | Self::Class(v)
            | Self::Tag(v)
            | Self::LinkText(v)
            | Self::PartialLinkText(v) => v,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Selector {
    /// Formats as `mechanism:criteria`, the form used in error context.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.mechanism(), self.criteria())
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for Selector {
    /// Converts a string to a CSS selector (default mechanism).
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for Selector {
    /// Converts a string to a CSS selector (default mechanism).
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
