//! The interaction processor.
//!
//! A [`Pilot`] binds one remote session, one tab registry, and one
//! clock into a sequential engine of deadline-bounded operations.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Pilot struct, construction, focus re-assertion |
//! | `config` | Timing parameters and defaults |
//! | `element` | Located-element handles |
//! | `elements` | Finders, waiters, property reads |
//! | `tabs` | Tab registry and lifecycle |
//! | `navigation` | URL loading with retry |
//! | `alerts` | Alert dialogs |
//! | `forms` | Text, checkbox, and select helpers |

// ============================================================================
// Submodules
// ============================================================================

mod alerts;
mod config;
mod core;
mod element;
mod elements;
mod forms;
mod navigation;
mod tabs;

// ============================================================================
// Re-exports
// ============================================================================

pub use alerts::Alert;
pub use config::{INDEFINITE_WAIT, PilotConfig};
pub use self::core::Pilot;
pub use element::Element;
pub use elements::ReadOptions;
pub use navigation::NavigateOptions;
