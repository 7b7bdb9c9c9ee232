//! # User Interface Module
//!
//! Dear ImGui-based debug panel.
//!
//! ## Key Components
//!
//! - [`ControlPanel`] - Folders of controls bound to a context value
//! - [`Control`] - One bound number, toggle, color or button
//! - [`UiManager`] - ImGui integration with winit and wgpu
//!
//! ## Usage
//!
//! ```no_run
//! use lumen::ui::{ControlPanel, PanelConfig};
//!
//! struct Debug {
//!     y: f32,
//! }
//!
//! let mut panel = ControlPanel::<Debug>::new(PanelConfig::new("Debug").with_width(220.0));
//! panel
//!     .add_folder("Tweaks")
//!     .add_number("y", |d: &Debug| d.y, |d, v| d.y = v)
//!     .range(-1.5, 1.5);
//! ```
//!
//! ## Input Handling
//!
//! Input the UI wants to capture never reaches the orbit controls.

pub mod control;
pub mod manager;
pub mod panel;

pub use control::{Control, ControlInput, ControlKind, ControlValue};
pub use manager::UiManager;
pub use panel::{ControlPanel, Folder, PanelConfig};
