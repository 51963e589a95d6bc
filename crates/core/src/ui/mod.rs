//! User interface components for the landmarker.
//!
//! This module provides the annotator window: a mesh canvas driven by the
//! [`MouseController`](crate::interaction::MouseController) and a side panel
//! listing landmarks.
//!
//! # Architecture
//!
//! The UI is split into focused submodules:
//! - [`settings`]: User preferences and persistence
//! - [`input`]: egui input to pointer event translation
//! - [`rendering`]: Drawing utilities for the mesh, markers and overlays
//! - [`annotator`]: Main application logic
//!
//! # Usage
//!
//! ```ignore
//! use landmark_core::{ui, Config, Scene};
//!
//! let config = Config::load()?;
//! let scene = Scene::from_config(&config)?;
//!
//! // Blocks until the window is closed
//! ui::run_annotator(scene, ui::Settings::load())?;
//! ```

mod annotator;
mod input;
mod rendering;
mod settings;

// Public API exports
pub use annotator::Annotator;
pub use input::{canvas_inputs, CanvasInput};
pub use settings::Settings;

use crate::error::Result;
use crate::scene::Scene;

/// Launches the annotator window over `scene`.
///
/// # Arguments
/// * `scene` - The mesh and landmarks to edit
/// * `settings` - Interaction preferences; changes made in the window are
///   persisted as they happen
///
/// # Returns
/// - `Ok(())` - The window was closed
/// - `Err(e)` - The window could not be created
pub fn run_annotator(scene: Scene, settings: Settings) -> Result<()> {
    annotator::run(scene, settings)
}
