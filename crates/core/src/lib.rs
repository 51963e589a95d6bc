//! Landmark Core Library
//!
//! This library provides the core functionality for the landmarker annotation
//! tool: placing, selecting and moving labeled point landmarks on a 3D mesh
//! with the mouse.
//!
//! # Overview
//!
//! Raw pointer presses, moves and releases are resolved into one gesture
//! each (select, drag, box-select, selection-box resize, snap placement or
//! insertion) and turned into undoable landmark edits. The library handles:
//!
//! - **Interaction**: the gesture state machine via [`interaction`]
//! - **Geometry**: screen-space points and the selection box via [`geometry`]
//!   and [`selection_box`]
//! - **Search**: nearest-landmark queries via [`nearest`]
//! - **Scene**: a headless camera, mesh and landmark collection via [`scene`]
//! - **User Interface**: the annotator window via [`ui`]
//!
//! # Quick Start
//!
//! ```ignore
//! use landmark_core::{Config, Scene};
//!
//! let config = Config::load()?;
//! let mut scene = Scene::from_config(&config)?;
//! scene.seed_ring(6);
//!
//! landmark_core::ui::run_annotator(scene, landmark_core::ui::Settings::load())?;
//! ```
//!
//! # Module Structure
//!
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`geometry`]: Screen-space vector type
//! - [`interaction`]: Pointer gesture resolution
//! - [`landmark`]: Landmark records and drag snapshots
//! - [`nearest`]: Nearest-landmark search
//! - [`scene`]: Headless viewport implementation
//! - [`selection_box`]: Selection box and its handles
//! - [`ui`]: User interface components

pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod landmark;
pub mod nearest;
pub mod scene;
pub mod selection_box;
pub mod ui;

// Re-export primary types for convenience
pub use config::Config;
pub use error::{AppError, Result};
pub use geometry::Vector2D;
pub use interaction::{MouseController, PointerEvent, Viewport};
pub use landmark::Landmark;
pub use scene::Scene;
pub use selection_box::SelectionBox;

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup before using any other functions.
/// This loads `.env` files if present.
pub fn init() {
    let _ = dotenvy::dotenv();
}
