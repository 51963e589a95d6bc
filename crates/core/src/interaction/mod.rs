//! Pointer interaction for landmark editing.
//!
//! This module resolves raw pointer presses, moves and releases into landmark
//! gestures: select, drag, box-select, selection-box resize, snap placement
//! and insertion.
//!
//! # Architecture
//!
//! - [`event`]: pointer events and modifiers
//! - [`viewport`]: the [`Viewport`] trait the controller queries and commands
//! - [`state`]: the [`Gesture`] state machine
//! - [`controller`]: gesture resolution and drag tracking
//! - [`targeting`]: hover targeting for snap placement
//!
//! # Usage
//!
//! ```ignore
//! use landmark_core::interaction::{MouseController, PointerEvent};
//!
//! let mut controller = MouseController::new();
//! controller.on_pointer_down(&mut scene, PointerEvent::primary(pos));
//! controller.on_pointer_move(&mut scene, PointerEvent::primary(next));
//! controller.on_pointer_up(&mut scene, PointerEvent::primary(next));
//! ```

pub mod controller;
pub mod event;
pub mod state;
mod targeting;
pub mod viewport;

pub use controller::{MouseController, CLICK_TOLERANCE};
pub use event::{Modifiers, PointerButton, PointerEvent};
pub use state::{Gesture, HandleResize, LandmarkDrag};
pub use viewport::{HitObject, HitTarget, Intersection, Viewport};
