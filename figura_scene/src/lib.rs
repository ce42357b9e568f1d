// Copyright 2026 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Figura Scene: model lifecycle and reaction dispatch for a 2D billboard
//! scene.
//!
//! [`SceneManager`] owns at most one avatar [`Model`] at a time, together
//! with the scene's pan/zoom state and the camera matrix used when composing
//! the per-frame projection. It dispatches taps against the model's named
//! hit areas (head before body, first match wins), forwards drags, and keeps
//! deferred work — resolving the default expression shortly after a load,
//! drifting an applied expression back to the default — in cancellable
//! countdown timers advanced once per frame.
//!
//! The model itself is an external collaborator behind the [`Model`] trait:
//! this crate knows nothing about asset formats, textures, or animation
//! playback, only the narrow control surface it drives.
//!
//! ## Caller contract for loads
//!
//! Model loading is asynchronous relative to the frame loop:
//! [`SceneManager::load_model`] returns before assets are ready and the
//! manager treats a not-ready model as unloaded. Two things follow:
//!
//! - Issuing a second load while one is in flight is not coordinated here;
//!   callers either wait for readiness or accept that the superseded load's
//!   partially acquired resources are the collaborator's problem to free.
//! - Releasing the scene mid-load is safe: pending deferred actions are
//!   cancelled with the model, so nothing fires against released state.
//!
//! ## Minimal example
//!
//! ```rust
//! use figura_matrix::Matrix44;
//! use figura_scene::{
//!     Model, ModelSetting, MotionFinished, MotionPriority, SceneConfig, SceneManager,
//! };
//!
//! // A stand-in collaborator; a real one wraps the avatar runtime.
//! struct Puppet {
//!     ready: bool,
//! }
//!
//! impl Model for Puppet {
//!     fn is_ready(&self) -> bool {
//!         self.ready
//!     }
//!     fn load_assets(&mut self, _dir: &str, _file_name: &str) {
//!         self.ready = true;
//!     }
//!     fn release(&mut self) {}
//!     fn update(&mut self) {}
//!     fn draw(&mut self, _projection: Matrix44) {}
//!     fn hit_test(&self, _area_name: &str, _x: f64, _y: f64) -> bool {
//!         false
//!     }
//!     fn set_dragging(&mut self, _x: f64, _y: f64) {}
//!     fn canvas_width(&self) -> f64 {
//!         1.0
//!     }
//!     fn set_model_width(&mut self, _width: f64) {}
//!     fn set_random_expression(&mut self) {}
//!     fn set_expression(&mut self, _name: &str) {}
//!     fn start_random_motion(
//!         &mut self,
//!         _group: &str,
//!         _priority: MotionPriority,
//!         _on_finish: Option<MotionFinished>,
//!     ) {
//!     }
//!     fn start_motion(&mut self, _group: &str, _index: usize, _priority: MotionPriority) {}
//!     fn setting(&self) -> Option<&dyn ModelSetting> {
//!         None
//!     }
//! }
//!
//! let mut scene = SceneManager::new(SceneConfig::default());
//! scene.load_model(Puppet { ready: false }, "Haru", "resources/");
//! scene.set_scale(1.5);
//!
//! // Per frame: advance timers, then update and draw.
//! scene.tick(16);
//! scene.on_update(800.0, 600.0);
//! ```
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

pub mod deferred;
mod manager;
mod model;

pub use manager::{ExpressionInfo, MotionGroup, SceneConfig, SceneManager, TapHandler};
pub use model::{Model, ModelSetting, MotionFinished, MotionPriority};
