// Copyright 2026 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Figura View: the device-input side of the billboard pipeline.
//!
//! [`ViewController`] turns raw pointer/touch positions in device pixels
//! into scene interactions. It owns the two transforms between the three
//! coordinate spaces involved:
//!
//! - **device** space: pixels, origin top-left, Y down;
//! - **logical screen** space: the surface mapped so its shorter axis spans
//!   a configured range (±1 by default), origin centered, Y up;
//! - **view** space: logical screen space adjusted by the camera's pan/zoom
//!   ([`figura_matrix::ViewMatrix`]).
//!
//! Drags are delivered in view space (through the camera inverse) so the
//! model follows the pointer regardless of zoom; taps are delivered in
//! logical screen space, matching the space hit areas are defined in.
//!
//! ## Minimal wiring
//!
//! ```rust
//! use figura_matrix::Matrix44;
//! use figura_scene::{
//!     Model, ModelSetting, MotionFinished, MotionPriority, SceneConfig, SceneManager,
//! };
//! use figura_view::{ViewConfig, ViewController};
//!
//! struct Puppet;
//!
//! impl Model for Puppet {
//!     fn is_ready(&self) -> bool {
//!         true
//!     }
//!     fn load_assets(&mut self, _dir: &str, _file_name: &str) {}
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
//! scene.load_model(Puppet, "Haru", "resources/");
//!
//! let mut view = ViewController::new(scene, ViewConfig::default());
//! assert!(view.resize(800.0, 600.0));
//!
//! // Host event dispatch, in device pixels:
//! view.on_touches_began(400.0, 300.0);
//! view.on_touches_moved(420.0, 300.0);
//! view.on_touches_ended(420.0, 300.0);
//!
//! // Host frame callback:
//! view.tick(16);
//! view.render();
//! ```
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod controller;

pub use controller::{SurfaceSize, ViewConfig, ViewController};
