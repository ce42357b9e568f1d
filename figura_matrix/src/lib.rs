// Copyright 2026 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Figura Matrix: affine matrices for a 2D billboard camera.
//!
//! This crate provides the two matrix types used by the Figura input-to-scene
//! pipeline:
//!
//! - [`Matrix44`]: a 4×4 column-major affine matrix of which only the 2D
//!   subspace (axis-aligned scale and translation) is exercised. It is the
//!   render-facing representation: its raw element array is what gets copied
//!   into a projection uniform.
//! - [`ViewMatrix`]: a [`Matrix44`] acting as the camera, with a clamped
//!   scale range and a clamped logical screen rectangle so pan/zoom can never
//!   push the visible region outside a configured outer rectangle.
//!
//! Composition uses right-multiply semantics throughout: operations such as
//! [`Matrix44::scale_relative`] and [`Matrix44::translate_relative`] compose
//! the new transform *in front* of the existing one, so the transform applied
//! last in code is applied to a point first.
//!
//! ## Minimal example
//!
//! Building the device→screen mapping for an 800×600 surface whose shorter
//! axis spans two logical units, with device Y growing downward and logical Y
//! growing upward:
//!
//! ```rust
//! use figura_matrix::Matrix44;
//!
//! let mut device_to_screen = Matrix44::IDENTITY;
//! device_to_screen.scale_relative(2.0 / 600.0, -2.0 / 600.0);
//! device_to_screen.translate_relative(-400.0, -300.0);
//!
//! // The surface center maps to the logical origin.
//! assert!(device_to_screen.transform_x(400.0).abs() < 1e-9);
//! assert!(device_to_screen.transform_y(300.0).abs() < 1e-9);
//! // The device top edge maps to positive (upward) logical Y.
//! assert!(device_to_screen.transform_y(0.0) > 0.0);
//! ```
//!
//! ## Camera example
//!
//! ```rust
//! use figura_matrix::ViewMatrix;
//!
//! let mut camera = ViewMatrix::new();
//! camera.set_screen_rect(-1.0, 1.0, -1.0, 1.0);
//! camera.set_max_screen_rect(-2.0, 2.0, -2.0, 2.0);
//! camera.set_min_scale(0.8);
//! camera.set_max_scale(2.0);
//!
//! // Zoom requests are clamped to the configured range.
//! camera.scale(5.0, 5.0);
//! assert_eq!(camera.scale_x(), 2.0);
//! assert!(camera.is_max_scale());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod matrix44;
mod view_matrix;

pub use matrix44::Matrix44;
pub use view_matrix::{LogicalRect, ViewMatrix};
