// Copyright 2026 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Figura Event State: touch state tracking for the input pipeline.
//!
//! This crate provides [`TouchTracker`], a small state machine recording a
//! single pointer's begin/move/end cycle in raw device coordinates. It does
//! not interpret gestures, apply coordinate transforms, or assume any event
//! source; a higher layer feeds it positions and reads back the last tracked
//! point when dispatching drags and taps.
//!
//! ## Minimal example
//!
//! ```rust
//! use figura_event_state::TouchTracker;
//!
//! let mut touch = TouchTracker::default();
//!
//! touch.touches_began(400.0, 300.0);
//! assert!(touch.is_dragging());
//!
//! touch.touches_moved(420.0, 300.0);
//! assert_eq!(touch.x(), 420.0);
//!
//! // Ending the cycle returns to idle; the last position stays readable
//! // until the next begin.
//! touch.touches_ended();
//! assert!(!touch.is_dragging());
//! assert_eq!(touch.x(), 420.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod touch;

pub use touch::TouchTracker;
