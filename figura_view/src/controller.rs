// Copyright 2026 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use log::{debug, warn};

use figura_event_state::TouchTracker;
use figura_matrix::{LogicalRect, Matrix44, ViewMatrix};
use figura_scene::{Model, SceneManager};

/// Pixel dimensions of the rendering surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
    /// Width in device pixels.
    pub width: f64,
    /// Height in device pixels.
    pub height: f64,
}

impl SurfaceSize {
    /// Creates a surface size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `true` when either dimension is zero or negative.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Logical-view constants for a [`ViewController`].
///
/// The defaults describe a camera whose shorter surface axis spans the
/// logical range `[-1, 1]`, zoomable between 0.8× and 2× and pannable within
/// an outer `[-2, 2]` square.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewConfig {
    /// Initial camera zoom applied on every (re)initialization.
    pub view_scale: f64,
    /// Upper camera zoom bound.
    pub max_scale: f64,
    /// Lower camera zoom bound.
    pub min_scale: f64,
    /// Logical Y of the surface bottom edge (shorter-axis extent).
    pub logical_bottom: f64,
    /// Logical Y of the surface top edge (shorter-axis extent).
    pub logical_top: f64,
    /// Outer rectangle the camera's visible region may never leave.
    pub logical_max: LogicalRect,
    /// Emit a debug log line for each completed tap.
    pub debug_touch_log: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            view_scale: 1.0,
            max_scale: 2.0,
            min_scale: 0.8,
            logical_bottom: -1.0,
            logical_top: 1.0,
            logical_max: LogicalRect::new(-2.0, 2.0, -2.0, 2.0),
            debug_touch_log: false,
        }
    }
}

/// Translates raw device-pixel input into scene interactions.
///
/// The controller owns the two transforms of the input pipeline — the
/// device→screen matrix derived from the surface size and the pan/zoom
/// [`ViewMatrix`] — plus the [`TouchTracker`] and the [`SceneManager`] that
/// consumes the translated events.
///
/// Construction leaves both transforms at identity; call
/// [`ViewController::resize`] with the real surface size before dispatching
/// input, and again whenever the surface changes size.
#[derive(Debug)]
pub struct ViewController<M> {
    config: ViewConfig,
    scene: SceneManager<M>,
    touch: TouchTracker,
    device_to_screen: Matrix44,
    view_matrix: ViewMatrix,
    surface: SurfaceSize,
}

impl<M: Model> ViewController<M> {
    /// Creates a controller dispatching into `scene`.
    #[must_use]
    pub fn new(scene: SceneManager<M>, config: ViewConfig) -> Self {
        Self {
            config,
            scene,
            touch: TouchTracker::default(),
            device_to_screen: Matrix44::IDENTITY,
            view_matrix: ViewMatrix::new(),
            surface: SurfaceSize::default(),
        }
    }

    /// Rebuilds the transform chain for a `width`×`height` surface.
    ///
    /// A zero dimension on either axis is rejected: the call returns `false`
    /// and mutates nothing. Otherwise the camera screen rect is derived from
    /// the surface aspect ratio, the camera zoom is reset to
    /// [`ViewConfig::view_scale`], and the device→screen matrix maps the
    /// surface onto logical coordinates with a uniform scale from the
    /// shorter axis, Y inverted and the origin at the surface center.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if width <= 0.0 || height <= 0.0 {
            warn!("surface size cannot be zero: {width}x{height}");
            return false;
        }
        self.surface = SurfaceSize::new(width, height);

        let ratio = width / height;
        let (left, right) = (-ratio, ratio);
        let (bottom, top) = (self.config.logical_bottom, self.config.logical_top);
        self.view_matrix.set_screen_rect(left, right, bottom, top);
        self.view_matrix
            .scale(self.config.view_scale, self.config.view_scale);

        self.device_to_screen.load_identity();
        let k = if width > height {
            (right - left).abs() / width
        } else {
            (top - bottom).abs() / height
        };
        self.device_to_screen.scale_relative(k, -k);
        self.device_to_screen
            .translate_relative(-width * 0.5, -height * 0.5);

        self.view_matrix.set_max_scale(self.config.max_scale);
        self.view_matrix.set_min_scale(self.config.min_scale);
        let max = self.config.logical_max;
        self.view_matrix
            .set_max_screen_rect(max.left, max.right, max.bottom, max.top);
        true
    }

    /// Begins a touch cycle at raw device coordinates.
    pub fn on_touches_began(&mut self, point_x: f64, point_y: f64) {
        self.touch.touches_began(point_x, point_y);
    }

    /// Dispatches a pointer move at raw device coordinates.
    ///
    /// The drag is delivered with the position tracked *before* this event,
    /// transformed into view space: the delta the model follows always
    /// refers to the previous frame's position.
    pub fn on_touches_moved(&mut self, point_x: f64, point_y: f64) {
        let prev = self.transform_view(self.touch.last());
        self.touch.touches_moved(point_x, point_y);
        self.scene.on_drag(prev.x, prev.y);
    }

    /// Ends the touch cycle and dispatches a single tap.
    ///
    /// The drag state is cleared first. The release point is the last
    /// *tracked* position (the arguments only complete the host event
    /// signature), mapped through the device→screen matrix alone — tap
    /// coordinates are logical-screen space, not pan/zoom-adjusted view
    /// space.
    pub fn on_touches_ended(&mut self, _point_x: f64, _point_y: f64) {
        self.scene.on_drag(0.0, 0.0);
        self.touch.touches_ended();

        let tap = self.transform_screen(self.touch.last());
        if self.config.debug_touch_log {
            debug!("touches ended x: {} y: {}", tap.x, tap.y);
        }
        self.scene.on_tap(tap.x, tap.y);
    }

    /// Runs one frame: copies the camera into the scene and updates/draws
    /// the model for the current surface size.
    pub fn render(&mut self) {
        self.scene.set_view_matrix(self.view_matrix.matrix());
        self.scene.on_update(self.surface.width, self.surface.height);
    }

    /// Advances the scene's deferred actions by `delta_ms` milliseconds.
    pub fn tick(&mut self, delta_ms: u64) {
        self.scene.tick(delta_ms);
    }

    /// Maps a device X coordinate into view space.
    #[must_use]
    pub fn transform_view_x(&self, device_x: f64) -> f64 {
        self.view_matrix
            .invert_transform_x(self.device_to_screen.transform_x(device_x))
    }

    /// Maps a device Y coordinate into view space.
    #[must_use]
    pub fn transform_view_y(&self, device_y: f64) -> f64 {
        self.view_matrix
            .invert_transform_y(self.device_to_screen.transform_y(device_y))
    }

    /// Maps a device point into view space.
    #[must_use]
    pub fn transform_view(&self, device: Point) -> Point {
        Point::new(
            self.transform_view_x(device.x),
            self.transform_view_y(device.y),
        )
    }

    /// Maps a device X coordinate into logical-screen space.
    #[must_use]
    pub fn transform_screen_x(&self, device_x: f64) -> f64 {
        self.device_to_screen.transform_x(device_x)
    }

    /// Maps a device Y coordinate into logical-screen space.
    #[must_use]
    pub fn transform_screen_y(&self, device_y: f64) -> f64 {
        self.device_to_screen.transform_y(device_y)
    }

    /// Maps a device point into logical-screen space.
    #[must_use]
    pub fn transform_screen(&self, device: Point) -> Point {
        self.device_to_screen.transform_point(device)
    }

    /// Returns the scene manager.
    #[must_use]
    pub fn scene(&self) -> &SceneManager<M> {
        &self.scene
    }

    /// Returns the scene manager mutably; the public control surface
    /// (pan/zoom setters, tap override, model loads) lives there.
    pub fn scene_mut(&mut self) -> &mut SceneManager<M> {
        &mut self.scene
    }

    /// Returns the camera matrix.
    #[must_use]
    pub fn view_matrix(&self) -> &ViewMatrix {
        &self.view_matrix
    }

    /// Returns the camera matrix mutably, for explicit pan/zoom gestures.
    pub fn view_matrix_mut(&mut self) -> &mut ViewMatrix {
        &mut self.view_matrix
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the current surface size.
    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use figura_scene::{ModelSetting, MotionFinished, MotionPriority, SceneConfig};

    #[derive(Default)]
    struct Calls {
        dragging: Vec<(f64, f64)>,
        head_tests: Vec<(f64, f64)>,
        random_expressions: usize,
        random_motions: usize,
        draws: usize,
    }

    struct SpyModel {
        calls: Rc<RefCell<Calls>>,
        hit_head: bool,
    }

    impl figura_scene::Model for SpyModel {
        fn is_ready(&self) -> bool {
            true
        }
        fn load_assets(&mut self, _dir: &str, _file_name: &str) {}
        fn release(&mut self) {}
        fn update(&mut self) {}
        fn draw(&mut self, _projection: Matrix44) {
            self.calls.borrow_mut().draws += 1;
        }
        fn hit_test(&self, area_name: &str, x: f64, y: f64) -> bool {
            if area_name == "Head" {
                self.calls.borrow_mut().head_tests.push((x, y));
                self.hit_head
            } else {
                false
            }
        }
        fn set_dragging(&mut self, x: f64, y: f64) {
            self.calls.borrow_mut().dragging.push((x, y));
        }
        fn canvas_width(&self) -> f64 {
            1.0
        }
        fn set_model_width(&mut self, _width: f64) {}
        fn set_random_expression(&mut self) {
            self.calls.borrow_mut().random_expressions += 1;
        }
        fn set_expression(&mut self, _name: &str) {}
        fn start_random_motion(
            &mut self,
            _group: &str,
            _priority: MotionPriority,
            _on_finish: Option<MotionFinished>,
        ) {
            self.calls.borrow_mut().random_motions += 1;
        }
        fn start_motion(&mut self, _group: &str, _index: usize, _priority: MotionPriority) {}
        fn setting(&self) -> Option<&dyn ModelSetting> {
            None
        }
    }

    fn controller_with_model(hit_head: bool) -> (ViewController<SpyModel>, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut scene = SceneManager::new(SceneConfig::default());
        scene.load_model(
            SpyModel {
                calls: Rc::clone(&calls),
                hit_head,
            },
            "A",
            "r/",
        );
        let mut view = ViewController::new(scene, ViewConfig::default());
        assert!(view.resize(800.0, 600.0), "resize should succeed");
        (view, calls)
    }

    #[test]
    fn resize_rejects_zero_dimensions() {
        let scene: SceneManager<SpyModel> = SceneManager::new(SceneConfig::default());
        let mut view = ViewController::new(scene, ViewConfig::default());
        assert!(!view.resize(0.0, 600.0), "zero width is rejected");
        assert!(!view.resize(800.0, 0.0), "zero height is rejected");
        // Nothing was mutated: the chain is still identity.
        assert_eq!(view.surface(), SurfaceSize::default());
        assert_eq!(view.transform_screen_x(10.0), 10.0);
    }

    #[test]
    fn device_to_screen_centers_and_inverts_y() {
        let (view, _calls) = controller_with_model(false);
        let center = view.transform_screen(Point::new(400.0, 300.0));
        assert!(center.x.abs() < 1e-9);
        assert!(center.y.abs() < 1e-9);
        // Right edge lands at +aspect, top edge at +1 (logical Y up).
        assert!((view.transform_screen_x(800.0) - 800.0 / 600.0).abs() < 1e-9);
        assert!((view.transform_screen_y(0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn screen_view_round_trip() {
        let (view, _calls) = controller_with_model(false);
        let k = 2.0 / 600.0;
        for &(x, y) in &[(0.0, 0.0), (400.0, 300.0), (799.0, 1.0), (13.0, 599.0)] {
            // With the camera at its initial identity zoom, view coordinates
            // equal screen coordinates and the chain inverts exactly.
            let v = view.transform_view(Point::new(x, y));
            let back_x = v.x / k + 400.0;
            let back_y = v.y / -k + 300.0;
            assert!((back_x - x).abs() < 1e-6);
            assert!((back_y - y).abs() < 1e-6);
        }
    }

    #[test]
    fn drag_uses_previous_position() {
        let (mut view, calls) = controller_with_model(false);
        view.on_touches_began(400.0, 300.0);
        view.on_touches_moved(420.0, 300.0);

        // The first move reports the begin position (the surface center),
        // not the new pointer position.
        {
            let calls = calls.borrow();
            assert_eq!(calls.dragging.len(), 1, "one drag dispatched");
            let (x, y) = calls.dragging[0];
            assert!(x.abs() < 1e-9, "pre-move view X, got {x}");
            assert!(y.abs() < 1e-9, "pre-move view Y, got {y}");
        }

        // The second move reports where the first one went.
        view.on_touches_moved(440.0, 300.0);
        let calls = calls.borrow();
        let (x, _) = calls.dragging[1];
        assert!(
            (x - 20.0 * (2.0 / 600.0)).abs() < 1e-9,
            "second drag sees the first move's position, got {x}"
        );
    }

    #[test]
    fn ended_clears_drag_then_taps_in_screen_space() {
        let (mut view, calls) = controller_with_model(true);
        view.on_touches_began(10.0, 10.0);
        view.on_touches_ended(10.0, 10.0);

        let calls = calls.borrow();
        assert_eq!(calls.dragging.as_slice(), [(0.0, 0.0)], "drag cleared first");
        assert_eq!(calls.random_expressions, 1, "head tap fired once");
        assert_eq!(calls.random_motions, 0, "no body reaction");

        // The tap point went through device→screen only.
        let (x, y) = calls.head_tests[0];
        assert!((x - (10.0 - 400.0) * (2.0 / 600.0)).abs() < 1e-9);
        assert!((y - (10.0 - 300.0) * (-2.0 / 600.0)).abs() < 1e-9);
    }

    #[test]
    fn tap_point_ignores_camera_pan_zoom() {
        let (mut view, calls) = controller_with_model(true);
        // Pan and zoom the camera; taps must not be affected.
        view.view_matrix_mut().adjust_scale(0.0, 0.0, 1.5);
        view.view_matrix_mut().adjust_translate(0.3, 0.1);

        view.on_touches_began(400.0, 300.0);
        view.on_touches_ended(400.0, 300.0);

        let calls = calls.borrow();
        let (x, y) = calls.head_tests[0];
        assert!(x.abs() < 1e-9, "tap X stays in screen space, got {x}");
        assert!(y.abs() < 1e-9, "tap Y stays in screen space, got {y}");
    }

    #[test]
    fn drag_honors_camera_inverse() {
        let (mut view, calls) = controller_with_model(false);
        // Zoom in 2× around the origin: view coords shrink accordingly.
        view.view_matrix_mut().adjust_scale(0.0, 0.0, 2.0);

        view.on_touches_began(700.0, 300.0);
        view.on_touches_moved(710.0, 300.0);

        let calls = calls.borrow();
        let (x, _) = calls.dragging[0];
        let screen_x = (700.0 - 400.0) * (2.0 / 600.0);
        assert!(
            (x - screen_x / 2.0).abs() < 1e-9,
            "drag X is the camera-inverted screen X, got {x}"
        );
    }

    #[test]
    fn render_updates_and_draws_through_the_scene() {
        let (mut view, calls) = controller_with_model(false);
        view.render();
        assert_eq!(calls.borrow().draws, 1, "one frame drawn");
    }

    #[test]
    fn moves_before_begin_do_not_dispatch_spurious_positions() {
        let (mut view, calls) = controller_with_model(false);
        view.on_touches_moved(100.0, 100.0);
        // The tracker ignored the move; the drag was dispatched with the
        // tracker's (default) last position, and the model simply follows it.
        assert_eq!(calls.borrow().dragging.len(), 1, "drag is still dispatched");
        let (x, y) = calls.borrow().dragging[0];
        let origin = view.transform_view(Point::ZERO);
        assert!((x - origin.x).abs() < 1e-9);
        assert!((y - origin.y).abs() < 1e-9);
    }
}
