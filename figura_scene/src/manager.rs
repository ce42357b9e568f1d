// Copyright 2026 the Figura Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use figura_matrix::Matrix44;
use log::debug;

use crate::deferred::{DeferredQueue, TimerToken};
use crate::model::{Model, MotionPriority};

/// Callback replacing the built-in tap dispatch, invoked with the tap point
/// in logical-screen coordinates.
pub type TapHandler = Box<dyn FnMut(f64, f64)>;

/// Reaction and timing configuration for a [`SceneManager`].
///
/// The defaults mirror the conventional billboard-avatar setup: tapping the
/// head swaps the expression, tapping the body plays a reaction motion, and
/// an applied expression drifts back to the default after five seconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneConfig {
    /// Hit area checked first on tap.
    pub hit_area_head: String,
    /// Hit area checked second on tap.
    pub hit_area_body: String,
    /// Motion group a body tap starts a random motion from.
    pub tap_body_motion_group: String,
    /// Priority of body-tap motions.
    pub tap_body_priority: MotionPriority,
    /// Whether expressions drift back to the default expression.
    pub expression_reset_enabled: bool,
    /// Delay before an armed expression reset fires.
    pub expression_reset_delay_ms: u64,
    /// Delay after a model load before the default expression is resolved
    /// from its settings.
    pub default_expression_resolve_delay_ms: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            hit_area_head: String::from("Head"),
            hit_area_body: String::from("Body"),
            tap_body_motion_group: String::from("TapBody"),
            tap_body_priority: MotionPriority::Normal,
            expression_reset_enabled: true,
            expression_reset_delay_ms: 5000,
            default_expression_resolve_delay_ms: 200,
        }
    }
}

/// A named motion group and its motion file names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MotionGroup {
    /// Group name.
    pub name: String,
    /// Motion file names, in settings order.
    pub files: Vec<String>,
}

/// A named expression and its backing file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionInfo {
    /// Expression name.
    pub name: String,
    /// Expression file name.
    pub file: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeferredAction {
    ResolveDefaultExpression,
    ResetExpression,
}

/// Owns the single active [`Model`] and drives it from taps, drags, and the
/// frame loop.
///
/// The manager holds the scene's pan/zoom state (`x`, `y`, `scale`), an
/// optional camera matrix copied in via [`SceneManager::set_view_matrix`],
/// and at most one model. Replacing the model always releases the previous
/// one first, and every model-dependent operation degrades to a no-op while
/// no model is present or the present model is not ready yet — nothing here
/// panics on an empty scene.
///
/// Deferred work (default-expression resolution after a load, expression
/// reset after a reaction) is tracked with cancellable countdown timers
/// advanced by [`SceneManager::tick`]; releasing the model cancels them, so
/// a release racing an in-flight load never applies partial state.
pub struct SceneManager<M> {
    config: SceneConfig,
    model: Option<M>,
    view_matrix: Option<Matrix44>,
    x: f64,
    y: f64,
    scale: f64,
    on_tap_override: Option<TapHandler>,
    deferred: DeferredQueue<DeferredAction>,
    resolve_token: Option<TimerToken>,
    reset_token: Option<TimerToken>,
    default_expression: Option<String>,
}

impl<M: Model> SceneManager<M> {
    /// Creates an empty scene with the given configuration.
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            model: None,
            view_matrix: None,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            on_tap_override: None,
            deferred: DeferredQueue::default(),
            resolve_token: None,
            reset_token: None,
            default_expression: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Returns the active model, if any.
    #[must_use]
    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    /// Returns the active model mutably, if any.
    pub fn model_mut(&mut self) -> Option<&mut M> {
        self.model.as_mut()
    }

    /// Returns the horizontal pan offset.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the vertical pan offset.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns the zoom factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Sets the horizontal pan offset.
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Sets the vertical pan offset.
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Sets both pan offsets.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Sets the zoom factor.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Installs (or with `None`, removes) a tap handler that fully replaces
    /// the built-in hit-test dispatch.
    pub fn set_on_tap_override(&mut self, handler: Option<TapHandler>) {
        self.on_tap_override = handler;
    }

    /// Returns the resolved default expression name, once known.
    #[must_use]
    pub fn default_expression(&self) -> Option<&str> {
        self.default_expression.as_deref()
    }

    /// Releases the current model (if any) and installs `model`, bound to
    /// the asset directory `{path}{name}/` and the settings file
    /// `{name}.model3.json` within it.
    ///
    /// Loading is asynchronous: the model starts receiving update/draw calls
    /// only once it reports ready. Issuing another load while one is still
    /// in flight is not coordinated here; see the crate docs for the caller
    /// contract.
    pub fn load_model(&mut self, mut model: M, name: &str, path: &str) {
        self.release_all_models();
        debug!("model load: {path}{name}");

        let dir = format!("{path}{name}/");
        let file_name = format!("{name}.model3.json");
        model.load_assets(&dir, &file_name);
        self.model = Some(model);

        self.resolve_token = Some(self.deferred.schedule(
            self.config.default_expression_resolve_delay_ms,
            DeferredAction::ResolveDefaultExpression,
        ));
    }

    /// Releases the active model and drops it.
    ///
    /// Safe to call mid-load: pending deferred actions are cancelled along
    /// with the model they referred to, so nothing fires against a released
    /// or half-loaded model.
    pub fn release_all_models(&mut self) {
        if let Some(mut model) = self.model.take() {
            model.release();
        }
        self.deferred.clear();
        self.resolve_token = None;
        self.reset_token = None;
        self.default_expression = None;
    }

    /// Forwards a drag position in view coordinates to the model.
    pub fn on_drag(&mut self, x: f64, y: f64) {
        if let Some(model) = self.model.as_mut()
            && model.is_ready()
        {
            model.set_dragging(x, y);
        }
    }

    /// Dispatches a tap at logical-screen coordinates.
    ///
    /// With an override installed, the override is the only thing that runs.
    /// Otherwise the head area is tested before the body area and at most
    /// one reaction fires per tap.
    pub fn on_tap(&mut self, x: f64, y: f64) {
        debug!("tap point: ({x:.2}, {y:.2})");

        if let Some(handler) = self.on_tap_override.as_mut() {
            handler(x, y);
            return;
        }

        let Some(model) = self.model.as_mut() else {
            return;
        };
        if !model.is_ready() {
            return;
        }

        if model.hit_test(&self.config.hit_area_head, x, y) {
            debug!("hit area: [{}]", self.config.hit_area_head);
            model.set_random_expression();
            self.arm_expression_reset();
        } else if model.hit_test(&self.config.hit_area_body, x, y) {
            debug!("hit area: [{}]", self.config.hit_area_body);
            model.start_random_motion(
                &self.config.tap_body_motion_group,
                self.config.tap_body_priority,
                Some(Box::new(|| debug!("motion finished"))),
            );
        }
    }

    /// Updates and draws the model for one frame on a `width`×`height`
    /// surface.
    ///
    /// The projection is composed fresh every frame: pan, then uniform zoom,
    /// then the camera matrix when one has been set. The model consumes the
    /// projection and may mutate it while drawing.
    pub fn on_update(&mut self, width: f64, height: f64) {
        let Some(model) = self.model.as_mut() else {
            return;
        };
        if !model.is_ready() {
            return;
        }

        let mut projection = Matrix44::IDENTITY;
        projection.translate_relative(self.x, self.y);

        if model.canvas_width() > 1.0 && width < height {
            // A wide model on a portrait surface renders at model width 2;
            // the zoom itself stays uniform either way.
            model.set_model_width(2.0);
            projection.scale_relative(self.scale, self.scale);
        } else {
            projection.scale_relative(self.scale, self.scale);
        }

        if let Some(view) = &self.view_matrix {
            projection.multiply(view);
        }

        model.update();
        model.draw(projection);
    }

    /// Copies `matrix` into the camera matrix, element by element.
    ///
    /// The manager never holds a reference to the caller's matrix; mutating
    /// it after this call has no effect on the scene.
    pub fn set_view_matrix(&mut self, matrix: &Matrix44) {
        match &mut self.view_matrix {
            Some(view) => view.set_array(matrix.as_array()),
            None => self.view_matrix = Some(matrix.clone()),
        }
    }

    /// Arms the expression-reset timer.
    ///
    /// Does nothing unless resets are enabled, a model is present, the
    /// default expression has been resolved, and no reset is already
    /// pending. Fires [`Model::set_expression`] with the default expression
    /// after the configured delay.
    pub fn arm_expression_reset(&mut self) {
        if !self.config.expression_reset_enabled
            || self.reset_token.is_some()
            || self.default_expression.is_none()
            || self.model.is_none()
        {
            return;
        }
        self.reset_token = Some(self.deferred.schedule(
            self.config.expression_reset_delay_ms,
            DeferredAction::ResetExpression,
        ));
    }

    /// Advances deferred actions by `delta_ms` milliseconds of host time.
    ///
    /// Call once per frame with the elapsed time since the previous call.
    pub fn tick(&mut self, delta_ms: u64) {
        for action in self.deferred.tick(delta_ms) {
            match action {
                DeferredAction::ResolveDefaultExpression => {
                    self.resolve_token = None;
                    self.resolve_default_expression();
                }
                DeferredAction::ResetExpression => {
                    self.reset_token = None;
                    self.reset_expression();
                }
            }
        }
    }

    /// Returns the motion groups of the active model's settings.
    ///
    /// Empty while no model is present or its settings are not loaded yet.
    #[must_use]
    pub fn motions(&self) -> Vec<MotionGroup> {
        let Some(setting) = self.model.as_ref().and_then(|m| m.setting()) else {
            return Vec::new();
        };
        (0..setting.motion_group_count())
            .map(|group_index| {
                let name = setting.motion_group_name(group_index).to_string();
                let files = (0..setting.motion_count(&name))
                    .map(|i| setting.motion_file_name(&name, i).to_string())
                    .collect();
                MotionGroup { name, files }
            })
            .collect()
    }

    /// Returns the expressions of the active model's settings.
    ///
    /// Empty while no model is present or its settings are not loaded yet.
    #[must_use]
    pub fn expressions(&self) -> Vec<ExpressionInfo> {
        let Some(setting) = self.model.as_ref().and_then(|m| m.setting()) else {
            return Vec::new();
        };
        (0..setting.expression_count())
            .map(|i| ExpressionInfo {
                name: setting.expression_name(i).to_string(),
                file: setting.expression_file_name(i).to_string(),
            })
            .collect()
    }

    /// Starts motion `index` of `group` on the active model.
    ///
    /// Returns `false` when no model is present.
    pub fn start_motion(&mut self, group: &str, index: usize, priority: MotionPriority) -> bool {
        let Some(model) = self.model.as_mut() else {
            return false;
        };
        model.start_motion(group, index, priority);
        true
    }

    /// Applies the named expression on the active model.
    ///
    /// Returns `false` when no model is present.
    pub fn set_expression(&mut self, name: &str) -> bool {
        let Some(model) = self.model.as_mut() else {
            return false;
        };
        model.set_expression(name);
        true
    }

    /// Resolves the default expression from the model settings: an
    /// expression named `normal` (case-insensitive) wins, otherwise the
    /// first one listed.
    fn resolve_default_expression(&mut self) {
        let resolved = {
            let Some(model) = self.model.as_ref() else {
                return;
            };
            let Some(setting) = model.setting() else {
                debug!("no expression");
                return;
            };
            let count = setting.expression_count();
            if count == 0 {
                debug!("no expression");
                return;
            }
            let named = (0..count)
                .map(|i| setting.expression_name(i))
                .find(|name| name.eq_ignore_ascii_case("normal"));
            match named {
                Some(name) => name.to_string(),
                None => {
                    debug!("default expression not found, using first");
                    setting.expression_name(0).to_string()
                }
            }
        };
        self.default_expression = Some(resolved);
    }

    fn reset_expression(&mut self) {
        let Some(name) = self.default_expression.clone() else {
            return;
        };
        if let Some(model) = self.model.as_mut()
            && model.is_ready()
        {
            debug!("expression reset: {name}");
            model.set_expression(&name);
        }
    }
}

impl<M: Model> Default for SceneManager<M> {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl<M> fmt::Debug for SceneManager<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneManager")
            .field("config", &self.config)
            .field("has_model", &self.model.is_some())
            .field("x", &self.x)
            .field("y", &self.y)
            .field("scale", &self.scale)
            .field("has_view_matrix", &self.view_matrix.is_some())
            .field("has_on_tap_override", &self.on_tap_override.is_some())
            .field("default_expression", &self.default_expression)
            .finish_non_exhaustive()
    }
}
