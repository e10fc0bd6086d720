//! Auto-framing viewport transform.
//!
//! The chain is untethered after loop closure and drifts under rhythm
//! forces; the camera keeps it in view with no user controls: each tick it
//! fits the padded node bounding box into the viewport (zoom hard-capped)
//! and eases toward that target with exponential smoothing.

use polyloop_math::Vec2;

/// Exponential smoothing factor per tick, in (0, 1].
pub const SMOOTHING: f64 = 0.08;
/// Hard zoom cap.
pub const MAX_SCALE: f64 = 2.0;
/// Padding added around the node bounding box, world units.
pub const PADDING: f64 = 60.0;

/// Current and target view transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Screen-space translation applied after scaling.
    pub translation: Vec2,
    /// Uniform zoom.
    pub scale: f64,
    pub target_translation: Vec2,
    pub target_scale: f64,
}

impl CameraState {
    fn identity() -> Self {
        Self {
            translation: Vec2::zeros(),
            scale: 1.0,
            target_translation: Vec2::zeros(),
            target_scale: 1.0,
        }
    }
}

/// Auto-bounding camera controller.
#[derive(Debug, Clone)]
pub struct CameraController {
    viewport: Vec2,
    state: CameraState,
}

impl CameraController {
    /// Camera for a viewport of the given pixel size.
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            viewport: Vec2::new(viewport_width, viewport_height),
            state: CameraState::identity(),
        }
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Resize the viewport (host window change).
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Vec2::new(width, height);
    }

    /// Recompute the target transform from the node bounding box and ease
    /// the current transform toward it. `None` bounds (empty chain) keep the
    /// previous target.
    pub fn update(&mut self, bounds: Option<(Vec2, Vec2)>) {
        if let Some((min, max)) = bounds {
            let padded_min = min - Vec2::new(PADDING, PADDING);
            let padded_max = max + Vec2::new(PADDING, PADDING);
            let size = padded_max - padded_min;

            let scale = (self.viewport.x / size.x)
                .min(self.viewport.y / size.y)
                .min(MAX_SCALE);
            let box_center = (padded_min + padded_max) / 2.0;

            self.state.target_scale = scale;
            self.state.target_translation = self.viewport / 2.0 - box_center * scale;
        }

        self.state.scale += (self.state.target_scale - self.state.scale) * SMOOTHING;
        self.state.translation +=
            (self.state.target_translation - self.state.translation) * SMOOTHING;
    }

    /// World position to screen position under the current transform.
    #[inline]
    pub fn apply(&self, world: Vec2) -> Vec2 {
        world * self.state.scale + self.state.translation
    }
}
