//! Per-tick output handed to the renderer.

use polyloop_camera::CameraState;
use polyloop_math::Vec2;
use polyloop_phase::Highlight;

/// Everything the renderer needs for one frame.
///
/// Node positions are already camera-transformed to screen space; segments
/// are index pairs into `nodes`. `forces` is present only when debug force
/// rendering is enabled.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// Screen-space node positions.
    pub nodes: Vec<Vec2>,
    /// Segment endpoints as node index pairs.
    pub segments: Vec<(usize, usize)>,
    /// Active highlight selector, per the current progression strategy.
    pub highlight: Highlight,
    /// Debug force vectors for the active indices, world units.
    pub forces: Option<Vec<(usize, Vec2)>>,
    /// Camera transform the node positions were produced with.
    pub camera: CameraState,
}

impl RenderFrame {
    /// Frame for an empty chain: a no-op draw.
    pub fn empty(camera: CameraState) -> Self {
        Self {
            nodes: Vec::new(),
            segments: Vec::new(),
            highlight: Highlight::None,
            forces: None,
            camera,
        }
    }
}
