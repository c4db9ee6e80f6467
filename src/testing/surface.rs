//! A surface that records frames instead of drawing them.

use super::snapshot::scene_to_string;
use crate::dom::tree::Scene;
use crate::root::Surface;

/// Headless [`Surface`]: counts render requests and keeps the outline of the
/// last frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessSurface {
    frames: usize,
    destroyed: bool,
    last_frame: Option<String>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames requested so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Outline of the scene at the last render request.
    pub fn last_frame(&self) -> Option<&str> {
        self.last_frame.as_deref()
    }
}

impl Surface for HeadlessSurface {
    fn request_render(&mut self, scene: &Scene) {
        self.frames += 1;
        self.last_frame = Some(scene_to_string(scene));
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}
