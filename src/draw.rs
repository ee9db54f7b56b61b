//! Abstract 2D drawing surface
//!
//! The sim never touches a terminal or a pixel directly; it emits draw
//! primitives into a [`DrawSurface`]. The real implementation lives in
//! `render`; [`Recorder`] captures the call sequence so tests can assert
//! on what was drawn without any I/O.

use std::io;

use glam::Vec2;

/// An RGB color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The fixed palette used by the game's entities and screens
pub mod palette {
    use super::Rgb;

    pub const BIRD_BODY: Rgb = Rgb(192, 72, 46);
    pub const BIRD_EYE: Rgb = Rgb(0, 0, 0);
    pub const BIRD_BEAK: Rgb = Rgb(241, 189, 62);
    pub const TARGET: Rgb = Rgb(136, 174, 146);
    pub const LABEL: Rgb = Rgb(255, 255, 255);
    // Light, not black: the preview has to read against a dark terminal.
    pub const AIM_LINE: Rgb = Rgb(230, 230, 230);
    pub const WIN: Rgb = Rgb(55, 121, 60);
    pub const LOSE: Rgb = Rgb(156, 13, 13);
}

/// Write-only sink for one frame's worth of draw primitives
///
/// Coordinates are world-space (y-up); the surface owns the mapping onto
/// whatever it presents to. `text` is centered on `pos`.
pub trait DrawSurface {
    /// Configure the world-coordinate extents mapped onto the surface.
    /// Called once at setup.
    fn set_world_scale(&mut self, width: f32, height: f32);

    /// Begin a frame by erasing the previous one.
    fn clear(&mut self);

    fn filled_circle(&mut self, center: Vec2, radius: f32, color: Rgb);

    fn filled_polygon(&mut self, vertices: &[Vec2], color: Rgb);

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgb);

    /// Draw `text` centered on `pos`.
    fn text(&mut self, pos: Vec2, text: &str, color: Rgb);

    /// Flush the completed frame. The only operation allowed to do I/O.
    fn present(&mut self) -> io::Result<()>;
}

/// One recorded draw primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    SetWorldScale { width: f32, height: f32 },
    Clear,
    FilledCircle { center: Vec2, radius: f32, color: Rgb },
    FilledPolygon { vertices: Vec<Vec2>, color: Rgb },
    Line { from: Vec2, to: Vec2, color: Rgb },
    Text { pos: Vec2, text: String, color: Rgb },
}

/// A `DrawSurface` that records every call, for headless tests
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<DrawCall>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded since the most recent `Clear` (the current frame).
    pub fn frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.calls[start..]
    }

    /// All circles in the current frame.
    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Rgb)> + '_ {
        self.frame().iter().filter_map(|c| match c {
            DrawCall::FilledCircle { center, radius, color } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    /// All text labels in the current frame.
    pub fn texts(&self) -> impl Iterator<Item = (Vec2, &str, Rgb)> + '_ {
        self.frame().iter().filter_map(|c| match c {
            DrawCall::Text { pos, text, color } => Some((*pos, text.as_str(), *color)),
            _ => None,
        })
    }

    /// Whether the current frame contains any line segment.
    pub fn has_line(&self) -> bool {
        self.frame().iter().any(|c| matches!(c, DrawCall::Line { .. }))
    }
}

impl DrawSurface for Recorder {
    fn set_world_scale(&mut self, width: f32, height: f32) {
        self.calls.push(DrawCall::SetWorldScale { width, height });
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn filled_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.calls.push(DrawCall::FilledCircle { center, radius, color });
    }

    fn filled_polygon(&mut self, vertices: &[Vec2], color: Rgb) {
        self.calls.push(DrawCall::FilledPolygon { vertices: vertices.to_vec(), color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgb) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn text(&mut self, pos: Vec2, text: &str, color: Rgb) {
        self.calls.push(DrawCall::Text { pos, text: text.to_string(), color });
    }

    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}
