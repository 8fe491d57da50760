//! Draw submissions
//!
//! Scene nodes describe what they want drawn as [`DrawCommand`]s: a world
//! transform plus a [`Visual`] referencing opaque resources. The render
//! target decides how to turn that into API calls.
//!
//! # Example
//!
//! ```rust,ignore
//! target.submit(DrawCommand::new(
//!     world_transform,
//!     Visual::Sprite { texture: texture.clone(), rect: Rect::new(0.0, 0.0, 48.0, 64.0) },
//! ));
//! ```

use crate::assets::{Font, Shader, Texture};
use crate::foundation::math::{Mat3, Rect, Vec2};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Create a color from channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Same color with alpha scaled by `factor` (clamped to 0..=1)
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn faded(self, factor: f32) -> Self {
        let alpha = (f32::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }
}

/// One particle as submitted for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSprite {
    /// Position in the submitting node's space
    pub position: Vec2,
    /// Tinted color
    pub color: Color,
}

/// What a draw command renders
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Textured quad covering `rect` in local space
    Sprite {
        /// Source texture
        texture: Texture,
        /// Local-space rectangle (usually centered on the origin)
        rect: Rect,
    },

    /// A line of text
    Text {
        /// Font to render with
        font: Font,
        /// Already formatted string
        string: String,
        /// Character size in pixels
        character_size: u32,
    },

    /// Batch of particles sharing one texture
    Particles {
        /// Particle texture
        texture: Texture,
        /// Particles in draw order
        particles: Vec<ParticleSprite>,
    },

    /// Textured quad drawn through a shader with the given uniform state
    ShadedQuad {
        /// Source texture
        texture: Texture,
        /// Local-space rectangle
        rect: Rect,
        /// Shader and its uniforms at submission time
        shader: Shader,
    },
}

/// A single draw submission
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Model-to-world transform
    pub transform: Mat3,

    /// What to draw
    pub visual: Visual,
}

impl DrawCommand {
    /// Create a new draw command
    pub fn new(transform: Mat3, visual: Visual) -> Self {
        Self { transform, visual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faded_scales_alpha_only() {
        let color = Color::rgb(255, 128, 0).faded(0.5);
        assert_eq!(color, Color::rgba(255, 128, 0, 128));
        assert_eq!(Color::WHITE.faded(2.0).a, 255);
        assert_eq!(Color::WHITE.faded(-1.0).a, 0);
    }
}
