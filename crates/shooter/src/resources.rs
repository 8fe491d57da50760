//! Resource identifiers
//!
//! Every texture, font and shader the game uses has an identifier and a
//! lookup key. The world loads all of them once at construction.

use scene_engine::assets::{Font, MemoryAssets, ResourceHolder, Shader, Texture};
use scene_engine::foundation::math::Vec2;

/// Textures used by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    /// Ships, projectiles and pickups
    Entities,
    /// Particle sprite
    Particle,
    /// Background quad drawn through the background shader
    Background,
}

impl TextureId {
    /// Every texture the world needs
    pub const ALL: [Self; 3] = [Self::Entities, Self::Particle, Self::Background];

    /// Lookup key
    pub fn key(self) -> &'static str {
        match self {
            Self::Entities => "textures/entities.png",
            Self::Particle => "textures/particle.png",
            Self::Background => "textures/background.png",
        }
    }
}

/// Fonts used for UI text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontId {
    /// The only UI font
    Main,
}

impl FontId {
    /// Lookup key
    pub fn key(self) -> &'static str {
        match self {
            Self::Main => "fonts/sansation.ttf",
        }
    }
}

/// Shaders used by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderId {
    /// Animated background
    Background,
}

impl ShaderId {
    /// Every shader the world needs
    pub const ALL: [Self; 1] = [Self::Background];

    /// Lookup key
    pub fn key(self) -> &'static str {
        match self {
            Self::Background => "shaders/background.frag",
        }
    }
}

/// Loaded textures
pub type TextureHolder = ResourceHolder<TextureId, Texture>;

/// Loaded fonts
pub type FontHolder = ResourceHolder<FontId, Font>;

/// Loaded shaders
pub type ShaderHolder = ResourceHolder<ShaderId, Shader>;

/// In-memory catalog with every key the game looks up
pub fn default_assets() -> MemoryAssets {
    MemoryAssets::new()
        .with_texture(TextureId::Entities.key(), Vec2::new(256.0, 256.0))
        .with_texture(TextureId::Particle.key(), Vec2::new(8.0, 8.0))
        .with_texture(TextureId::Background.key(), Vec2::new(1024.0, 1024.0))
        .with_font(FontId::Main.key())
        .with_shader(ShaderId::Background.key())
}
