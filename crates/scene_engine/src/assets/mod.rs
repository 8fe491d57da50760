//! Asset management system
//!
//! Loading textures, fonts and shaders from storage is the job of an external
//! collaborator. The engine only sees that collaborator through
//! [`AssetSource`], a by-key lookup, and keeps whatever it looked up in
//! [`ResourceHolder`]s keyed by game-defined identifiers.
//!
//! The resource types themselves are opaque handles: a render target
//! receives them inside draw submissions and knows how to bind them.

pub mod resource_holder;

pub use resource_holder::ResourceHolder;

use crate::foundation::math::Vec2;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Asset errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The source has nothing registered under this key
    #[error("{kind} not found: {key}")]
    NotFound {
        /// Resource kind ("texture", "font", "shader")
        kind: &'static str,
        /// Lookup key
        key: String,
    },

    /// A holder was asked to load the same identifier twice
    #[error("{kind} already loaded for id {id}")]
    AlreadyLoaded {
        /// Resource kind
        kind: &'static str,
        /// Debug rendering of the identifier
        id: String,
    },
}

/// Opaque texture handle
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    key: String,
    size: Vec2,
}

impl Texture {
    /// Create a texture handle
    pub fn new(key: impl Into<String>, size: Vec2) -> Self {
        Self { key: key.into(), size }
    }

    /// Lookup key the texture was loaded from
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Texture size in pixels
    pub fn size(&self) -> Vec2 {
        self.size
    }
}

/// Opaque font handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    key: String,
}

impl Font {
    /// Create a font handle
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Lookup key the font was loaded from
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Shader program handle with its float uniform state
///
/// Compilation is the render target's business; the engine only tracks the
/// uniform values it wants bound at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct Shader {
    key: String,
    uniforms: BTreeMap<String, f32>,
}

impl Shader {
    /// Create a shader handle with no uniforms set
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            uniforms: BTreeMap::new(),
        }
    }

    /// Lookup key the shader was loaded from
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Set a float uniform
    pub fn set_uniform(&mut self, name: &str, value: f32) {
        self.uniforms.insert(name.to_string(), value);
    }

    /// Current value of a uniform, if it was ever set
    pub fn uniform(&self, name: &str) -> Option<f32> {
        self.uniforms.get(name).copied()
    }
}

/// By-key lookup of visual resources
pub trait AssetSource {
    /// Look up a texture
    fn texture(&self, key: &str) -> Result<Texture, AssetError>;

    /// Look up a font
    fn font(&self, key: &str) -> Result<Font, AssetError>;

    /// Look up a shader
    fn shader(&self, key: &str) -> Result<Shader, AssetError>;
}

/// In-memory asset registry
///
/// Stands in for a storage-backed loader in tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryAssets {
    textures: HashMap<String, Vec2>,
    fonts: Vec<String>,
    shaders: Vec<String>,
}

impl MemoryAssets {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture key with its pixel size
    pub fn with_texture(mut self, key: impl Into<String>, size: Vec2) -> Self {
        self.textures.insert(key.into(), size);
        self
    }

    /// Register a font key
    pub fn with_font(mut self, key: impl Into<String>) -> Self {
        self.fonts.push(key.into());
        self
    }

    /// Register a shader key
    pub fn with_shader(mut self, key: impl Into<String>) -> Self {
        self.shaders.push(key.into());
        self
    }
}

impl AssetSource for MemoryAssets {
    fn texture(&self, key: &str) -> Result<Texture, AssetError> {
        self.textures
            .get(key)
            .map(|size| Texture::new(key, *size))
            .ok_or_else(|| AssetError::NotFound { kind: "texture", key: key.to_string() })
    }

    fn font(&self, key: &str) -> Result<Font, AssetError> {
        if self.fonts.iter().any(|k| k == key) {
            Ok(Font::new(key))
        } else {
            Err(AssetError::NotFound { kind: "font", key: key.to_string() })
        }
    }

    fn shader(&self, key: &str) -> Result<Shader, AssetError> {
        if self.shaders.iter().any(|k| k == key) {
            Ok(Shader::new(key))
        } else {
            Err(AssetError::NotFound { kind: "shader", key: key.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_assets_lookup() {
        let assets = MemoryAssets::new()
            .with_texture("ships", Vec2::new(256.0, 128.0))
            .with_font("sansation")
            .with_shader("starfield");

        assert_eq!(assets.texture("ships").unwrap().size(), Vec2::new(256.0, 128.0));
        assert_eq!(assets.font("sansation").unwrap().key(), "sansation");
        assert!(assets.shader("starfield").is_ok());
    }

    #[test]
    fn test_unregistered_key_is_not_found() {
        let assets = MemoryAssets::new();
        assert_eq!(
            assets.texture("missing"),
            Err(AssetError::NotFound { kind: "texture", key: "missing".to_string() })
        );
    }

    #[test]
    fn test_shader_uniforms() {
        let mut shader = Shader::new("starfield");
        assert_eq!(shader.uniform("time"), None);

        shader.set_uniform("time", 1.5);
        shader.set_uniform("time", 2.0);
        assert_eq!(shader.uniform("time"), Some(2.0));
    }
}
