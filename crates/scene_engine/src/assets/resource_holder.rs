//! Resource holder - identifier-keyed storage for looked-up resources
//!
//! Games declare small enums for their textures, fonts and shaders and load
//! each one exactly once at startup. A missing key at that point is fatal for
//! the caller; a lookup of an identifier that was never loaded is reported as
//! [`AssetError::NotFound`].

use super::AssetError;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Storage for resources of one kind, keyed by a game identifier
#[derive(Debug)]
pub struct ResourceHolder<Id, R> {
    kind: &'static str,
    resources: HashMap<Id, R>,
}

impl<Id, R> ResourceHolder<Id, R>
where
    Id: Copy + Eq + Hash + Debug,
{
    /// Create an empty holder; `kind` names the resource type in errors
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            resources: HashMap::new(),
        }
    }

    /// Load a resource through `loader` and store it under `id`
    pub fn load<F>(&mut self, id: Id, loader: F) -> Result<(), AssetError>
    where
        F: FnOnce() -> Result<R, AssetError>,
    {
        if self.resources.contains_key(&id) {
            return Err(AssetError::AlreadyLoaded {
                kind: self.kind,
                id: format!("{id:?}"),
            });
        }

        let resource = loader()?;
        log::debug!("Loaded {} {:?}", self.kind, id);
        self.resources.insert(id, resource);
        Ok(())
    }

    /// Store an already constructed resource, replacing any previous one
    pub fn insert(&mut self, id: Id, resource: R) -> Option<R> {
        self.resources.insert(id, resource)
    }

    /// Get a resource
    pub fn get(&self, id: Id) -> Result<&R, AssetError> {
        self.resources.get(&id).ok_or_else(|| self.not_found(id))
    }

    /// Get a resource mutably
    pub fn get_mut(&mut self, id: Id) -> Result<&mut R, AssetError> {
        let kind = self.kind;
        self.resources.get_mut(&id).ok_or_else(|| AssetError::NotFound {
            kind,
            key: format!("{id:?}"),
        })
    }

    /// Whether a resource was loaded under `id`
    pub fn contains(&self, id: Id) -> bool {
        self.resources.contains_key(&id)
    }

    /// Number of loaded resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn not_found(&self, id: Id) -> AssetError {
        AssetError::NotFound {
            kind: self.kind,
            key: format!("{id:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetSource, MemoryAssets, Texture};
    use crate::foundation::math::Vec2;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TextureId {
        Ships,
        Background,
    }

    #[test]
    fn test_load_and_get() {
        let assets = MemoryAssets::new().with_texture("ships.png", Vec2::new(64.0, 64.0));
        let mut holder: ResourceHolder<TextureId, Texture> = ResourceHolder::new("texture");

        holder.load(TextureId::Ships, || assets.texture("ships.png")).unwrap();

        assert_eq!(holder.get(TextureId::Ships).unwrap().key(), "ships.png");
        assert!(holder.get(TextureId::Background).is_err());
        assert_eq!(holder.len(), 1);
    }

    #[test]
    fn test_failed_load_propagates_and_stores_nothing() {
        let assets = MemoryAssets::new();
        let mut holder: ResourceHolder<TextureId, Texture> = ResourceHolder::new("texture");

        let result = holder.load(TextureId::Background, || assets.texture("stars.png"));

        assert!(matches!(result, Err(AssetError::NotFound { .. })));
        assert!(holder.is_empty());
    }

    #[test]
    fn test_double_load_rejected() {
        let mut holder: ResourceHolder<TextureId, Texture> = ResourceHolder::new("texture");
        let make = || Ok(Texture::new("ships.png", Vec2::new(1.0, 1.0)));

        holder.load(TextureId::Ships, make).unwrap();
        assert!(matches!(
            holder.load(TextureId::Ships, make),
            Err(AssetError::AlreadyLoaded { .. })
        ));
    }
}
