//! Layer nodes
//!
//! Layers are the direct children of the root. The object layer also turns
//! `SpawnProjectile` commands into projectile children, so ships can fire
//! without any access to the graph.

use crate::actions::Action;
use crate::entities::EntityFactory;
use scene_engine::scene::{Category, CommandContext, SceneNode};
use std::rc::Rc;

/// Grouping node for one world layer
pub struct LayerNode {
    category: Category,
    factory: Option<Rc<EntityFactory>>,
}

impl LayerNode {
    /// Plain layer
    pub fn new(category: Category) -> Self {
        debug_assert!(Category::LAYER.contains(category), "not a layer category");
        Self { category, factory: None }
    }

    /// Layer that materialises projectiles through `factory`
    pub fn with_factory(category: Category, factory: Rc<EntityFactory>) -> Self {
        Self {
            factory: Some(factory),
            ..Self::new(category)
        }
    }
}

impl SceneNode<Action> for LayerNode {
    fn category(&self) -> Category {
        self.category
    }

    fn on_command(&mut self, action: &Action, ctx: &mut CommandContext<'_, Action>) {
        let Action::SpawnProjectile { kind, position, velocity } = action else {
            return;
        };
        let Some(factory) = &self.factory else {
            log::error!("{:?} layer cannot spawn projectiles", self.category);
            return;
        };

        let local = ctx.to_local(*position);
        ctx.attach(factory.projectile(*kind, *velocity).with_position(local));
    }
}
