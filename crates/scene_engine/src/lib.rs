//! # Scene Engine
//!
//! A small 2D game core: an arena scene graph of polymorphic nodes, category
//! based command dispatch, broad-phase collision and keyed resource holders.
//!
//! ## Features
//!
//! - **Scene Graph**: Tree of trait-object nodes with ownership transfer on attach/detach
//! - **Commands**: Deferred, category-addressed actions drained once per frame
//! - **Collision**: Sweep-and-prune overlap detection over world bounds
//! - **Assets**: Keyed textures, fonts and shaders loaded from an external source
//! - **Rendering**: Backend-agnostic draw submissions to a render target
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! #[derive(Debug, Clone)]
//! enum Action {
//!     Nudge(f32),
//! }
//!
//! struct Marker;
//!
//! impl SceneNode<Action> for Marker {
//!     fn category(&self) -> Category {
//!         Category::PICKUP
//!     }
//!
//!     fn on_command(&mut self, action: &Action, ctx: &mut CommandContext<'_, Action>) {
//!         let Action::Nudge(dx) = action;
//!         ctx.transform.translate(Vec2::new(*dx, 0.0));
//!     }
//! }
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut graph = SceneGraph::new();
//!     let marker = graph.attach_child(graph.root(), OwnedNode::new(Marker))?;
//!
//!     let mut queue = CommandQueue::new();
//!     queue.push(Command::new(Category::PICKUP, Action::Nudge(4.0)));
//!     while let Ok(command) = queue.pop() {
//!         graph.apply_command(&command, 1.0 / 60.0);
//!     }
//!     graph.update(1.0 / 60.0, &mut queue);
//!     graph.draw(&mut RecordingTarget::new());
//!
//!     println!("marker at {:?}", graph.absolute_position(marker));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod command;
pub mod scene;
pub mod assets;
pub mod render;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, AssetSource, Font, MemoryAssets, ResourceHolder, Shader, Texture},
        command::{Command, CommandError, CommandQueue},
        config::{Config, ConfigError},
        foundation::math::{Mat3, Rect, Transform2D, Vec2},
        physics::{find_overlapping_pairs, CollisionPair},
        render::{Color, DrawCommand, RecordingTarget, RenderTarget, Visual},
        scene::{
            Category, CommandContext, EmptyNode, NodeId, OwnedNode, RemovalCause, RemovedNode,
            SceneError, SceneGraph, SceneNode, UpdateContext,
        },
    };
}
