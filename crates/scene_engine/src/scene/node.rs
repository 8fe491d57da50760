//! Scene node trait and per-call contexts
//!
//! A node kind implements [`SceneNode`] and only ever sees its own state plus
//! a context object. Structural access to the graph (attach, detach, lookup
//! of other nodes) stays with the [`SceneGraph`](super::SceneGraph) owner, so
//! hooks cannot invalidate the traversal that is calling them.

use super::category::Category;
use crate::command::{Command, CommandQueue};
use crate::foundation::math::{matrix_position, Mat3, Point2, Rect, Transform2D, Vec2};
use crate::render::RenderTarget;
use std::any::Any;

/// Upcast helper so trait objects can be downcast to their concrete kind
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behaviour of one kind of scene node
///
/// `A` is the game's command action type. Every hook has a default so simple
/// kinds only override what they use.
pub trait SceneNode<A: 'static>: AsAny {
    /// Category used for command routing and collision filtering
    fn category(&self) -> Category {
        Category::SCENE
    }

    /// Per-frame update of this node only; children are updated afterwards
    fn update_current(&mut self, _ctx: &mut UpdateContext<'_, A>) {}

    /// Draw this node only; `transform` is the node's world transform
    fn draw_current(&self, _transform: &Mat3, _target: &mut dyn RenderTarget) {}

    /// Run a command action addressed to this node's category
    fn on_command(&mut self, _action: &A, _ctx: &mut CommandContext<'_, A>) {}

    /// Collision/cull bounds in local space, `None` for non-physical nodes
    fn local_bounds(&self) -> Option<Rect> {
        None
    }

    /// Whether the entity was destroyed by gameplay
    fn is_destroyed(&self) -> bool {
        false
    }

    /// Whether the cleanup pass should remove this node (and its subtree)
    fn is_marked_for_removal(&self) -> bool {
        self.is_destroyed()
    }
}

impl<A: 'static> dyn SceneNode<A> {
    /// Downcast to a concrete node kind
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast to a concrete node kind, mutably
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Plain grouping node with a fixed category (root, layers)
#[derive(Debug, Clone, Copy)]
pub struct EmptyNode {
    category: Category,
}

impl EmptyNode {
    /// Create a grouping node
    pub fn new(category: Category) -> Self {
        Self { category }
    }
}

impl<A: 'static> SceneNode<A> for EmptyNode {
    fn category(&self) -> Category {
        self.category
    }
}

/// What a node sees during [`SceneNode::update_current`]
pub struct UpdateContext<'a, A> {
    /// Frame delta time in seconds
    pub dt: f32,
    /// The node's local transform
    pub transform: &'a mut Transform2D,
    /// Queue for commands to run at the start of the next frame
    pub commands: &'a mut CommandQueue<A>,
    pub(super) parent_world: Mat3,
}

impl<A> UpdateContext<'_, A> {
    /// Current world transform of the node
    pub fn world_transform(&self) -> Mat3 {
        self.parent_world * self.transform.to_matrix()
    }

    /// Current world position of the node
    pub fn world_position(&self) -> Vec2 {
        matrix_position(&self.world_transform())
    }

    /// Enqueue a command for the next drain
    pub fn push(&mut self, command: Command<A>) {
        self.commands.push(command);
    }
}

/// What a node sees during [`SceneNode::on_command`]
pub struct CommandContext<'a, A: 'static> {
    /// Frame delta time in seconds
    pub dt: f32,
    /// The node's local transform
    pub transform: &'a mut Transform2D,
    pub(super) parent_world: Mat3,
    pub(super) spawned: &'a mut Vec<OwnedNode<A>>,
}

impl<A: 'static> CommandContext<'_, A> {
    /// Current world transform of the node
    pub fn world_transform(&self) -> Mat3 {
        self.parent_world * self.transform.to_matrix()
    }

    /// Current world position of the node
    pub fn world_position(&self) -> Vec2 {
        matrix_position(&self.world_transform())
    }

    /// Convert a world-space point into this node's local space
    pub fn to_local(&self, world_point: Vec2) -> Vec2 {
        self.world_transform()
            .try_inverse()
            .map_or(world_point, |inverse| {
                inverse.transform_point(&Point2::from(world_point)).coords
            })
    }

    /// Attach a new child to this node once the command has been forwarded
    ///
    /// Children attached here do not receive the command that created them.
    pub fn attach(&mut self, child: OwnedNode<A>) {
        self.spawned.push(child);
    }
}

/// A node subtree that is not (or no longer) part of a graph
///
/// Attaching moves ownership into the graph; detaching moves it back out with
/// all descendants.
pub struct OwnedNode<A: 'static> {
    /// The node itself
    pub node: Box<dyn SceneNode<A>>,
    /// Local transform
    pub transform: Transform2D,
    /// Children in draw order
    pub children: Vec<OwnedNode<A>>,
}

impl<A: 'static> OwnedNode<A> {
    /// Wrap a node kind with an identity transform and no children
    pub fn new<T: SceneNode<A> + 'static>(node: T) -> Self {
        Self::from_box(Box::new(node))
    }

    /// Wrap an already boxed node
    pub fn from_box(node: Box<dyn SceneNode<A>>) -> Self {
        Self {
            node,
            transform: Transform2D::identity(),
            children: Vec::new(),
        }
    }

    /// Set the local position
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    /// Set the whole local transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform2D) -> Self {
        self.transform = transform;
        self
    }

    /// Append a child (drawn after the ones already added)
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Category of the subtree root
    pub fn category(&self) -> Category {
        self.node.category()
    }

    /// Downcast the subtree root to a concrete kind
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.node.downcast_ref::<T>()
    }

    /// Downcast the subtree root to a concrete kind, mutably
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.node.downcast_mut::<T>()
    }

    /// Number of nodes in the subtree, root included
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }
}
