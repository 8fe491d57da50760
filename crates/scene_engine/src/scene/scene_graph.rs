//! Scene graph arena
//!
//! Nodes live in a slot map and refer to each other by [`NodeId`]. A parent
//! owns its children through its child list; the parent link is a plain id
//! that never keeps anything alive. Removing a node removes its whole
//! subtree.
//!
//! Traversals (update, command application, draw) visit a node before its
//! children and children in attach order, which is also the z order.

use super::category::Category;
use super::node::{CommandContext, EmptyNode, OwnedNode, SceneNode, UpdateContext};
use crate::command::{Command, CommandQueue};
use crate::foundation::math::{matrix_position, Mat3, Rect, Transform2D, Vec2};
use crate::render::RenderTarget;
use slotmap::{new_key_type, SlotMap};
use std::any::Any;
use thiserror::Error;

new_key_type! {
    /// Handle of a node inside a [`SceneGraph`]
    pub struct NodeId;
}

/// Structural scene graph errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The node does not exist, or is not a child of the given parent
    #[error("node {0:?} not found")]
    NotFound(NodeId),

    /// The root is owned by the graph itself
    #[error("the root node cannot be removed")]
    RootRemoval,
}

/// Why the cleanup pass removed a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalCause {
    /// The node reported itself destroyed
    Destroyed,
    /// The owner marked it (e.g. left the world bounds) or it expired
    Culled,
}

/// A subtree taken out by [`SceneGraph::remove_wrecks`]
pub struct RemovedNode<A: 'static> {
    /// Id the subtree root had while attached
    pub id: NodeId,
    /// Category of the subtree root
    pub category: Category,
    /// World position just before removal
    pub world_position: Vec2,
    /// Why it was removed
    pub cause: RemovalCause,
    /// The detached subtree
    pub node: OwnedNode<A>,
}

struct NodeSlot<A: 'static> {
    node: Box<dyn SceneNode<A>>,
    transform: Transform2D,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pending_removal: bool,
}

impl<A: 'static> NodeSlot<A> {
    fn should_remove(&self) -> bool {
        self.pending_removal || self.node.is_marked_for_removal()
    }
}

/// Tree of polymorphic scene nodes
pub struct SceneGraph<A: 'static> {
    nodes: SlotMap<NodeId, NodeSlot<A>>,
    root: NodeId,
}

impl<A: 'static> SceneGraph<A> {
    /// Create a graph containing only a root grouping node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeSlot {
            node: Box::new(EmptyNode::new(Category::SCENE)) as Box<dyn SceneNode<A>>,
            transform: Transform2D::identity(),
            parent: None,
            children: Vec::new(),
            pending_removal: false,
        });
        Self { nodes, root }
    }

    /// The root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Move a subtree into the graph as the last child of `parent`
    ///
    /// Returns the id of the subtree root.
    pub fn attach_child(&mut self, parent: NodeId, child: OwnedNode<A>) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NotFound(parent));
        }
        Ok(self.insert_subtree(parent, child))
    }

    /// Move the subtree rooted at `child` out of `parent`'s child list
    pub fn detach_child(&mut self, parent: NodeId, child: NodeId) -> Result<OwnedNode<A>, SceneError> {
        let slot = self.nodes.get_mut(parent).ok_or(SceneError::NotFound(parent))?;
        let index = slot
            .children
            .iter()
            .position(|&id| id == child)
            .ok_or(SceneError::NotFound(child))?;
        slot.children.remove(index);

        self.take_subtree(child).ok_or(SceneError::NotFound(child))
    }

    /// Detach a node from whatever parent it has
    pub fn remove(&mut self, id: NodeId) -> Result<OwnedNode<A>, SceneError> {
        if id == self.root {
            return Err(SceneError::RootRemoval);
        }
        let parent = self
            .nodes
            .get(id)
            .and_then(|slot| slot.parent)
            .ok_or(SceneError::NotFound(id))?;
        self.detach_child(parent, id)
    }

    /// Flag a node so the next [`SceneGraph::remove_wrecks`] removes it
    pub fn mark_for_removal(&mut self, id: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootRemoval);
        }
        let slot = self.nodes.get_mut(id).ok_or(SceneError::NotFound(id))?;
        slot.pending_removal = true;
        Ok(())
    }

    /// Whether the node is flagged for removal, by its owner or by itself
    pub fn is_marked_for_removal(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(NodeSlot::should_remove)
    }

    /// Parent of a node (`None` for the root or unknown ids)
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|slot| slot.parent)
    }

    /// Children of a node in draw order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |slot| slot.children.as_slice())
    }

    /// All descendants of a node in pre-order, excluding the node itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    /// Category of a node
    pub fn category(&self, id: NodeId) -> Option<Category> {
        self.nodes.get(id).map(|slot| slot.node.category())
    }

    /// The node as a trait object
    pub fn node(&self, id: NodeId) -> Option<&dyn SceneNode<A>> {
        self.nodes.get(id).map(|slot| slot.node.as_ref())
    }

    /// The node downcast to its concrete kind
    pub fn get<T: Any>(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).and_then(|slot| slot.node.downcast_ref::<T>())
    }

    /// The node downcast to its concrete kind, mutably
    pub fn get_mut<T: Any>(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).and_then(|slot| slot.node.downcast_mut::<T>())
    }

    /// Local transform of a node
    pub fn transform(&self, id: NodeId) -> Option<&Transform2D> {
        self.nodes.get(id).map(|slot| &slot.transform)
    }

    /// Local transform of a node, mutably
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform2D> {
        self.nodes.get_mut(id).map(|slot| &mut slot.transform)
    }

    /// World transform: the parent chain composed down to this node
    pub fn world_transform(&self, id: NodeId) -> Option<Mat3> {
        let slot = self.nodes.get(id)?;
        let mut matrix = slot.transform.to_matrix();
        let mut current = slot.parent;
        while let Some(parent_id) = current {
            let parent = self.nodes.get(parent_id)?;
            matrix = parent.transform.to_matrix() * matrix;
            current = parent.parent;
        }
        Some(matrix)
    }

    /// World position of a node
    pub fn absolute_position(&self, id: NodeId) -> Option<Vec2> {
        self.world_transform(id).map(|matrix| matrix_position(&matrix))
    }

    /// World-space bounds of a node that has local bounds
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let local = self.nodes.get(id)?.node.local_bounds()?;
        Some(local.transformed(&self.world_transform(id)?))
    }

    /// Update every node: the node's own hook first, then its children
    ///
    /// Commands pushed by hooks land in `commands` and are not applied here.
    pub fn update(&mut self, dt: f32, commands: &mut CommandQueue<A>) {
        self.update_node(self.root, Mat3::identity(), dt, commands);
    }

    /// Run a command against every node whose category matches it
    pub fn apply_command(&mut self, command: &Command<A>, dt: f32) {
        self.apply_to(self.root, Mat3::identity(), command, dt);
    }

    /// Draw every node, parents before children, children in attach order
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        self.draw_node(self.root, &Mat3::identity(), target);
    }

    /// Remove every subtree whose root is flagged or reports itself removable
    ///
    /// Removed subtrees are returned in pre-order so the owner can react to
    /// them (scoring, effects, bookkeeping).
    pub fn remove_wrecks(&mut self) -> Vec<RemovedNode<A>> {
        let mut wrecks = Vec::new();
        self.collect_wrecks(self.root, &mut wrecks);

        let mut removed = Vec::with_capacity(wrecks.len());
        for id in wrecks {
            let Some(slot) = self.nodes.get(id) else { continue };
            let category = slot.node.category();
            let cause = if slot.node.is_destroyed() {
                RemovalCause::Destroyed
            } else {
                RemovalCause::Culled
            };
            let world_position = self.absolute_position(id).unwrap_or_else(Vec2::zeros);

            match self.remove(id) {
                Ok(node) => {
                    log::trace!("Removed {:?} node {:?} ({:?})", category, id, cause);
                    removed.push(RemovedNode { id, category, world_position, cause, node });
                }
                Err(e) => log::error!("Failed to remove wreck {:?}: {}", id, e),
            }
        }
        removed
    }

    fn insert_subtree(&mut self, parent: NodeId, owned: OwnedNode<A>) -> NodeId {
        let OwnedNode { node, transform, children } = owned;
        let id = self.nodes.insert(NodeSlot {
            node,
            transform,
            parent: Some(parent),
            children: Vec::with_capacity(children.len()),
            pending_removal: false,
        });
        if let Some(parent_slot) = self.nodes.get_mut(parent) {
            parent_slot.children.push(id);
        }
        for child in children {
            self.insert_subtree(id, child);
        }
        id
    }

    fn take_subtree(&mut self, id: NodeId) -> Option<OwnedNode<A>> {
        let slot = self.nodes.remove(id)?;
        let children = slot
            .children
            .into_iter()
            .filter_map(|child| self.take_subtree(child))
            .collect();
        Some(OwnedNode {
            node: slot.node,
            transform: slot.transform,
            children,
        })
    }

    fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.nodes.get(id).and_then(|slot| slot.children.get(index).copied())
    }

    fn update_node(&mut self, id: NodeId, parent_world: Mat3, dt: f32, commands: &mut CommandQueue<A>) {
        let Some(slot) = self.nodes.get_mut(id) else { return };
        let mut ctx = UpdateContext {
            dt,
            transform: &mut slot.transform,
            commands: &mut *commands,
            parent_world,
        };
        slot.node.update_current(&mut ctx);
        let world = parent_world * slot.transform.to_matrix();

        let mut index = 0;
        while let Some(child) = self.child_at(id, index) {
            self.update_node(child, world, dt, commands);
            index += 1;
        }
    }

    fn apply_to(&mut self, id: NodeId, parent_world: Mat3, command: &Command<A>, dt: f32) {
        let mut spawned = Vec::new();
        let Some(slot) = self.nodes.get_mut(id) else { return };
        if slot.node.category().matches(command.category) {
            let mut ctx = CommandContext {
                dt,
                transform: &mut slot.transform,
                parent_world,
                spawned: &mut spawned,
            };
            slot.node.on_command(&command.action, &mut ctx);
        }
        let world = parent_world * slot.transform.to_matrix();
        let child_count = slot.children.len();

        for index in 0..child_count {
            if let Some(child) = self.child_at(id, index) {
                self.apply_to(child, world, command, dt);
            }
        }

        for child in spawned {
            self.insert_subtree(id, child);
        }
    }

    fn draw_node(&self, id: NodeId, parent_world: &Mat3, target: &mut dyn RenderTarget) {
        let Some(slot) = self.nodes.get(id) else { return };
        let world = parent_world * slot.transform.to_matrix();
        slot.node.draw_current(&world, target);
        for &child in &slot.children {
            self.draw_node(child, &world, target);
        }
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    fn collect_wrecks(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            match self.nodes.get(child) {
                Some(slot) if slot.should_remove() => out.push(child),
                Some(_) => self.collect_wrecks(child, out),
                None => {}
            }
        }
    }
}

impl<A: 'static> Default for SceneGraph<A> {
    fn default() -> Self {
        Self::new()
    }
}
