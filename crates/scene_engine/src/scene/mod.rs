//! Scene management system
//!
//! A scene is a tree of polymorphic nodes stored in an arena. The owner of
//! the [`SceneGraph`] drives three traversals per frame:
//!
//! ```text
//! apply_command (drained from the CommandQueue)
//!      ↓
//! update (nodes may push new commands)
//!      ↓
//! draw (parents before children, children in attach order)
//! ```
//!
//! Node kinds implement [`SceneNode`] and never touch the graph structure
//! directly; new children requested from a command hook are attached by the
//! graph once the traversal of that node is complete.

mod category;
mod node;
mod scene_graph;

pub use category::Category;
pub use node::{AsAny, CommandContext, EmptyNode, OwnedNode, SceneNode, UpdateContext};
pub use scene_graph::{NodeId, RemovalCause, RemovedNode, SceneError, SceneGraph};
