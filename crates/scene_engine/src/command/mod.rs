//! Command system for decoupled scene operations
//!
//! Key principles:
//! - A command names *which kind* of node it is for (a [`Category`] mask),
//!   never a particular node
//! - The action is plain data, interpreted by the receiving node kind
//! - Queued commands execute in insertion order; whoever pushes a command
//!   does not need access to the nodes that will run it
//!
//! The action type is chosen by the game, so the engine stays ignorant of
//! what "fire" or "steer" mean.

use crate::scene::Category;
use std::collections::VecDeque;
use thiserror::Error;

/// Command queue errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Nothing left to pop
    #[error("command queue is empty")]
    Empty,
}

/// A deferred, categorized instruction
#[derive(Debug, Clone, PartialEq)]
pub struct Command<A> {
    /// Categories the command applies to
    pub category: Category,

    /// What receiving nodes should do
    pub action: A,
}

impl<A> Command<A> {
    /// Create a command for every node whose category intersects `category`
    pub fn new(category: Category, action: A) -> Self {
        debug_assert!(!category.is_empty(), "command without target category");
        debug_assert!(Category::is_known(category.bits()), "command with unknown category bits");
        Self { category, action }
    }
}

/// FIFO buffer of pending commands
#[derive(Debug, Clone)]
pub struct CommandQueue<A> {
    queue: VecDeque<Command<A>>,
}

impl<A> CommandQueue<A> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Append a command
    pub fn push(&mut self, command: Command<A>) {
        self.queue.push_back(command);
    }

    /// Remove and return the oldest command
    pub fn pop(&mut self) -> Result<Command<A>, CommandError> {
        self.queue.pop_front().ok_or(CommandError::Empty)
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is drained
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending commands, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Command<A>> {
        self.queue.iter()
    }
}

impl<A> Default for CommandQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}
