//! # Rendering System
//!
//! The engine does not talk to a graphics API. Scene nodes produce
//! [`DrawCommand`]s and hand them to a [`RenderTarget`], which owns blending,
//! shader compilation and everything else backend-specific.
//!
//! ## Architecture
//!
//! ```text
//! Scene Graph (draw traversal, z order = child order)
//!      ↓
//! DrawCommand { transform, visual }
//!      ↓
//! RenderTarget (external)
//! ```

pub mod commands;
pub mod target;

pub use commands::{Color, DrawCommand, ParticleSprite, Visual};
pub use target::{RecordingTarget, RenderTarget};
