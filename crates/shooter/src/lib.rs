//! # Shooter
//!
//! World orchestration for a vertical arcade shooter on top of
//! `scene_engine`: entity node kinds, level progression, collisions and
//! UI refresh, driven one frame at a time.
//!
//! ```rust,no_run
//! use shooter::actions::Action;
//! use shooter::config::GameConfig;
//! use shooter::resources::default_assets;
//! use shooter::World;
//! use scene_engine::command::Command;
//! use scene_engine::render::RecordingTarget;
//! use scene_engine::scene::Category;
//!
//! let mut world = World::new(GameConfig::default(), &default_assets()).unwrap();
//! let mut target = RecordingTarget::new();
//! while world.is_player_alive() {
//!     world.command_queue().push(Command::new(Category::PLAYER_SHIP, Action::Fire));
//!     world.update(1.0 / 60.0);
//!     target.clear();
//!     world.draw(&mut target);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod actions;
pub mod config;
pub mod entities;
pub mod progression;
pub mod resources;
pub mod world;

pub use world::{World, WorldError};
