//! Headless shooter session
//!
//! Runs the world for a fixed number of frames with scripted input into a
//! recording render target, then logs a summary.
//!
//! Usage: `shooter [config.toml|config.ron] [frames]`

use scene_engine::command::Command;
use scene_engine::config::Config;
use scene_engine::foundation::logging;
use scene_engine::foundation::math::Vec2;
use scene_engine::render::RecordingTarget;
use scene_engine::scene::Category;
use shooter::actions::Action;
use shooter::config::GameConfig;
use shooter::resources::default_assets;
use shooter::World;
use std::error::Error;

const FRAME_TIME: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 60 * 60;
const STRAFE_SPEED: f32 = 180.0;     // Pixels per second
const STRAFE_PERIOD: f32 = 4.0;      // Seconds for one left-right sweep

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load_from_file(&path)?,
        None => GameConfig::default(),
    };
    let frames = match args.next() {
        Some(frames) => frames.parse()?,
        None => DEFAULT_FRAMES,
    };

    logging::init_with_level(&config.log_level);
    log::info!("Starting headless session for {} frames", frames);

    let mut world = World::new(config, &default_assets())?;
    let mut target = RecordingTarget::new();
    let mut submitted = 0;

    for frame in 0..frames {
        if !world.is_player_alive() {
            log::info!("Player lost all lives at frame {}", frame);
            break;
        }

        let time = world.elapsed();
        let direction = if (time / STRAFE_PERIOD).fract() < 0.5 { 1.0 } else { -1.0 };
        let queue = world.command_queue();
        queue.push(Command::new(
            Category::PLAYER_SHIP,
            Action::Accelerate(Vec2::new(direction * STRAFE_SPEED, 0.0)),
        ));
        queue.push(Command::new(Category::PLAYER_SHIP, Action::Fire));

        world.update(FRAME_TIME);

        target.clear();
        world.draw(&mut target);
        submitted += target.len();
    }

    let progress = world.progress();
    log::info!(
        "Session over after {:.1}s: score {}, level {} round {}, {} enemies alive, {} draw submissions",
        world.elapsed(),
        world.score(),
        progress.level().number(),
        progress.round(),
        progress.alive_enemies(),
        submitted
    );
    Ok(())
}
