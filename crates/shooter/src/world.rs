//! World orchestrator
//!
//! Owns the scene graph, its layers and the UI text nodes, and runs one
//! simulation step per [`World::update`]:
//!
//! ```text
//! drain command queue → graph update → collisions → cleanup
//!      → spawn status → level status → guidance → player clamp → UI/shaders
//! ```
//!
//! Commands enqueued during a step are applied at the start of the next one.

use crate::actions::{Action, GameCommand, GameCommandQueue};
use crate::config::GameConfig;
use crate::entities::{
    EmitterNode, EntityFactory, LayerNode, ParticleKind, Pickup, PickupKind, Projectile, Ship, ShipKind, TextNode,
};
use crate::progression::{Advance, LevelProgress};
use crate::resources::{FontHolder, FontId, ShaderHolder, ShaderId, TextureHolder, TextureId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_engine::assets::{AssetError, AssetSource};
use scene_engine::config::ConfigError;
use scene_engine::foundation::math::{Mat3, Rect, Vec2};
use scene_engine::physics::find_overlapping_pairs;
use scene_engine::render::{DrawCommand, RenderTarget, Visual};
use scene_engine::scene::{Category, NodeId, OwnedNode, RemovalCause, SceneError, SceneGraph};
use std::rc::Rc;
use thiserror::Error;

const TEXT_SIZE: u32 = 20;
const PLAYER_START_OFFSET: f32 = 80.0;   // Distance of the player's start from the bottom edge
const BACKGROUND_TIME_UNIFORM: &str = "time";

/// World construction errors
#[derive(Debug, Error)]
pub enum WorldError {
    /// A texture, font or shader could not be looked up
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// The configuration cannot drive a session
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The initial scene could not be assembled
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Direct children of the root, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Object,
    Ship,
    Text,
}

impl Layer {
    const ALL: [Self; 3] = [Self::Object, Self::Ship, Self::Text];

    /// Layers whose entities take part in collisions and culling
    const PHYSICAL: [Self; 2] = [Self::Object, Self::Ship];

    fn category(self) -> Category {
        match self {
            Self::Object => Category::OBJECT_LAYER,
            Self::Ship => Category::SHIP_LAYER,
            Self::Text => Category::TEXT_LAYER,
        }
    }
}

/// Handles to the nodes the world addresses directly
#[derive(Debug, Clone, Copy)]
struct SceneHandles {
    layers: [NodeId; Layer::ALL.len()],
    player: NodeId,
    score_text: NodeId,
    lives_text: NodeId,
}

impl SceneHandles {
    fn layer(&self, layer: Layer) -> NodeId {
        self.layers[layer as usize]
    }
}

/// The game world
pub struct World {
    config: GameConfig,
    graph: SceneGraph<Action>,
    nodes: SceneHandles,
    factory: Rc<EntityFactory>,
    textures: TextureHolder,
    shaders: ShaderHolder,
    commands: GameCommandQueue,
    progress: LevelProgress,
    elapsed: f32,
    score: u32,
    rng: StdRng,
}

impl World {
    /// Build a world, looking up every resource it needs from `assets`
    pub fn new(config: GameConfig, assets: &dyn AssetSource) -> Result<Self, WorldError> {
        config.validate()?;

        let textures = Self::load_textures(assets)?;
        let shaders = Self::load_shaders(assets)?;
        let fonts = Self::load_fonts(assets)?;
        let factory = Rc::new(EntityFactory::new(&textures, &config)?);
        let progress = LevelProgress::new(config.levels.clone())?;

        let mut graph = SceneGraph::new();
        let nodes = Self::build_scene(&mut graph, &factory, &fonts, &config)?;

        log::info!(
            "World created: {}x{} view, {} nodes, seed {}",
            config.world.width,
            config.world.height,
            graph.len(),
            config.seed
        );

        let rng = StdRng::seed_from_u64(config.seed);
        let mut world = Self {
            config,
            graph,
            nodes,
            factory,
            textures,
            shaders,
            commands: GameCommandQueue::new(),
            progress,
            elapsed: 0.0,
            score: 0,
            rng,
        };
        world.update_texts();
        Ok(world)
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        debug_assert!(dt >= 0.0, "negative frame time");
        self.elapsed += dt;

        // Input accelerations accumulate from zero every frame
        if let Some(player) = self.graph.get_mut::<Ship>(self.nodes.player) {
            player.set_velocity(Vec2::zeros());
        }

        while let Ok(command) = self.commands.pop() {
            self.graph.apply_command(&command, dt);
        }

        self.graph.update(dt, &mut self.commands);

        self.handle_collisions();
        self.remove_outside_entities();
        self.remove_wrecks();
        self.update_spawn_status();
        self.update_level_status(dt);
        self.guide_enemies();
        self.adjust_player_position();
        self.update_texts();
        self.update_shaders();
    }

    /// Draw the background, then the scene graph layer by layer
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        let background = self.textures.get(TextureId::Background);
        let shader = self.shaders.get(ShaderId::Background);
        debug_assert!(background.is_ok() && shader.is_ok(), "background resources missing");

        match (background, shader) {
            (Ok(texture), Ok(shader)) => target.submit(DrawCommand::new(
                Mat3::identity(),
                Visual::ShadedQuad {
                    texture: texture.clone(),
                    rect: self.view_bounds(),
                    shader: shader.clone(),
                },
            )),
            (Err(e), _) | (_, Err(e)) => log::error!("Background not drawn: {}", e),
        }

        self.graph.draw(target);
    }

    /// Whether the player still has lives
    pub fn is_player_alive(&self) -> bool {
        self.graph
            .get::<Ship>(self.nodes.player)
            .is_some_and(|player| player.lives() > 0)
    }

    /// Queue for commands applied at the start of the next update
    pub fn command_queue(&mut self) -> &mut GameCommandQueue {
        &mut self.commands
    }

    /// Current score
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Level and round bookkeeping
    pub fn progress(&self) -> &LevelProgress {
        &self.progress
    }

    /// The scene graph (read-only)
    pub fn scene(&self) -> &SceneGraph<Action> {
        &self.graph
    }

    /// The player's node
    pub fn player(&self) -> NodeId {
        self.nodes.player
    }

    /// Seconds simulated so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The visible playfield
    pub fn view_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.config.world.width, self.config.world.height)
    }

    /// The playfield plus the cull margin; entities fully outside are removed
    pub fn bounding_rect(&self) -> Rect {
        self.view_bounds().expanded(self.config.world.cull_margin)
    }

    fn load_textures(assets: &dyn AssetSource) -> Result<TextureHolder, AssetError> {
        let mut textures = TextureHolder::new("texture");
        for id in TextureId::ALL {
            textures.load(id, || assets.texture(id.key()))?;
        }
        Ok(textures)
    }

    fn load_shaders(assets: &dyn AssetSource) -> Result<ShaderHolder, AssetError> {
        let mut shaders = ShaderHolder::new("shader");
        for id in ShaderId::ALL {
            shaders.load(id, || assets.shader(id.key()))?;
        }
        Ok(shaders)
    }

    fn load_fonts(assets: &dyn AssetSource) -> Result<FontHolder, AssetError> {
        let mut fonts = FontHolder::new("font");
        fonts.load(FontId::Main, || assets.font(FontId::Main.key()))?;
        Ok(fonts)
    }

    fn build_scene(
        graph: &mut SceneGraph<Action>,
        factory: &Rc<EntityFactory>,
        fonts: &FontHolder,
        config: &GameConfig,
    ) -> Result<SceneHandles, WorldError> {
        let root = graph.root();
        let mut layers = [root; Layer::ALL.len()];
        for layer in Layer::ALL {
            let node = if layer == Layer::Object {
                LayerNode::with_factory(layer.category(), Rc::clone(factory))
            } else {
                LayerNode::new(layer.category())
            };
            layers[layer as usize] = graph.attach_child(root, OwnedNode::new(node))?;
        }
        let object_layer = layers[Layer::Object as usize];

        for kind in ParticleKind::ALL {
            graph.attach_child(object_layer, factory.particle_system(kind))?;
        }

        let start = Vec2::new(config.world.width * 0.5, config.world.height - PLAYER_START_OFFSET);
        let player = graph.attach_child(
            layers[Layer::Ship as usize],
            factory.player(config.player.lives).with_position(start),
        )?;

        let font = fonts.get(FontId::Main)?;
        let text_layer = layers[Layer::Text as usize];
        let score_text = graph.attach_child(
            text_layer,
            OwnedNode::new(TextNode::new(font.clone(), TEXT_SIZE)).with_position(Vec2::new(10.0, 10.0)),
        )?;
        let lives_text = graph.attach_child(
            text_layer,
            OwnedNode::new(TextNode::new(font.clone(), TEXT_SIZE)).with_position(Vec2::new(10.0, 40.0)),
        )?;

        Ok(SceneHandles { layers, player, score_text, lives_text })
    }

    fn is_out_of_play(&self, id: NodeId) -> bool {
        self.graph
            .node(id)
            .map_or(true, |node| node.is_destroyed() || self.graph.is_marked_for_removal(id))
    }

    fn physical_entities(&self) -> Vec<NodeId> {
        Layer::PHYSICAL
            .iter()
            .flat_map(|&layer| self.graph.descendants(self.nodes.layer(layer)))
            .collect()
    }

    fn handle_collisions(&mut self) {
        let bounds: Vec<(NodeId, Rect)> = self
            .physical_entities()
            .into_iter()
            .filter(|&id| !self.is_out_of_play(id))
            .filter_map(|id| self.graph.world_bounds(id).map(|rect| (id, rect)))
            .collect();

        for pair in find_overlapping_pairs(&bounds) {
            // An entity destroyed by an earlier pair this frame takes no part in later ones
            if self.is_out_of_play(pair.first) || self.is_out_of_play(pair.second) {
                continue;
            }
            let (Some(first), Some(second)) = (self.graph.category(pair.first), self.graph.category(pair.second))
            else {
                continue;
            };

            if let Some((player, enemy)) = pair.match_categories(first, second, Category::PLAYER_SHIP, Category::ENEMY_SHIP) {
                self.hit_player(player);
                if let Some(enemy) = self.graph.get_mut::<Ship>(enemy) {
                    enemy.destroy();
                }
            } else if let Some((player, pickup)) =
                pair.match_categories(first, second, Category::PLAYER_SHIP, Category::PICKUP)
            {
                let kind = self.graph.get_mut::<Pickup>(pickup).and_then(Pickup::collect);
                if let (Some(kind), Some(ship)) = (kind, self.graph.get_mut::<Ship>(player)) {
                    kind.apply(ship);
                    log::debug!("Player collected {:?}", kind);
                }
            } else if let Some((enemy, projectile)) =
                pair.match_categories(first, second, Category::ENEMY_SHIP, Category::ALLIED_PROJECTILE)
            {
                let damage = self.graph.get_mut::<Projectile>(projectile).map(|projectile| {
                    projectile.destroy();
                    projectile.damage()
                });
                if let (Some(damage), Some(enemy)) = (damage, self.graph.get_mut::<Ship>(enemy)) {
                    enemy.damage(damage);
                }
            } else if let Some((player, projectile)) =
                pair.match_categories(first, second, Category::PLAYER_SHIP, Category::ENEMY_PROJECTILE)
            {
                if let Some(projectile) = self.graph.get_mut::<Projectile>(projectile) {
                    projectile.destroy();
                }
                self.hit_player(player);
            }
        }
    }

    fn hit_player(&mut self, player: NodeId) {
        let Some(ship) = self.graph.get_mut::<Ship>(player) else { return };
        if !ship.lose_life() {
            return;
        }

        let lives = ship.lives();
        log::debug!("Player hit, {} lives left", lives);
        if lives == 0 {
            log::info!("Player destroyed");
            if let Some(position) = self.graph.absolute_position(player) {
                self.emit_explosion(position);
            }
            self.remove_emitters(player);
        }
    }

    /// The wreck stays in the graph, its exhaust does not
    fn remove_emitters(&mut self, ship: NodeId) {
        let emitters: Vec<NodeId> = self
            .graph
            .children(ship)
            .iter()
            .copied()
            .filter(|&id| self.graph.get::<EmitterNode>(id).is_some())
            .collect();
        for id in emitters {
            if let Err(e) = self.graph.remove(id) {
                log::error!("Failed to remove emitter {:?}: {}", id, e);
            }
        }
    }

    fn emit_explosion(&mut self, position: Vec2) {
        self.commands.push(GameCommand::new(
            Category::PARTICLE_SYSTEM,
            Action::EmitParticles {
                kind: ParticleKind::Explosion,
                position,
                count: self.config.particles.explosion_count,
            },
        ));
    }

    fn remove_outside_entities(&mut self) {
        let bounds = self.bounding_rect();
        for id in self.physical_entities() {
            if id == self.nodes.player || self.graph.get::<Ship>(id).is_some_and(Ship::is_spawning) {
                continue;
            }
            let outside = self
                .graph
                .world_bounds(id)
                .is_some_and(|rect| !rect.intersects(&bounds));
            if outside {
                if let Err(e) = self.graph.mark_for_removal(id) {
                    log::error!("Failed to mark {:?} for removal: {}", id, e);
                }
            }
        }
    }

    fn remove_wrecks(&mut self) {
        for removed in self.graph.remove_wrecks() {
            if removed.category != Category::ENEMY_SHIP {
                continue;
            }

            if removed.cause == RemovalCause::Destroyed {
                let points = removed.node.get::<Ship>().map_or(0, Ship::points);
                self.score += points;
                log::debug!("Enemy destroyed at {:?}, +{} points", removed.world_position, points);

                self.emit_explosion(removed.world_position);
                if self.rng.gen_bool(f64::from(self.config.pickup_drop_chance)) {
                    self.spawn_powerup(removed.world_position);
                }
            } else {
                log::debug!("Enemy left the play area at {:?}", removed.world_position);
            }

            match self.progress.record_clear() {
                Advance::None => {}
                Advance::Round | Advance::Level => {
                    log::info!("Now at level {} round {}", self.progress.level().number(), self.progress.round());
                }
            }
        }
    }

    fn update_spawn_status(&mut self) {
        let bounds = self.bounding_rect();
        for id in self.graph.children(self.nodes.layer(Layer::Ship)).to_vec() {
            let inside = self
                .graph
                .world_bounds(id)
                .is_some_and(|rect| bounds.contains_rect(&rect));
            if !inside {
                continue;
            }
            if let Some(ship) = self.graph.get_mut::<Ship>(id) {
                if ship.is_spawning() {
                    ship.finish_spawning();
                    log::trace!("{:?} entered the play area", ship.kind());
                }
            }
        }
    }

    fn update_level_status(&mut self, dt: f32) {
        self.progress.advance_time(dt);
        if !self.progress.should_spawn() {
            return;
        }

        let kind = self.progress.next_enemy();
        let position = self.spawn_position(kind);
        match self.spawn_enemy(kind, position) {
            Ok(_) => self.progress.record_spawn(),
            Err(e) => log::error!("Failed to spawn {:?}: {}", kind, e),
        }
    }

    /// A point just above the bounding rect, so the enemy starts fully outside
    fn spawn_position(&mut self, kind: ShipKind) -> Vec2 {
        let bounds = self.bounding_rect();
        let size = kind.data().size;
        let half_width = size.x * 0.5;
        let (min_x, max_x) = (bounds.left + half_width, bounds.right() - half_width);
        let x = if min_x < max_x { self.rng.gen_range(min_x..=max_x) } else { bounds.center().x };
        Vec2::new(x, bounds.top - size.y * 0.5 - 1.0)
    }

    fn spawn_enemy(&mut self, kind: ShipKind, position: Vec2) -> Result<NodeId, SceneError> {
        let id = self
            .graph
            .attach_child(self.nodes.layer(Layer::Ship), self.factory.enemy(kind).with_position(position))?;
        log::debug!("Spawned {:?} at {:?}", kind, position);
        Ok(id)
    }

    fn spawn_powerup(&mut self, position: Vec2) {
        let kind = PickupKind::random(&mut self.rng);
        match self
            .graph
            .attach_child(self.nodes.layer(Layer::Object), self.factory.pickup(kind).with_position(position))
        {
            Ok(_) => log::debug!("Dropped {:?} at {:?}", kind, position),
            Err(e) => log::error!("Failed to drop {:?}: {}", kind, e),
        }
    }

    fn guide_enemies(&mut self) {
        if !self.is_player_alive() {
            return;
        }
        if let Some(target) = self.graph.absolute_position(self.nodes.player) {
            self.commands
                .push(GameCommand::new(Category::ENEMY_SHIP, Action::GuideTowards(target)));
        }
    }

    fn adjust_player_position(&mut self) {
        let view = self.view_bounds();
        if let Some(transform) = self.graph.transform_mut(self.nodes.player) {
            transform.position = view.clamp_point(transform.position);
        }
    }

    fn update_texts(&mut self) {
        let score = format!(
            "Score: {}   Level {} - Round {}",
            self.score,
            self.progress.level().number(),
            self.progress.round()
        );
        let lives = self
            .graph
            .get::<Ship>(self.nodes.player)
            .map_or(0, Ship::lives);

        self.set_text(self.nodes.score_text, score);
        self.set_text(self.nodes.lives_text, format!("Lives: {lives}"));
    }

    fn set_text(&mut self, id: NodeId, string: String) {
        let text = self.graph.get_mut::<TextNode>(id);
        debug_assert!(text.is_some(), "UI text node {id:?} missing");
        match text {
            Some(text) => text.set_string(string),
            None => log::error!("UI text node {:?} missing, \"{}\" not shown", id, string),
        }
    }

    fn update_shaders(&mut self) {
        let shader = self.shaders.get_mut(ShaderId::Background);
        debug_assert!(shader.is_ok(), "background shader missing");
        match shader {
            Ok(shader) => shader.set_uniform(BACKGROUND_TIME_UNIFORM, self.elapsed),
            Err(e) => log::error!("Shader uniforms not updated: {}", e),
        }
    }
}
