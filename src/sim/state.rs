//! World state
//!
//! Everything a running game needs between frames: the player, the
//! asteroid field, smoke, the camera and the RNG that drives spawning.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effect::Effect;
use super::obstacle::Obstacle;
use super::particles::{ImageCache, ParticleGroup, SmokeParticle};
use super::player::{BounceMode, Player};
use crate::assets::AssetLibrary;
use crate::consts::OBSTACLE_SPAWN_MARGIN;
use crate::gfx::color::SMOKE;
use crate::gfx::{BlendMode, make_circle_image};
use crate::settings::Settings;

/// The complete game world
#[derive(Debug)]
pub struct World {
    pub settings: Settings,
    pub rng: Pcg32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub smoke: ParticleGroup<SmokeParticle>,
    pub effects: Vec<Effect>,
    /// Offset added to world positions when drawing
    pub camera: Vec2,
    /// Draw collision circles and the aim line
    pub debug: bool,
    /// Frames simulated so far
    pub frame: u64,
}

impl World {
    /// Build a world: player in the middle of the screen, obstacles scattered
    /// over the screen area with random asteroid images
    pub fn new(settings: Settings, assets: &AssetLibrary) -> Self {
        let mut rng = Pcg32::seed_from_u64(settings.seed);

        let screen = settings.screen_size;
        let mut player = Player::new((screen / 2.0).floor(), assets.player.clone());
        player.bounce_mode = if settings.bounce_once_per_frame {
            BounceMode::OncePerFrame
        } else {
            BounceMode::PerObstacle
        };

        let max_x = (screen.x as i32 - OBSTACLE_SPAWN_MARGIN).max(OBSTACLE_SPAWN_MARGIN);
        let max_y = (screen.y as i32 - OBSTACLE_SPAWN_MARGIN).max(OBSTACLE_SPAWN_MARGIN);
        let obstacles = (0..settings.obstacle_count)
            .map(|_| {
                let pos = Vec2::new(
                    rng.random_range(OBSTACLE_SPAWN_MARGIN..=max_x) as f32,
                    rng.random_range(OBSTACLE_SPAWN_MARGIN..=max_y) as f32,
                );
                let image = assets.random_asteroid(&mut rng);
                Obstacle::new(pos, image, &mut rng)
            })
            .collect::<Vec<_>>();

        log::info!(
            "World created: {} obstacles, game size {}, seed {}",
            obstacles.len(),
            settings.game_size,
            settings.seed
        );

        let smoke = ParticleGroup::new(
            ImageCache::new(|radius: &u32| make_circle_image(*radius, SMOKE)),
            BlendMode::Add,
        );

        let mut world = Self {
            debug: settings.debug,
            settings,
            rng,
            player,
            obstacles,
            smoke,
            effects: Vec::new(),
            camera: Vec2::ZERO,
            frame: 0,
        };
        world.camera = world.camera_for_player();
        world
    }

    /// Camera offset that centers the player on screen
    pub fn camera_for_player(&self) -> Vec2 {
        (self.settings.screen_size / 2.0).floor() - self.player.pos
    }
}
