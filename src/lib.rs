//! Extinguished - drift between asteroids on a fire extinguisher
//!
//! Core modules:
//! - `sim`: Game entities (player, obstacles, particles) and the frame tick
//! - `gfx`: Software raster layer (surfaces, rotation, masks, blitting)
//! - `assets`: Image loading with a placeholder for missing files
//! - `settings`: JSON-backed game configuration

pub mod assets;
pub mod gfx;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Speed the keyboard rotates the player aim (degrees/s)
    pub const PLAYER_ROTATE_SPEED: f32 = 300.0;
    /// Acceleration applied while the extinguisher is active (pixels/s²)
    pub const PLAYER_PUSH_ACC: f32 = 300.0;
    /// Collision radius of the player
    pub const PLAYER_RADIUS: f32 = 30.0;

    /// Obstacle rotation speed is drawn from [-MAX, MAX] (degrees/s)
    pub const OBSTACLE_MAX_ROT_SPEED: f32 = 50.0;
    /// Obstacles spawn at least this far from the screen edge
    pub const OBSTACLE_SPAWN_MARGIN: i32 = 50;

    /// Default window and world dimensions
    pub const SCREEN_SIZE: Vec2 = Vec2::new(800.0, 600.0);
    pub const GAME_SIZE: Vec2 = Vec2::new(1600.0, 1200.0);

    /// Length of the debug aim line
    pub const AIM_LINE_LENGTH: f32 = 30.0;
    /// Border width of the game area outline
    pub const GAME_BORDER_WIDTH: i32 = 10;

    /// Smoke spawned behind the extinguisher
    pub const SMOKE_MIN_SPEED: i32 = 150;
    pub const SMOKE_MAX_SPEED: i32 = 200;
    pub const SMOKE_SPREAD_DEGREES: i32 = 20;
    pub const SMOKE_MIN_RADIUS: i32 = 3;
    pub const SMOKE_MAX_RADIUS: i32 = 5;
    /// Smoke lifetime range (seconds)
    pub const SMOKE_MIN_LIFETIME: f32 = 1.5;
    pub const SMOKE_MAX_LIFETIME: f32 = 2.0;
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Vector of length `r` pointing at `degrees` (screen space, y down)
#[inline]
pub fn from_polar(r: f32, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()) * r
}

/// Angle of `v` in degrees, in (-180, 180]
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}
