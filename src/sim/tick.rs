//! Per-frame update and drawing
//!
//! One call to [`tick`] applies the frame's input, moves everything by the
//! measured delta-time and re-centers the camera. [`render`] then paints the
//! world onto a screen surface.

use glam::Vec2;
use rand::Rng;

use super::particles::SmokeParticle;
use super::player::PlayerContacts;
use super::state::World;
use crate::consts::*;
use crate::gfx::color::{BLACK, CYAN, GAME_BORDER, RED};
use crate::gfx::{Rect, Surface, circle, line, rect_outline};
use crate::{angle_of, from_polar, wrap_degrees};

/// Input gathered for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Extinguisher held (up/W key or left mouse button)
    pub pushing: bool,
    /// Keyboard rotation: -1 counter-clockwise, +1 clockwise, 0 none
    pub rotate: f32,
    /// Mouse position in screen space while aiming with the mouse
    pub aim_at: Option<Vec2>,
    /// Flip the debug overlay (F3)
    pub toggle_debug: bool,
}

/// Advance the world by one frame of `dt` seconds
pub fn tick(world: &mut World, input: &FrameInput, dt: f32) -> PlayerContacts {
    if input.toggle_debug {
        world.debug = !world.debug;
        log::info!("Debug overlay {}", if world.debug { "on" } else { "off" });
    }

    let player = &mut world.player;
    player.pushing = input.pushing;
    if input.rotate != 0.0 {
        player.angle = wrap_degrees(player.angle + input.rotate.signum() * PLAYER_ROTATE_SPEED * dt);
    }
    // The mouse aims relative to the screen center, where the player is drawn
    if let Some(mouse) = input.aim_at {
        let center = (world.settings.screen_size / 2.0).floor();
        player.angle = angle_of(mouse - center);
    }

    if player.pushing {
        spawn_smoke(world);
    }

    let contacts = world
        .player
        .update(dt, world.settings.game_size, &world.obstacles);

    for obstacle in &mut world.obstacles {
        obstacle.update(dt);
    }

    world.smoke.update(dt);
    world.camera = world.camera_for_player();
    world.frame += 1;

    contacts
}

/// Emit one smoke puff out of the extinguisher nozzle
fn spawn_smoke(world: &mut World) {
    let rng = &mut world.rng;
    let speed = rng.random_range(SMOKE_MIN_SPEED..=SMOKE_MAX_SPEED) as f32;
    let spread = rng.random_range(-SMOKE_SPREAD_DEGREES..=SMOKE_SPREAD_DEGREES) as f32;
    let radius = rng.random_range(SMOKE_MIN_RADIUS..=SMOKE_MAX_RADIUS) as u32;

    let player = &world.player;
    let vel = from_polar(speed, wrap_degrees(player.angle + spread)) + player.vel;
    let puff = SmokeParticle::new(player.pos, vel, radius, rng);
    world.smoke.add(puff);
}

/// Draw the world onto `screen`
pub fn render(world: &mut World, screen: &mut Surface) {
    let camera = world.camera;
    screen.fill(BLACK);

    for obstacle in &world.obstacles {
        obstacle.draw(screen, camera);
        if world.debug {
            circle(screen, CYAN, obstacle.pos + camera, obstacle.radius, 1);
        }
    }

    for effect in &world.effects {
        effect.draw(screen, camera);
    }

    let player = &world.player;
    player.draw(screen, camera);
    if world.debug {
        circle(screen, CYAN, player.pos + camera, player.radius, 1);
        let aim = from_polar(AIM_LINE_LENGTH, player.angle);
        line(screen, RED, player.pos + camera, player.pos + aim + camera, 3);
    }

    world.smoke.draw(screen, camera);

    let size = world.settings.game_size;
    let border = Rect::new(camera.x as i32, camera.y as i32, size.x as i32, size.y as i32);
    rect_outline(screen, GAME_BORDER, border, GAME_BORDER_WIDTH);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLibrary;
    use crate::gfx::color::{GREEN, YELLOW};
    use crate::gfx::make_circle_image;
    use crate::settings::Settings;

    fn world_with(obstacle_count: usize) -> World {
        let assets = AssetLibrary::from_images(
            make_circle_image(30, GREEN),
            vec![Surface::filled(60, 60, YELLOW)],
        );
        let settings = Settings {
            obstacle_count,
            ..Settings::default()
        };
        World::new(settings, &assets)
    }

    #[test]
    fn test_keyboard_rotation_wraps() {
        let mut world = world_with(0);
        let input = FrameInput {
            rotate: -1.0,
            ..Default::default()
        };
        tick(&mut world, &input, 0.1);
        assert!((world.player.angle - 330.0).abs() < 1e-3);

        let input = FrameInput {
            rotate: 1.0,
            ..Default::default()
        };
        tick(&mut world, &input, 0.2);
        assert!((world.player.angle - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_mouse_aim_snaps_to_cursor() {
        let mut world = world_with(0);
        let input = FrameInput {
            aim_at: Some(Vec2::new(400.0, 500.0)),
            ..Default::default()
        };
        tick(&mut world, &input, 0.0);
        assert!((world.player.angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_pushing_spawns_smoke_and_moves_player() {
        let mut world = world_with(0);
        let input = FrameInput {
            pushing: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut world, &input, 1.0 / 60.0);
        }
        assert_eq!(world.smoke.len(), 10);
        // Aim 0° points right, so thrust drives the player left
        assert!(world.player.vel.x < 0.0);
        assert!(world.player.pos.x < 400.0);
        assert_eq!(world.frame, 10);
    }

    #[test]
    fn test_camera_follows_player() {
        let mut world = world_with(0);
        world.player.vel = Vec2::new(60.0, 0.0);
        tick(&mut world, &FrameInput::default(), 1.0);
        assert_eq!(world.player.pos, Vec2::new(460.0, 300.0));
        assert_eq!(world.camera, Vec2::new(-60.0, 0.0));
    }

    #[test]
    fn test_toggle_debug() {
        let mut world = world_with(0);
        assert!(world.debug);
        let input = FrameInput {
            toggle_debug: true,
            ..Default::default()
        };
        tick(&mut world, &input, 0.0);
        assert!(!world.debug);
    }

    #[test]
    fn test_obstacles_spin_every_tick() {
        let mut world = world_with(3);
        for o in &mut world.obstacles {
            o.rot_speed = 10.0;
            o.angle = 0.0;
        }
        tick(&mut world, &FrameInput::default(), 0.5);
        for o in &world.obstacles {
            assert!((o.angle - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_render_draws_player_and_border() {
        let mut world = world_with(0);
        world.debug = false;
        let mut screen = Surface::new(800, 600);
        render(&mut world, &mut screen);

        // Player centered on screen
        assert_eq!(screen.get_at(400, 300), Some(GREEN));
        // Game border starts at the camera offset (0, 0)
        assert_eq!(screen.get_at(0, 300), Some(GAME_BORDER));
        assert_eq!(screen.get_at(200, 200), Some(BLACK));
    }

    #[test]
    fn test_render_draws_visible_effects() {
        use crate::sim::Effect;
        use std::rc::Rc;

        let mut world = world_with(0);
        world.debug = false;
        let flash = Rc::new(Surface::filled(10, 10, YELLOW));
        world.effects.push(Effect::new(flash.clone(), Vec2::new(100.0, 100.0)));
        let mut hidden = Effect::new(flash, Vec2::new(200.0, 100.0));
        hidden.visible = false;
        world.effects.push(hidden);

        let mut screen = Surface::new(800, 600);
        render(&mut world, &mut screen);
        assert_eq!(screen.get_at(100, 100), Some(YELLOW));
        assert_eq!(screen.get_at(200, 100), Some(BLACK));
    }

    #[test]
    fn test_render_debug_overlay() {
        let mut world = world_with(0);
        let mut screen = Surface::new(800, 600);
        render(&mut world, &mut screen);

        // Aim line runs right from the player's center
        assert_eq!(screen.get_at(420, 300), Some(RED));
        // Collision circle outline at the radius
        assert_eq!(screen.get_at(400, 270), Some(CYAN));
    }
}
