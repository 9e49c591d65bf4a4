//! The astronaut, pushed around by its fire extinguisher

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{EdgeHits, bounce_off_bounds, sprites_overlap};
use super::obstacle::Obstacle;
use crate::consts::{PLAYER_PUSH_ACC, PLAYER_RADIUS};
use crate::from_polar;
use crate::gfx::{BlendMode, Mask, Rect, Surface, rotate};

/// How obstacle overlaps within one frame turn into bounces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BounceMode {
    /// Negate velocity once for every overlapping obstacle. Two overlaps in
    /// the same frame cancel out.
    #[default]
    PerObstacle,
    /// Negate velocity once if any obstacle overlaps
    OncePerFrame,
}

/// What happened during one [`Player::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerContacts {
    /// World edges the player was pushed back from
    pub edges: EdgeHits,
    /// Number of obstacles whose masks overlapped the player
    pub obstacles: usize,
    /// Number of times the velocity was negated by obstacles
    pub bounces: usize,
}

/// The player entity
#[derive(Debug, Clone)]
pub struct Player {
    /// Center position (pixels)
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    /// Direction the extinguisher points (degrees, y down)
    pub angle: f32,
    /// Whether the extinguisher is firing
    pub pushing: bool,
    /// Radius used for the world-edge collision
    pub radius: f32,
    pub bounce_mode: BounceMode,
    base_image: Rc<Surface>,
    image: Surface,
    rect: Rect,
    mask: Mask,
}

impl Player {
    pub fn new(pos: Vec2, image: Rc<Surface>) -> Self {
        let mut player = Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            angle: 0.0,
            pushing: false,
            radius: PLAYER_RADIUS,
            bounce_mode: BounceMode::default(),
            image: Surface::clone(&image),
            rect: Rect::default(),
            mask: Mask::new(0, 0),
            base_image: image,
        };
        player.refresh();
        player
    }

    /// Advance one frame: thrust, integration, world edges, then obstacles
    ///
    /// The sprite, rect and mask are refreshed after moving and before the
    /// obstacle test, so collisions use this frame's pose.
    pub fn update(&mut self, dt: f32, game_bounds: Vec2, obstacles: &[Obstacle]) -> PlayerContacts {
        // Thrust pushes away from where the extinguisher points
        self.acc = if self.pushing {
            from_polar(-PLAYER_PUSH_ACC, self.angle)
        } else {
            Vec2::ZERO
        };

        self.vel += self.acc * dt;
        self.pos += self.vel * dt;

        let edges = bounce_off_bounds(&mut self.pos, &mut self.vel, self.radius, game_bounds);
        if edges.any() {
            log::trace!("Player bounced off world edge: {:?}", edges);
        }

        self.refresh();

        let obstacles_hit = obstacles
            .iter()
            .filter(|o| sprites_overlap(&self.rect, &self.mask, &o.rect(), o.mask()).is_some())
            .count();

        let bounces = match self.bounce_mode {
            BounceMode::PerObstacle => obstacles_hit,
            BounceMode::OncePerFrame => obstacles_hit.min(1),
        };
        for _ in 0..bounces {
            self.vel = -self.vel;
        }
        if obstacles_hit > 0 {
            log::debug!(
                "Player hit {} obstacle(s), {} bounce(s), vel now {}",
                obstacles_hit,
                bounces,
                self.vel
            );
        }

        PlayerContacts {
            edges,
            obstacles: obstacles_hit,
            bounces,
        }
    }

    /// Recompute image, rect and mask from the current angle and position
    pub fn refresh(&mut self) {
        self.image = rotate(&self.base_image, -self.angle);
        self.rect = self.image.get_rect_centered(self.pos);
        self.mask = Mask::from_surface(&self.image);
    }

    pub fn draw(&self, screen: &mut Surface, camera: Vec2) {
        screen.blit(
            &self.image,
            self.rect.top_left().as_vec2() + camera,
            BlendMode::Alpha,
        );
    }

    pub fn image(&self) -> &Surface {
        &self.image
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::color::{BLACK, GREEN, YELLOW};
    use crate::gfx::make_circle_image;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn astro() -> Rc<Surface> {
        Rc::new(make_circle_image(30, GREEN))
    }

    fn rock(pos: Vec2) -> Obstacle {
        Obstacle::with_motion(pos, Rc::new(Surface::filled(40, 40, YELLOW)), 0.0, 0.0)
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_new_player_defaults() {
        let p = Player::new(Vec2::new(400.0, 300.0), astro());
        assert_eq!(p.vel, Vec2::ZERO);
        assert_eq!(p.acc, Vec2::ZERO);
        assert_eq!(p.radius, 30.0);
        assert!(!p.pushing);
        assert_eq!(p.rect(), Rect::new(370, 270, 60, 60));
    }

    #[test]
    fn test_corner_clamp_and_invert() {
        let mut p = Player::new(Vec2::new(10.0, 10.0), astro());
        p.vel = Vec2::new(-50.0, -50.0);

        let contacts = p.update(0.0, BOUNDS, &[]);
        assert_eq!(p.pos, Vec2::new(30.0, 30.0));
        assert_eq!(p.vel, Vec2::new(50.0, 50.0));
        assert!(contacts.edges.left && contacts.edges.top);
    }

    #[test]
    fn test_pushing_thrusts_opposite_the_aim() {
        let mut p = Player::new(Vec2::new(400.0, 300.0), astro());
        p.pushing = true;
        p.angle = 0.0;

        p.update(1.0, BOUNDS, &[]);
        assert!(approx(p.acc, Vec2::new(-300.0, 0.0)));
        assert!(approx(p.vel, Vec2::new(-300.0, 0.0)));
        assert!(approx(p.pos, Vec2::new(100.0, 300.0)));
    }

    #[test]
    fn test_releasing_clears_acceleration() {
        let mut p = Player::new(Vec2::new(400.0, 300.0), astro());
        p.pushing = true;
        p.angle = 90.0;
        p.update(0.1, BOUNDS, &[]);
        assert!(p.acc.length() > 0.0);

        p.pushing = false;
        let vel = p.vel;
        p.update(0.1, BOUNDS, &[]);
        assert_eq!(p.acc, Vec2::ZERO);
        assert_eq!(p.vel, vel);
    }

    #[test]
    fn test_clamp_is_idempotent_when_at_rest() {
        let mut p = Player::new(Vec2::new(10.0, 300.0), astro());
        p.vel = Vec2::new(-20.0, 0.0);
        p.update(0.0, BOUNDS, &[]);
        assert_eq!(p.pos.x, 30.0);

        p.vel = Vec2::ZERO;
        for _ in 0..10 {
            let contacts = p.update(0.5, BOUNDS, &[]);
            assert!(!contacts.edges.any());
            assert_eq!(p.pos, Vec2::new(30.0, 300.0));
        }
    }

    #[test]
    fn test_obstacle_overlap_reverses_velocity() {
        let mut p = Player::new(Vec2::new(400.0, 300.0), astro());
        p.vel = Vec2::new(12.0, -7.0);
        let rocks = [rock(Vec2::new(420.0, 300.0))];

        let contacts = p.update(0.0, BOUNDS, &rocks);
        assert_eq!(contacts.obstacles, 1);
        assert_eq!(p.vel, Vec2::new(-12.0, 7.0));
    }

    #[test]
    fn test_distant_obstacle_is_ignored() {
        let mut p = Player::new(Vec2::new(400.0, 300.0), astro());
        p.vel = Vec2::new(12.0, -7.0);
        let rocks = [rock(Vec2::new(600.0, 300.0))];

        let contacts = p.update(0.0, BOUNDS, &rocks);
        assert_eq!(contacts.obstacles, 0);
        assert_eq!(p.vel, Vec2::new(12.0, -7.0));
    }

    #[test]
    fn test_bounding_boxes_touching_but_masks_apart() {
        // The circle's corner pixels are keyed out, so a rock tucked into the
        // corner of the player's rect does not collide
        let mut p = Player::new(Vec2::new(400.0, 300.0), astro());
        p.vel = Vec2::new(1.0, 1.0);
        let rocks = [rock(Vec2::new(442.0, 342.0))];
        assert!(p.rect().intersects(&rocks[0].rect()));

        let contacts = p.update(0.0, BOUNDS, &rocks);
        assert_eq!(contacts.obstacles, 0);
        assert_eq!(p.vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_two_overlaps_cancel_out() {
        let mut p = Player::new(Vec2::new(400.0, 300.0), astro());
        p.vel = Vec2::new(5.0, 5.0);
        let rocks = [rock(Vec2::new(420.0, 300.0)), rock(Vec2::new(380.0, 300.0))];

        let contacts = p.update(0.0, BOUNDS, &rocks);
        assert_eq!(contacts.obstacles, 2);
        assert_eq!(contacts.bounces, 2);
        assert_eq!(p.vel, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_once_per_frame_bounces_once() {
        let mut p = Player::new(Vec2::new(400.0, 300.0), astro());
        p.bounce_mode = BounceMode::OncePerFrame;
        p.vel = Vec2::new(5.0, 5.0);
        let rocks = [rock(Vec2::new(420.0, 300.0)), rock(Vec2::new(380.0, 300.0))];

        let contacts = p.update(0.0, BOUNDS, &rocks);
        assert_eq!(contacts.bounces, 1);
        assert_eq!(p.vel, Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn test_refresh_uses_current_angle() {
        // Non-square sprite makes the rotation visible in the rect
        let mut p = Player::new(Vec2::new(100.0, 100.0), Rc::new(Surface::filled(40, 20, GREEN)));
        assert_eq!(p.rect().size(), glam::IVec2::new(40, 20));

        p.angle = 90.0;
        p.update(0.0, BOUNDS, &[]);
        assert_eq!(p.rect().size(), glam::IVec2::new(20, 40));
        assert_eq!(p.mask().size(), glam::IVec2::new(20, 40));
    }

    #[test]
    fn test_draw_at_camera_offset() {
        let p = Player::new(Vec2::new(30.0, 30.0), astro());
        let mut screen = Surface::filled(200, 200, BLACK);
        p.draw(&mut screen, Vec2::new(100.0, 100.0));
        assert_eq!(screen.get_at(130, 130), Some(GREEN));
        // Keyed-out corner stays untouched
        assert_eq!(screen.get_at(100, 100), Some(BLACK));
    }

    proptest! {
        #[test]
        fn prop_coasting_keeps_velocity(
            dt in 0.0f32..0.5,
            vx in -100.0f32..100.0,
            vy in -100.0f32..100.0,
            angle in 0.0f32..360.0,
        ) {
            let mut p = Player::new(Vec2::new(800.0, 600.0), astro());
            p.angle = angle;
            p.vel = Vec2::new(vx, vy);
            p.update(dt, Vec2::new(1600.0, 1200.0), &[]);
            prop_assert_eq!(p.acc, Vec2::ZERO);
            prop_assert_eq!(p.vel, Vec2::new(vx, vy));
        }

        #[test]
        fn prop_left_edge_clamps_to_radius(
            x in -200.0f32..29.0,
            vx in -100.0f32..100.0,
        ) {
            let mut p = Player::new(Vec2::new(x, 300.0), astro());
            p.vel = Vec2::new(vx, 0.0);
            p.update(0.0, BOUNDS, &[]);
            prop_assert_eq!(p.pos.x, 30.0);
            prop_assert_eq!(p.vel.x, -vx);
        }
    }
}
