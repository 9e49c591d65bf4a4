//! Rotating asteroid obstacles

use std::rc::Rc;

use glam::Vec2;
use rand::Rng;

use crate::consts::OBSTACLE_MAX_ROT_SPEED;
use crate::gfx::{BlendMode, Mask, Rect, Surface, rotate};
use crate::wrap_degrees;

/// A stationary asteroid spinning in place
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Center position, fixed for the obstacle's lifetime
    pub pos: Vec2,
    /// Rotation speed (degrees/s)
    pub rot_speed: f32,
    /// Current rotation (degrees, [0, 360))
    pub angle: f32,
    /// Half the base image width; only drawn as a debug circle
    pub radius: f32,
    base_image: Rc<Surface>,
    image: Surface,
    rect: Rect,
    mask: Mask,
}

impl Obstacle {
    /// Obstacle with a random spin speed in [-50, 50] deg/s and a random
    /// starting angle
    pub fn new<R: Rng + ?Sized>(pos: Vec2, image: Rc<Surface>, rng: &mut R) -> Self {
        let rot_speed = rng.random_range(-OBSTACLE_MAX_ROT_SPEED..=OBSTACLE_MAX_ROT_SPEED);
        let angle = rng.random_range(0.0..360.0);
        Self::with_motion(pos, image, rot_speed, angle)
    }

    /// Obstacle with an explicit spin speed and starting angle
    pub fn with_motion(pos: Vec2, image: Rc<Surface>, rot_speed: f32, angle: f32) -> Self {
        let radius = image.width() as f32 / 2.0;
        let mut obstacle = Self {
            pos,
            rot_speed,
            angle: wrap_degrees(angle),
            radius,
            image: Surface::clone(&image),
            rect: Rect::default(),
            mask: Mask::new(0, 0),
            base_image: image,
        };
        obstacle.refresh();
        obstacle
    }

    /// Spin by `rot_speed * dt` and refresh the rotated sprite
    pub fn update(&mut self, dt: f32) {
        if self.rot_speed != 0.0 {
            self.angle = wrap_degrees(self.angle + self.rot_speed * dt);
        }
        self.refresh();
    }

    /// Recompute image, rect and mask from the current angle
    ///
    /// The mask always matches the drawn orientation.
    pub fn refresh(&mut self) {
        self.image = rotate(&self.base_image, self.angle);
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

    pub fn base_image(&self) -> &Rc<Surface> {
        &self.base_image
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
