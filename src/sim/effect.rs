//! One-off visual effects placed in the world

use std::rc::Rc;

use glam::Vec2;

use crate::gfx::{BlendMode, Rect, Surface};

/// A static image centered on a world position that can be hidden
#[derive(Debug, Clone)]
pub struct Effect {
    pub image: Rc<Surface>,
    pub rect: Rect,
    pub visible: bool,
}

impl Effect {
    pub fn new(image: Rc<Surface>, pos: Vec2) -> Self {
        let rect = image.get_rect_centered(pos);
        Self {
            image,
            rect,
            visible: true,
        }
    }

    pub fn draw(&self, screen: &mut Surface, camera: Vec2) {
        if self.visible {
            screen.blit(
                &self.image,
                self.rect.top_left().as_vec2() + camera,
                BlendMode::Alpha,
            );
        }
    }
}
