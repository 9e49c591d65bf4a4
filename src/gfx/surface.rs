//! RGBA pixel surfaces

use std::path::Path;

use glam::{IVec2, Vec2};
use image::RgbaImage;

use super::color::Color;
use super::rect::Rect;

/// How source pixels are combined with the destination when blitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Source-over alpha compositing
    #[default]
    Alpha,
    /// Per-channel saturating add, weighted by source alpha
    Add,
}

/// An owned RGBA8 bitmap with an optional colour key
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixels: RgbaImage,
    colorkey: Option<Color>,
}

impl Surface {
    /// Fully transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            colorkey: None,
        }
    }

    /// Surface filled with a single colour
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, color.into()),
            colorkey: None,
        }
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            colorkey: None,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width() as i32, self.height() as i32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn colorkey(&self) -> Option<Color> {
        self.colorkey
    }

    /// Pixels matching the key colour are skipped when blitting and are
    /// clear in masks
    pub fn set_colorkey(&mut self, key: Option<Color>) {
        self.colorkey = key;
    }

    /// Colour at `(x, y)`, or `None` when out of bounds
    pub fn get_at(&self, x: i32, y: i32) -> Option<Color> {
        if self.contains(x, y) {
            Some((*self.pixels.get_pixel(x as u32, y as u32)).into())
        } else {
            None
        }
    }

    /// Writes outside the surface are ignored
    pub fn set_at(&mut self, x: i32, y: i32, color: Color) {
        if self.contains(x, y) {
            self.pixels.put_pixel(x as u32, y as u32, color.into());
        }
    }

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Whether the pixel is drawn when this surface is blitted
    #[inline]
    pub fn is_visible(&self, color: Color) -> bool {
        match self.colorkey {
            Some(key) => !key.same_rgb(color),
            None => color.a > 0,
        }
    }

    pub fn fill(&mut self, color: Color) {
        let px: image::Rgba<u8> = color.into();
        for p in self.pixels.pixels_mut() {
            *p = px;
        }
    }

    /// Fill a rectangle, clipped to the surface
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(area) = rect.clip(&self.bounds()) else {
            return;
        };
        let px: image::Rgba<u8> = color.into();
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.pixels.put_pixel(x as u32, y as u32, px);
            }
        }
    }

    /// Rectangle covering the whole surface at the origin
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    /// Rectangle of this surface's size centered on `center`
    pub fn get_rect_centered(&self, center: Vec2) -> Rect {
        Rect::from_center(center, self.size())
    }

    /// Draw `src` with its top-left corner at `dest`, clipped to this surface
    ///
    /// Fractional destinations are truncated toward zero.
    pub fn blit(&mut self, src: &Surface, dest: Vec2, mode: BlendMode) {
        let origin = dest.as_ivec2();
        let target = Rect::new(origin.x, origin.y, src.width() as i32, src.height() as i32);
        let Some(area) = target.clip(&self.bounds()) else {
            return;
        };

        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let s: Color = (*src
                    .pixels
                    .get_pixel((x - origin.x) as u32, (y - origin.y) as u32))
                .into();
                if !src.is_visible(s) {
                    continue;
                }
                // Colour-keyed sources are treated as opaque
                let s = if src.colorkey.is_some() {
                    Color { a: 255, ..s }
                } else {
                    s
                };
                let d: Color = (*self.pixels.get_pixel(x as u32, y as u32)).into();
                let out = match mode {
                    BlendMode::Alpha => blend_alpha(s, d),
                    BlendMode::Add => blend_add(s, d),
                };
                self.pixels.put_pixel(x as u32, y as u32, out.into());
            }
        }
    }

    /// Write the surface to a PNG file
    pub fn save_png(&self, path: &Path) -> image::ImageResult<()> {
        self.pixels.save_with_format(path, image::ImageFormat::Png)
    }
}

#[inline]
fn mix(s: u8, d: u8, a: u32) -> u8 {
    ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8
}

fn blend_alpha(s: Color, d: Color) -> Color {
    let a = s.a as u32;
    if a == 255 {
        return s;
    }
    Color {
        r: mix(s.r, d.r, a),
        g: mix(s.g, d.g, a),
        b: mix(s.b, d.b, a),
        a: (a + d.a as u32 * (255 - a) / 255).min(255) as u8,
    }
}

fn blend_add(s: Color, d: Color) -> Color {
    let a = s.a as u32;
    let add = |s: u8, d: u8| (d as u32 + s as u32 * a / 255).min(255) as u8;
    Color {
        r: add(s.r, d.r),
        g: add(s.g, d.g),
        b: add(s.b, d.b),
        a: d.a.max(s.a),
    }
}
