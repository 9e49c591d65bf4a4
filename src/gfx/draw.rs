//! Debug drawing primitives

use glam::Vec2;

use super::color::{BLACK, Color};
use super::rect::Rect;
use super::surface::Surface;

/// Draw a circle. `width == 0` fills it, otherwise only a ring of that
/// thickness is drawn inside the radius.
pub fn circle(surface: &mut Surface, color: Color, center: Vec2, radius: f32, width: i32) {
    if radius <= 0.0 {
        return;
    }
    let outer = radius * radius;
    let inner = if width > 0 && (width as f32) < radius {
        let r = radius - width as f32;
        r * r
    } else {
        -1.0
    };

    let x0 = (center.x - radius).floor() as i32;
    let x1 = (center.x + radius).ceil() as i32;
    let y0 = (center.y - radius).floor() as i32;
    let y1 = (center.y + radius).ceil() as i32;
    for y in y0..y1 {
        for x in x0..x1 {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            let dist = d.length_squared();
            if dist <= outer && dist > inner {
                surface.set_at(x, y, color);
            }
        }
    }
}

/// Draw a line segment of the given thickness
pub fn line(surface: &mut Surface, color: Color, start: Vec2, end: Vec2, width: i32) {
    let half = (width.max(1) as f32) * 0.5;
    let seg = end - start;
    let len_sq = seg.length_squared();

    let lo = start.min(end) - Vec2::splat(half);
    let hi = start.max(end) + Vec2::splat(half);
    for y in lo.y.floor() as i32..hi.y.ceil() as i32 {
        for x in lo.x.floor() as i32..hi.x.ceil() as i32 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let t = if len_sq > 0.0 {
                ((p - start).dot(seg) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            if (p - (start + seg * t)).length() <= half {
                surface.set_at(x, y, color);
            }
        }
    }
}

/// Draw the outline of a rectangle with a border growing inward
pub fn rect_outline(surface: &mut Surface, color: Color, rect: Rect, width: i32) {
    if width <= 0 || width * 2 >= rect.w.min(rect.h) {
        surface.fill_rect(rect, color);
        return;
    }
    surface.fill_rect(Rect::new(rect.x, rect.y, rect.w, width), color);
    surface.fill_rect(Rect::new(rect.x, rect.bottom() - width, rect.w, width), color);
    surface.fill_rect(Rect::new(rect.x, rect.y, width, rect.h), color);
    surface.fill_rect(Rect::new(rect.right() - width, rect.y, width, rect.h), color);
}

/// Square image of side `2 * radius` holding a filled circle, with BLACK as
/// the colour key
pub fn make_circle_image(radius: u32, color: Color) -> Surface {
    let side = radius * 2;
    let mut image = Surface::filled(side, side, BLACK);
    circle(&mut image, color, Vec2::splat(radius as f32), radius as f32, 0);
    image.set_colorkey(Some(BLACK));
    image
}
