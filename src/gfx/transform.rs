//! Surface rotation

use glam::Vec2;
use image::RgbaImage;

use super::color::Color;
use super::surface::Surface;
use crate::wrap_degrees;

/// Rotate a surface counter-clockwise (as seen on screen) by `degrees`
///
/// The result is sized to the rotated bounding box, so it generally grows
/// for angles that are not multiples of 90°. Quarter turns are exact; other
/// angles sample the source with nearest-neighbour lookup. Uncovered corners
/// are filled with the colour key when the source has one, otherwise they
/// are transparent.
pub fn rotate(surface: &Surface, degrees: f32) -> Surface {
    let angle = wrap_degrees(degrees);
    let quarter = angle / 90.0;
    if (quarter - quarter.round()).abs() < 1e-6 {
        return rotate_quarters(surface, quarter.round() as u32 % 4);
    }

    let (w, h) = (surface.width() as f32, surface.height() as f32);
    let (sin, cos) = angle.to_radians().sin_cos();
    let out_w = (w * cos.abs() + h * sin.abs()).ceil().max(1.0) as u32;
    let out_h = (w * sin.abs() + h * cos.abs()).ceil().max(1.0) as u32;

    let fill = surface.colorkey().unwrap_or(Color::TRANSPARENT);
    let mut out = RgbaImage::from_pixel(out_w, out_h, fill.into());

    let src_center = Vec2::new(w, h) * 0.5;
    let dst_center = Vec2::new(out_w as f32, out_h as f32) * 0.5;
    let src = surface.pixels();

    for (x, y, px) in out.enumerate_pixels_mut() {
        let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - dst_center;
        // Inverse of the on-screen counter-clockwise rotation (y down)
        let s = Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + src_center;
        let (sx, sy) = (s.x.floor(), s.y.floor());
        if sx >= 0.0 && sy >= 0.0 && sx < w && sy < h {
            *px = *src.get_pixel(sx as u32, sy as u32);
        }
    }

    let mut rotated = Surface::from_rgba(out);
    rotated.set_colorkey(surface.colorkey());
    rotated
}

fn rotate_quarters(surface: &Surface, quarters: u32) -> Surface {
    let src = surface.pixels();
    // imageops rotations are clockwise
    let out = match quarters {
        0 => src.clone(),
        1 => image::imageops::rotate270(src),
        2 => image::imageops::rotate180(src),
        _ => image::imageops::rotate90(src),
    };
    let mut rotated = Surface::from_rgba(out);
    rotated.set_colorkey(surface.colorkey());
    rotated
}
