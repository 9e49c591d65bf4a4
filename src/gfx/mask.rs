//! Per-pixel collision masks
//!
//! A mask is a packed bitmap with one bit per pixel. Bits are set where the
//! source surface is solid, so overlap tests follow the drawn shape instead
//! of its bounding box.

use glam::IVec2;

use super::rect::Rect;
use super::surface::Surface;

/// Alpha values above this count as solid
pub const ALPHA_THRESHOLD: u8 = 127;

const WORD_BITS: usize = 64;

/// Packed per-pixel bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// Empty mask of the given size
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let words_per_row = (width as usize).div_ceil(WORD_BITS);
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height as usize],
        }
    }

    /// Build a mask from a surface's solid pixels
    ///
    /// With a colour key, every pixel not matching the key is solid.
    /// Otherwise a pixel is solid when its alpha exceeds [`ALPHA_THRESHOLD`].
    pub fn from_surface(surface: &Surface) -> Self {
        let mut mask = Self::new(surface.width() as i32, surface.height() as i32);
        let key = surface.colorkey();
        for (x, y, px) in surface.pixels().enumerate_pixels() {
            let [r, g, b, a] = px.0;
            let solid = match key {
                Some(key) => !(key.r == r && key.g == g && key.b == b),
                None => a > ALPHA_THRESHOLD,
            };
            if solid {
                mask.set(x as i32, y as i32, true);
            }
        }
        mask
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<(usize, u64)> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let word = y as usize * self.words_per_row + x as usize / WORD_BITS;
        Some((word, 1u64 << (x as usize % WORD_BITS)))
    }

    /// Out-of-bounds reads are clear
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y)
            .is_some_and(|(word, bit)| self.bits[word] & bit != 0)
    }

    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        if let Some((word, bit)) = self.index(x, y) {
            if value {
                self.bits[word] |= bit;
            } else {
                self.bits[word] &= !bit;
            }
        }
    }

    /// Number of set bits
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    /// First point where `other`, placed at `offset` relative to this mask's
    /// top-left corner, overlaps this mask
    ///
    /// The returned point is in this mask's coordinates. Points are scanned
    /// row by row, left to right.
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> Option<IVec2> {
        let ours = Rect::new(0, 0, self.width, self.height);
        let theirs = Rect::new(offset.x, offset.y, other.width, other.height);
        let area = ours.clip(&theirs)?;

        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }
}
