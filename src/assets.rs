//! Image loading
//!
//! Images are decoded with the `image` crate into [`Surface`]s and shared
//! as read-only handles. A missing file is not fatal: the classic
//! black-and-magenta checkerboard is returned in its place.

use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::gfx::color::MAGENTA;
use crate::gfx::{Rect, Surface};

/// Player sprite file name
pub const PLAYER_IMAGE_FILENAME: &str = "astro.png";

/// Asteroid sprite file names
pub const ASTEROID_IMAGE_FILENAMES: [&str; 4] = [
    "Asteroid_60.png",
    "Asteroid_100.png",
    "Asteroid_140.png",
    "Asteroid_160.png",
];

/// Error type for asset loading
#[derive(Debug)]
pub enum AssetError {
    /// File I/O error
    Io(String),
    /// The file exists but could not be decoded
    Decode(String),
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Io(msg) => write!(f, "I/O error: {}", msg),
            AssetError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<io::Error> for AssetError {
    fn from(e: io::Error) -> Self {
        AssetError::Io(e.to_string())
    }
}

impl From<image::ImageError> for AssetError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(e) => AssetError::Io(e.to_string()),
            other => AssetError::Decode(other.to_string()),
        }
    }
}

/// 32x32 black image with magenta top-left and bottom-right quadrants
pub fn missing_image() -> Surface {
    let mut image = Surface::filled(32, 32, crate::gfx::color::BLACK);
    image.fill_rect(Rect::new(0, 0, 16, 16), MAGENTA);
    image.fill_rect(Rect::new(16, 16, 16, 16), MAGENTA);
    image
}

/// Load an image file into a surface
///
/// Without `alpha` the alpha channel is discarded and every pixel is opaque.
/// A file that does not exist yields [`missing_image`].
pub fn load_image(path: &Path, alpha: bool) -> Result<Surface, AssetError> {
    let decoded = match image::open(path) {
        Ok(img) => img,
        Err(image::ImageError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Image not found: {}, using placeholder", path.display());
            return Ok(missing_image());
        }
        Err(e) => return Err(e.into()),
    };

    let mut rgba = decoded.to_rgba8();
    if !alpha {
        for px in rgba.pixels_mut() {
            px.0[3] = 255;
        }
    }
    log::debug!(
        "Loaded {} ({}x{})",
        path.display(),
        rgba.width(),
        rgba.height()
    );
    Ok(Surface::from_rgba(rgba))
}

/// The game's shared sprite images
#[derive(Debug, Clone)]
pub struct AssetLibrary {
    pub player: Rc<Surface>,
    pub asteroids: Vec<Rc<Surface>>,
}

impl AssetLibrary {
    /// Load every sprite from `image_dir`
    pub fn load(image_dir: &Path) -> Result<Self, AssetError> {
        let player = Rc::new(load_image(&image_dir.join(PLAYER_IMAGE_FILENAME), true)?);
        let asteroids = ASTEROID_IMAGE_FILENAMES
            .iter()
            .map(|name| load_image(&image_dir.join(name), true).map(Rc::new))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Loaded {} asteroid images from {}",
            asteroids.len(),
            image_dir.display()
        );
        Ok(Self { player, asteroids })
    }

    /// Library built from already decoded images
    pub fn from_images(player: Surface, asteroids: Vec<Surface>) -> Self {
        Self {
            player: Rc::new(player),
            asteroids: asteroids.into_iter().map(Rc::new).collect(),
        }
    }

    /// A random asteroid image (the placeholder if none are loaded)
    pub fn random_asteroid<R: Rng + ?Sized>(&self, rng: &mut R) -> Rc<Surface> {
        self.asteroids
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| Rc::new(missing_image()))
    }
}

/// Resolve `dir` against the working directory
pub fn resolve_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(dir))
            .unwrap_or_else(|_| dir.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::Color;
    use crate::gfx::color::{BLACK, RED};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use tempfile::TempDir;

    #[test]
    fn test_missing_image_checkerboard() {
        let img = missing_image();
        assert_eq!((img.width(), img.height()), (32, 32));
        assert_eq!(img.get_at(0, 0), Some(MAGENTA));
        assert_eq!(img.get_at(31, 31), Some(MAGENTA));
        assert_eq!(img.get_at(20, 5), Some(BLACK));
        assert_eq!(img.get_at(5, 20), Some(BLACK));
    }

    #[test]
    fn test_load_missing_file_returns_placeholder() {
        let dir = TempDir::new().unwrap();
        let img = load_image(&dir.path().join("does-not-exist.png"), true).unwrap();
        assert_eq!(img, missing_image());
    }

    #[test]
    fn test_load_image_round_trip_and_alpha() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sprite.png");
        let mut src = Surface::new(3, 2);
        src.set_at(0, 0, RED);
        src.set_at(2, 1, Color::rgba(10, 20, 30, 40));
        src.save_png(&path).unwrap();

        let with_alpha = load_image(&path, true).unwrap();
        assert_eq!(with_alpha.get_at(0, 0), Some(RED));
        assert_eq!(with_alpha.get_at(2, 1), Some(Color::rgba(10, 20, 30, 40)));

        let opaque = load_image(&path, false).unwrap();
        assert_eq!(opaque.get_at(2, 1), Some(Color::rgba(10, 20, 30, 255)));
    }

    #[test]
    fn test_load_garbage_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let result = load_image(&path, true);
        assert!(matches!(result, Err(AssetError::Decode(_))));
    }

    #[test]
    fn test_library_from_missing_dir_uses_placeholders() {
        let dir = TempDir::new().unwrap();
        let lib = AssetLibrary::load(&dir.path().join("no-such-dir")).unwrap();
        assert_eq!(*lib.player, missing_image());
        assert_eq!(lib.asteroids.len(), ASTEROID_IMAGE_FILENAMES.len());

        let mut rng = Pcg32::seed_from_u64(7);
        let rock = lib.random_asteroid(&mut rng);
        assert_eq!(rock.width(), 32);
    }
}
