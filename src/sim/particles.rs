//! Particle effects
//!
//! Particles never own images. Each one names a cache key and the group
//! draws the shared image built for that key, so thousands of smoke puffs
//! only need a handful of circle images.

use std::collections::HashMap;
use std::hash::Hash;

use glam::Vec2;
use rand::Rng;

use crate::consts::{SMOKE_MAX_LIFETIME, SMOKE_MIN_LIFETIME};
use crate::gfx::{BlendMode, Surface};

/// Lazily built images, memoised by key
pub struct ImageCache<K> {
    cache: HashMap<K, Surface>,
    make_image: Box<dyn Fn(&K) -> Surface>,
}

impl<K: Hash + Eq + Clone> ImageCache<K> {
    pub fn new(make_image: impl Fn(&K) -> Surface + 'static) -> Self {
        Self {
            cache: HashMap::new(),
            make_image: Box::new(make_image),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Image for `key`, building it on first use
    pub fn get_image(&mut self, key: &K) -> &Surface {
        if !self.cache.contains_key(key) {
            let image = (self.make_image)(key);
            self.cache.insert(key.clone(), image);
        }
        &self.cache[key]
    }
}

impl<K> std::fmt::Debug for ImageCache<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("len", &self.cache.len())
            .finish()
    }
}

/// Something a [`ParticleGroup`] can update and draw
pub trait Particle {
    type Key: Hash + Eq + Clone;

    /// Advance by `dt`; `false` once the particle should be removed
    fn update(&mut self, dt: f32) -> bool;

    /// Top-left corner to draw `image` at, in world space
    fn draw_pos(&self, image: &Surface) -> Vec2;

    /// Which cached image this particle uses
    fn cache_key(&self) -> Self::Key;
}

/// A puff of extinguisher smoke drifting in a straight line
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: u32,
    /// Seconds until the puff disappears
    pub lifetime: f32,
    /// Seconds lived so far
    pub age: f32,
}

impl SmokeParticle {
    /// Puff with a random lifetime in [1.5, 2.0] s
    pub fn new<R: Rng + ?Sized>(pos: Vec2, vel: Vec2, radius: u32, rng: &mut R) -> Self {
        let lifetime = rng.random_range(SMOKE_MIN_LIFETIME..=SMOKE_MAX_LIFETIME);
        Self::with_lifetime(pos, vel, radius, lifetime)
    }

    pub fn with_lifetime(pos: Vec2, vel: Vec2, radius: u32, lifetime: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            lifetime,
            age: 0.0,
        }
    }
}

impl Particle for SmokeParticle {
    type Key = u32;

    fn update(&mut self, dt: f32) -> bool {
        self.age += dt;
        if self.age >= self.lifetime {
            return false;
        }
        self.pos += self.vel * dt;
        true
    }

    fn draw_pos(&self, _image: &Surface) -> Vec2 {
        self.pos - Vec2::splat(self.radius as f32)
    }

    fn cache_key(&self) -> u32 {
        self.radius
    }
}

/// A batch of particles sharing an image cache and blend mode
#[derive(Debug)]
pub struct ParticleGroup<P: Particle> {
    pub particles: Vec<P>,
    pub blend: BlendMode,
    image_cache: ImageCache<P::Key>,
}

impl<P: Particle> ParticleGroup<P> {
    pub fn new(image_cache: ImageCache<P::Key>, blend: BlendMode) -> Self {
        Self {
            particles: Vec::new(),
            blend,
            image_cache,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn add(&mut self, particle: P) {
        self.particles.push(particle);
    }

    pub fn extend(&mut self, particles: impl IntoIterator<Item = P>) {
        self.particles.extend(particles);
    }

    /// Update every particle, dropping the expired ones
    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| p.update(dt));
    }

    pub fn draw(&mut self, screen: &mut Surface, camera: Vec2) {
        for p in &self.particles {
            let image = self.image_cache.get_image(&p.cache_key());
            let pos = p.draw_pos(image) + camera;
            screen.blit(image, pos, self.blend);
        }
    }

    pub fn image_cache(&self) -> &ImageCache<P::Key> {
        &self.image_cache
    }
}
