//! Game simulation
//!
//! Entities and the frame loop. Nothing here touches a window or clock:
//! callers pass the frame's delta-time and input, and get a surface drawn.

pub mod collision;
pub mod effect;
pub mod obstacle;
pub mod particles;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{EdgeHits, bounce_off_bounds, sprites_overlap};
pub use effect::Effect;
pub use obstacle::Obstacle;
pub use particles::{ImageCache, Particle, ParticleGroup, SmokeParticle};
pub use player::{BounceMode, Player, PlayerContacts};
pub use state::World;
pub use tick::{FrameInput, render, tick};
