//! Grid, particle, dirty-set, and movement primitive.

pub mod dirty;
pub mod grid;
pub mod movement;
pub mod particle;

pub use grid::{Grid, NEIGHBOR_OFFSETS};
pub use movement::try_move;
pub use particle::{Particle, Vec2};
