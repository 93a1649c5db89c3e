pub mod config;
pub mod field;
pub mod particle;
pub mod render;
pub mod scene;

pub use config::FieldConfig;
pub use field::ParticleField;
pub use particle::{Kind, Particle};
