//! Mathematical utilities and data structures

pub mod aabb;
pub mod ray;
pub mod lattice;

pub use aabb::Aabb;
pub use ray::{Ray, RayHit};
