pub mod aabb;
pub mod clock;
pub mod vec2;
