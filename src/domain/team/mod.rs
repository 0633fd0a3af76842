//! Team domain

mod entity;

pub use entity::Team;
