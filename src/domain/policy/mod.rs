//! Policy domain

mod entity;

pub use entity::{Policy, PolicyTemplate};
