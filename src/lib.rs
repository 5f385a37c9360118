//! Tank arena: tank movement, turret aiming and shell ballistics on a fixed
//! tick, with a macroquad front end.

pub mod audio;
pub mod battlefield;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod projectile;
pub mod render;
pub mod tank;
pub mod turret;
pub mod view;
