//! Configuration constants for the tank arena.

// Window and play field
pub const WINDOW_WIDTH: i32 = 1024;
pub const WINDOW_HEIGHT: i32 = 768;
pub const TICK_RATE: u32 = 60; // Fixed simulation ticks per second
pub const EDGE_MARGIN: f64 = 30.0; // Tanks are kept this far from the field edges

// Tank body
pub const TANK_WIDTH: f64 = 50.0;
pub const TANK_HEIGHT: f64 = 50.0;
pub const TANK_ROTATION_SPEED: f64 = 2.0; // Degrees per tick
pub const TANK_FORWARD_SPEED: f64 = 3.0; // Units per tick
pub const TANK_BACKWARD_SPEED: f64 = 1.5; // Units per tick
pub const MAX_HEALTH: i32 = 100;
pub const RELOAD_TICKS: u32 = 100; // Ticks between shots

// Turret
pub const TURRET_ROTATION_SPEED: f64 = 2.0; // Degrees per tick, manual aim only
pub const PROJECTILE_SPEED: f64 = 30.0;
pub const PLAYER_TURRET_ANGLE: f64 = 270.0; // Points up
pub const COMPUTER_TURRET_ANGLE: f64 = 90.0; // Points down
pub const PLAYER_RANGE_ANGLE: f64 = 360.0;
pub const PLAYER_RANGE_DISTANCE: f64 = 300.0;
pub const COMPUTER_RANGE_ANGLE: f64 = 45.0;
pub const COMPUTER_RANGE_BASE: f64 = 100.0;
pub const COMPUTER_RANGE_JITTER: u32 = 300; // Extra radius drawn from [0, jitter)
pub const AUTO_AIM_STEP: f64 = 1.0; // Degrees per tick while tracking

// Projectile lifecycle
pub const EXPLOSION_FRAMES: u32 = 16; // Frames in the explosion sprite sheet
pub const PROJECTILE_DAMAGE: i32 = 10;

// HUD bars
pub const BAR_WIDTH: f64 = 50.0;
pub const BAR_HEIGHT: f64 = 5.0;

// Game rules
pub const DEFAULT_ENEMY_COUNT: u8 = 3;
pub const MAX_ENEMY_COUNT: u8 = 8;
