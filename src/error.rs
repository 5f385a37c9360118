// Game setup errors

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GameError {
    #[error("Enemy count must be between 1 and {max}, got {requested}")]
    InvalidEnemyCount { requested: u8, max: u8 },
    #[error("Play field {width}x{height} is too small to hold tanks")]
    PlayFieldTooSmall { width: f64, height: f64 },
}
