pub const TILE_W: f64 = 24.0;
pub const TILE_H: f64 = 24.0;

// Base speeds are expressed for a 16px tile and scaled by the active tile width.
pub const PLAYER_BASE_SPEED: f64 = 100.0;
pub const GHOST_BASE_SPEED: f64 = 80.0;
pub const FRIGHTENED_SPEED_FACTOR: f64 = 0.5;
pub const BASE_TILE: f64 = 16.0;

pub const PLAYER_RADIUS: f64 = 10.0;
pub const GHOST_RADIUS: f64 = 8.0;
/// Fraction of a tile within which a pickup is consumed.
pub const PICKUP_RADIUS_TILES: f64 = 0.5;

pub const PELLET_SCORE: u32 = 10;
pub const POWER_PELLET_SCORE: u32 = 50;
pub const GHOST_SCORE: u32 = 200;
pub const EXTRA_LIFE_EVERY: u32 = 10_000;
pub const START_LIVES: u32 = 3;

pub const SCATTER_TIMES: [f64; 4] = [7.0, 7.0, 5.0, 5.0];
// The last entry is long enough to act as a permanent chase phase.
pub const CHASE_TIMES: [f64; 4] = [20.0, 20.0, 20.0, 999.0];
pub const FRIGHTENED_DURATION: f64 = 8.0;
pub const DEATH_DELAY: f64 = 2.0;

// Targeting distances, in tiles.
pub const PINKY_LOOKAHEAD: f64 = 4.0;
pub const INKY_LOOKAHEAD: f64 = 2.0;
pub const CLYDE_SHY_RADIUS: f64 = 8.0;
