//! Node-graph maze chase: a navigation graph built from a symbol grid,
//! node-snapped movement, four ghost targeting rules on a global
//! chase/scatter clock, and the session that ties them together.

pub mod components;
pub mod config;
pub mod constants;
pub mod game;
pub mod ghost;
pub mod ghost_ai;
pub mod graph;
pub mod input;
pub mod level;
pub mod movement;
pub mod pellets;
pub mod player;
pub mod render;
pub mod schedule;
pub mod vector;

pub use components::{Dir, NodeId, PickupKind};
pub use game::{Game, GameEvent, Phase};
pub use ghost::{Ghost, GhostKind, GhostMode};
pub use ghost_ai::{GhostAi, GhostEvent};
pub use graph::NavGraph;
pub use level::{Grid, MalformedGridError, Tile};
pub use schedule::ModeTimeline;
pub use vector::Vec2;
