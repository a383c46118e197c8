use rand::Rng;
use tracing::info;

use crate::components::{Dir, NodeId, PickupKind};
use crate::constants::{
    DEATH_DELAY, EXTRA_LIFE_EVERY, GHOST_SCORE, PELLET_SCORE, POWER_PELLET_SCORE, START_LIVES,
};
use crate::ghost::GhostKind;
use crate::ghost_ai::{GhostAi, GhostEvent};
use crate::graph::NavGraph;
use crate::level::{Grid, MalformedGridError};
use crate::pellets::Pellets;
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Ready,
    Playing,
    Paused,
    /// Short pause after the player is caught, before positions reset.
    Dying { remaining: f64 },
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PelletEaten,
    PowerPelletEaten,
    GhostCaptured(GhostKind),
    PlayerCaught(GhostKind),
    ExtraLife,
    LevelCleared,
    GameOver,
}

/// One play session: the maze, its bodies, and the score/lives bookkeeping.
pub struct Game {
    grid: Grid,
    graph: NavGraph,
    player: Player,
    ghosts: GhostAi,
    pellets: Pellets,
    score: u32,
    lives: u32,
    level: u32,
    phase: Phase,
}

impl Game {
    pub fn new(grid: Grid) -> Result<Game, MalformedGridError> {
        let graph = NavGraph::build(&grid)?;
        let player = Player::new(&graph, graph.player_start());
        let ghosts = GhostAi::new(&graph);
        let pellets = Pellets::new(&graph);
        Ok(Game {
            grid,
            graph,
            player,
            ghosts,
            pellets,
            score: 0,
            lives: START_LIVES,
            level: 1,
            phase: Phase::Ready,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &GhostAi {
        &self.ghosts
    }

    pub fn ghosts_mut(&mut self) -> &mut GhostAi {
        &mut self.ghosts
    }

    pub fn pellets(&self) -> &Pellets {
        &self.pellets
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Begins a fresh session from `Ready` or `GameOver`.
    pub fn start(&mut self) {
        if !matches!(self.phase, Phase::Ready | Phase::GameOver) {
            return;
        }
        self.score = 0;
        self.lives = START_LIVES;
        self.level = 1;
        self.pellets.reset();
        self.reset_positions();
        self.phase = Phase::Playing;
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            other => other,
        };
    }

    pub fn reset_agent(&mut self, node: NodeId) {
        self.player.reset(&self.graph, node);
    }

    pub fn reset_ghosts(&mut self) {
        self.ghosts.reset(&self.graph);
    }

    fn reset_positions(&mut self) {
        self.reset_agent(self.graph.player_start());
        self.reset_ghosts();
    }

    pub fn tick(&mut self, dt: f64, desired: Option<Dir>, rng: &mut impl Rng) -> Vec<GameEvent> {
        match self.phase {
            Phase::Playing => self.step(dt, desired, rng),
            Phase::Dying { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.reset_positions();
                    self.phase = Phase::Playing;
                } else {
                    self.phase = Phase::Dying { remaining };
                }
                Vec::new()
            }
            Phase::Ready | Phase::Paused | Phase::GameOver => Vec::new(),
        }
    }

    fn step(&mut self, dt: f64, desired: Option<Dir>, rng: &mut impl Rng) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.player.update(dt, &self.graph, desired);

        for kind in self.pellets.consume_near(self.player.position()) {
            match kind {
                PickupKind::Normal => {
                    self.add_score(PELLET_SCORE, &mut events);
                    events.push(GameEvent::PelletEaten);
                }
                PickupKind::Power => {
                    self.add_score(POWER_PELLET_SCORE, &mut events);
                    self.ghosts.frighten();
                    events.push(GameEvent::PowerPelletEaten);
                }
            }
        }

        if !self.pellets.items().is_empty() && self.pellets.is_cleared() {
            self.level += 1;
            info!(level = self.level, score = self.score, "level cleared");
            self.pellets.reset();
            self.reset_positions();
            events.push(GameEvent::LevelCleared);
            return events;
        }

        let ghost_events = self.ghosts.update(
            dt,
            &self.graph,
            self.player.position(),
            self.player.heading(),
            rng,
        );
        let mut caught = None;
        for event in ghost_events {
            match event {
                GhostEvent::Captured(kind) => {
                    self.add_score(GHOST_SCORE, &mut events);
                    events.push(GameEvent::GhostCaptured(kind));
                }
                GhostEvent::Caught(kind) => {
                    caught.get_or_insert(kind);
                }
                GhostEvent::Respawned(_) => {}
            }
        }
        if let Some(kind) = caught {
            events.push(GameEvent::PlayerCaught(kind));
            self.lose_life(&mut events);
        }
        events
    }

    fn add_score(&mut self, points: u32, events: &mut Vec<GameEvent>) {
        let before = self.score / EXTRA_LIFE_EVERY;
        self.score += points;
        if self.score / EXTRA_LIFE_EVERY > before {
            self.lives += 1;
            events.push(GameEvent::ExtraLife);
        }
    }

    fn lose_life(&mut self, events: &mut Vec<GameEvent>) {
        self.lives = self.lives.saturating_sub(1);
        info!(lives = self.lives, score = self.score, "player caught");
        if self.lives == 0 {
            self.phase = Phase::GameOver;
            events.push(GameEvent::GameOver);
        } else {
            self.phase = Phase::Dying {
                remaining: DEATH_DELAY,
            };
        }
    }
}
