use rand::Rng;
use tracing::{debug, info};

use crate::constants::PLAYER_RADIUS;
use crate::ghost::{Ghost, GhostKind, GhostMode};
use crate::graph::NavGraph;
use crate::schedule::{ModeTimeline, TimelineEvent};
use crate::vector::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostEvent {
    /// A frightened ghost was eaten by the player.
    Captured(GhostKind),
    /// A chasing or scattering ghost reached the player.
    Caught(GhostKind),
    /// An eaten ghost got back home.
    Respawned(GhostKind),
}

/// Owns the ghosts and the global mode clock, and resolves ghost/player contact.
/// Life loss and scoring belong to the caller.
#[derive(Debug, Clone)]
pub struct GhostAi {
    ghosts: Vec<Ghost>,
    timeline: ModeTimeline,
    /// Set when a window opens; its countdown starts with the next update.
    window_opened: bool,
}

impl GhostAi {
    pub fn new(graph: &NavGraph) -> Self {
        let spawns = graph.ghost_spawns();
        let corners = graph.corners();
        let ghosts = GhostKind::ALL
            .iter()
            .map(|&kind| Ghost::new(graph, kind, spawns[kind.index()], corners[kind.index()]))
            .collect();
        Self {
            ghosts,
            timeline: ModeTimeline::new(),
            window_opened: false,
        }
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn ghost(&self, kind: GhostKind) -> &Ghost {
        &self.ghosts[kind.index()]
    }

    pub fn ghost_mut(&mut self, kind: GhostKind) -> &mut Ghost {
        &mut self.ghosts[kind.index()]
    }

    pub fn timeline(&self) -> &ModeTimeline {
        &self.timeline
    }

    pub fn update(
        &mut self,
        dt: f64,
        graph: &NavGraph,
        player_pos: Vec2,
        player_heading: Vec2,
        rng: &mut impl Rng,
    ) -> Vec<GhostEvent> {
        let opened = std::mem::take(&mut self.window_opened);
        if !opened {
            if let Some(event) = self.timeline.tick(dt) {
                self.apply(event);
            }
        }

        let mut events = Vec::new();
        for ghost in &mut self.ghosts {
            if ghost.update(dt, graph, player_pos, player_heading, rng) {
                debug!(kind = ?ghost.kind, "ghost respawned");
                events.push(GhostEvent::Respawned(ghost.kind));
            }
            if !ghost.collides_with(player_pos, PLAYER_RADIUS) {
                continue;
            }
            if ghost.mode == GhostMode::Frightened {
                ghost.capture();
                info!(kind = ?ghost.kind, "ghost captured");
                events.push(GhostEvent::Captured(ghost.kind));
            } else if ghost.is_dangerous() {
                events.push(GhostEvent::Caught(ghost.kind));
            }
        }
        events
    }

    fn apply(&mut self, event: TimelineEvent) {
        match event {
            TimelineEvent::PhaseChanged(mode) => {
                debug!(?mode, index = self.timeline.index(), "ghost phase changed");
                for ghost in &mut self.ghosts {
                    if !matches!(ghost.mode, GhostMode::Frightened | GhostMode::Eaten) {
                        ghost.switch_mode(mode);
                    }
                }
            }
            TimelineEvent::FrightenedEnded => {
                let mode = self.timeline.mode();
                debug!(?mode, "frightened window over");
                for ghost in &mut self.ghosts {
                    ghost.calm(mode);
                }
            }
        }
    }

    /// Opens the frightened window after a power pellet.
    pub fn frighten(&mut self) {
        self.timeline.frighten();
        self.window_opened = true;
        for ghost in &mut self.ghosts {
            if ghost.mode != GhostMode::Eaten {
                ghost.switch_mode(GhostMode::Frightened);
            }
        }
    }

    /// Sends every ghost home and restarts the mode clock.
    pub fn reset(&mut self, graph: &NavGraph) {
        for ghost in &mut self.ghosts {
            ghost.respawn(graph);
        }
        self.timeline.reset();
        self.window_opened = false;
    }
}
