use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Dir, NodeId};
use crate::constants::{
    BASE_TILE, CLYDE_SHY_RADIUS, FRIGHTENED_SPEED_FACTOR, GHOST_BASE_SPEED, GHOST_RADIUS,
    INKY_LOOKAHEAD, PINKY_LOOKAHEAD,
};
use crate::graph::NavGraph;
use crate::movement::Body;
use crate::vector::Vec2;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum GhostKind {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostKind {
    pub const ALL: [GhostKind; 4] = [
        GhostKind::Blinky,
        GhostKind::Pinky,
        GhostKind::Inky,
        GhostKind::Clyde,
    ];

    pub fn index(self) -> usize {
        match self {
            GhostKind::Blinky => 0,
            GhostKind::Pinky => 1,
            GhostKind::Inky => 2,
            GhostKind::Clyde => 3,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GhostMode {
    Chase,
    Scatter,
    Frightened,
    Eaten,
}

#[derive(Clone, Debug)]
pub struct Ghost {
    pub kind: GhostKind,
    pub mode: GhostMode,
    pub body: Body,
    pub home: NodeId,
    pub corner: NodeId,
    pub radius: f64,
    chase_target: Vec2,
}

impl Ghost {
    pub fn new(graph: &NavGraph, kind: GhostKind, home: NodeId, corner: NodeId) -> Self {
        let speed = GHOST_BASE_SPEED * graph.tile_w() / BASE_TILE;
        Self {
            kind,
            mode: GhostMode::Scatter,
            body: Body::at(graph, home, speed),
            home,
            corner,
            radius: GHOST_RADIUS,
            chase_target: graph.position(home),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn target_for(&self, graph: &NavGraph, player_pos: Vec2, player_heading: Vec2) -> Vec2 {
        let tile = graph.tile_w();
        match self.kind {
            GhostKind::Blinky => player_pos,
            GhostKind::Pinky => player_pos + player_heading * (PINKY_LOOKAHEAD * tile),
            GhostKind::Inky => player_pos + player_heading * (INKY_LOOKAHEAD * tile),
            GhostKind::Clyde => {
                let distance = (player_pos - self.body.position).magnitude();
                if distance > CLYDE_SHY_RADIUS * tile {
                    player_pos
                } else {
                    graph.position(self.corner)
                }
            }
        }
    }

    /// Point steered toward by the current mode; `None` means wander.
    pub fn goal(&self, graph: &NavGraph) -> Option<Vec2> {
        match self.mode {
            GhostMode::Chase => Some(self.chase_target),
            GhostMode::Scatter => Some(graph.position(self.corner)),
            GhostMode::Frightened => None,
            GhostMode::Eaten => Some(graph.position(self.home)),
        }
    }

    /// Picks the next edge at a node. Turning back is allowed only at dead ends.
    pub fn choose_direction(
        &self,
        graph: &NavGraph,
        goal: Option<Vec2>,
        rng: &mut impl Rng,
    ) -> Option<Dir> {
        let node = graph.node(self.body.current);
        let back = self.body.dir.map(Dir::opposite);
        let mut options: Vec<(Dir, NodeId)> =
            node.links().filter(|(dir, _)| Some(*dir) != back).collect();
        if options.is_empty() {
            options.extend(node.links());
        }

        match goal {
            None => options.choose(rng).map(|(dir, _)| *dir),
            Some(goal) => {
                let mut best = None;
                let mut best_dist = f64::MAX;
                for (dir, next) in options {
                    let dist = graph.position(next).distance_squared(goal);
                    if dist < best_dist {
                        best_dist = dist;
                        best = Some(dir);
                    }
                }
                best
            }
        }
    }

    /// Advances one tick. Returns true when an eaten ghost made it home.
    pub fn update(
        &mut self,
        dt: f64,
        graph: &NavGraph,
        player_pos: Vec2,
        player_heading: Vec2,
        rng: &mut impl Rng,
    ) -> bool {
        self.chase_target = self.target_for(graph, player_pos, player_heading);

        let speed = match self.mode {
            GhostMode::Frightened => self.body.speed * FRIGHTENED_SPEED_FACTOR,
            _ => self.body.speed,
        };
        self.body.advance(dt, speed);
        if !self.body.overshot(graph) {
            return false;
        }

        self.body.snap(graph);
        if self.mode == GhostMode::Eaten && self.body.current == self.home {
            self.respawn(graph);
            return true;
        }
        let goal = self.goal(graph);
        let dir = self.choose_direction(graph, goal, rng);
        self.body.head(graph, dir);
        false
    }

    /// Mode change ordered by the coordinator; always turns the ghost around.
    pub fn switch_mode(&mut self, mode: GhostMode) {
        self.mode = mode;
        self.body.reverse();
    }

    /// Leaves frightened mode without turning around.
    pub fn calm(&mut self, mode: GhostMode) {
        if self.mode == GhostMode::Frightened {
            self.mode = mode;
        }
    }

    pub fn capture(&mut self) {
        self.mode = GhostMode::Eaten;
    }

    pub fn respawn(&mut self, graph: &NavGraph) {
        self.body.reset(graph, self.home);
        self.mode = GhostMode::Scatter;
    }

    /// Only chasing or scattering ghosts can catch the player.
    pub fn is_dangerous(&self) -> bool {
        matches!(self.mode, GhostMode::Chase | GhostMode::Scatter)
    }

    pub fn collides_with(&self, pos: Vec2, radius: f64) -> bool {
        let reach = self.radius + radius;
        self.body.position.distance_squared(pos) < reach * reach
    }
}
