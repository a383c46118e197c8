use crate::components::{Dir, NodeId};
use crate::constants::{BASE_TILE, PLAYER_BASE_SPEED, PLAYER_RADIUS};
use crate::graph::NavGraph;
use crate::movement::Body;
use crate::vector::Vec2;

/// The player-controlled body. Turns happen only at nodes, except for an
/// immediate reversal which may happen anywhere on an edge.
#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub radius: f64,
}

impl Player {
    pub fn new(graph: &NavGraph, start: NodeId) -> Self {
        let speed = PLAYER_BASE_SPEED * graph.tile_w() / BASE_TILE;
        Self {
            body: Body::at(graph, start, speed),
            radius: PLAYER_RADIUS,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn direction(&self) -> Option<Dir> {
        self.body.dir
    }

    pub fn heading(&self) -> Vec2 {
        self.body.heading()
    }

    pub fn update(&mut self, dt: f64, graph: &NavGraph, desired: Option<Dir>) {
        self.body.advance(dt, self.body.speed);

        if self.body.overshot(graph) {
            self.body.snap(graph);
            let next = desired
                .filter(|d| self.body.can_move(graph, *d))
                .or_else(|| self.body.dir.filter(|d| self.body.can_move(graph, *d)));
            self.body.head(graph, next);
        } else if let (Some(want), Some(dir)) = (desired, self.body.dir) {
            if want == dir.opposite() {
                self.body.reverse();
            }
        }
    }

    pub fn reset(&mut self, graph: &NavGraph, node: NodeId) {
        self.body.reset(graph, node);
    }
}
