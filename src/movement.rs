use crate::components::{heading, Dir, NodeId};
use crate::graph::NavGraph;
use crate::vector::Vec2;

/// Node-snapped motion shared by the player and the ghosts.
///
/// `position` always lies on the segment from `current` to `target`; when
/// `dir` is `None` the body sits exactly on `current` and `target == current`.
#[derive(Clone, Copy, Debug)]
pub struct Body {
    pub position: Vec2,
    pub current: NodeId,
    pub target: NodeId,
    pub dir: Option<Dir>,
    pub speed: f64,
}

impl Body {
    pub fn at(graph: &NavGraph, node: NodeId, speed: f64) -> Self {
        Self {
            position: graph.position(node),
            current: node,
            target: node,
            dir: None,
            speed,
        }
    }

    pub fn heading(&self) -> Vec2 {
        heading(self.dir)
    }

    pub fn advance(&mut self, dt: f64, speed: f64) {
        self.position = self.position + self.heading() * (speed * dt);
    }

    /// True once the distance travelled from `current` reaches the edge length.
    pub fn overshot(&self, graph: &NavGraph) -> bool {
        let origin = graph.position(self.current);
        let edge = graph.position(self.target) - origin;
        let travelled = self.position - origin;
        travelled.magnitude_squared() >= edge.magnitude_squared()
    }

    /// Commits to the target node and removes any drift.
    pub fn snap(&mut self, graph: &NavGraph) {
        self.current = self.target;
        self.position = graph.position(self.current);
    }

    /// Starts along `dir` from `current`. A missing neighbor stops the body.
    pub fn head(&mut self, graph: &NavGraph, dir: Option<Dir>) {
        match dir.and_then(|d| graph.neighbor(self.current, d).map(|n| (d, n))) {
            Some((d, next)) => {
                self.dir = Some(d);
                self.target = next;
            }
            None => {
                self.dir = None;
                self.target = self.current;
            }
        }
    }

    /// Turns around mid-edge by swapping the edge ends.
    pub fn reverse(&mut self) {
        if let Some(dir) = self.dir {
            std::mem::swap(&mut self.current, &mut self.target);
            self.dir = Some(dir.opposite());
        }
    }

    pub fn can_move(&self, graph: &NavGraph, dir: Dir) -> bool {
        graph.neighbor(self.current, dir).is_some()
    }

    pub fn reset(&mut self, graph: &NavGraph, node: NodeId) {
        self.current = node;
        self.target = node;
        self.position = graph.position(node);
        self.dir = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Grid;

    fn corridor() -> NavGraph {
        NavGraph::build(&Grid::parse("+...+...+\n").unwrap()).unwrap()
    }

    #[test]
    fn snap_after_overshoot_is_exact() {
        let g = corridor();
        let start = g.node_at(0, 0).unwrap();
        let mut body = Body::at(&g, start, 150.0);
        body.head(&g, Some(Dir::Right));
        for dt in [0.3, 0.017, 5.0, 5.0] {
            body.advance(dt, body.speed);
            if body.overshot(&g) {
                body.snap(&g);
                assert!(body.position.same_as(g.position(body.current)));
                body.head(&g, body.dir);
            }
        }
        assert_eq!(body.current, g.node_at(8, 0).unwrap());
        assert_eq!(body.dir, None);
    }

    #[test]
    fn head_without_neighbor_stops() {
        let g = corridor();
        let start = g.node_at(0, 0).unwrap();
        let mut body = Body::at(&g, start, 150.0);
        body.head(&g, Some(Dir::Up));
        assert_eq!(body.dir, None);
        assert_eq!(body.target, start);
        assert!(body.overshot(&g));
    }

    #[test]
    fn reverse_swaps_edge_ends() {
        let g = corridor();
        let a = g.node_at(0, 0).unwrap();
        let b = g.node_at(4, 0).unwrap();
        let mut body = Body::at(&g, a, 24.0);
        body.head(&g, Some(Dir::Right));
        body.advance(1.0, body.speed);
        body.reverse();
        assert_eq!(body.current, b);
        assert_eq!(body.target, a);
        assert_eq!(body.dir, Some(Dir::Left));
        assert!(!body.overshot(&g));
    }

    #[test]
    fn reversing_a_stopped_body_is_a_no_op() {
        let g = corridor();
        let a = g.node_at(0, 0).unwrap();
        let mut body = Body::at(&g, a, 24.0);
        body.reverse();
        assert_eq!(body.current, a);
        assert_eq!(body.dir, None);
    }
}
