use tracing::{debug, warn};

use crate::components::{Dir, NodeId, PickupKind};
use crate::constants::{TILE_H, TILE_W};
use crate::level::{Grid, MalformedGridError, Tile};
use crate::vector::Vec2;

#[derive(Clone, Debug)]
pub struct NavNode {
    position: Vec2,
    cell: (usize, usize),
    neighbors: [Option<NodeId>; 4],
}

impl NavNode {
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Grid cell `(col, row)` the node was built from.
    pub fn cell(&self) -> (usize, usize) {
        self.cell
    }

    pub fn neighbor(&self, dir: Dir) -> Option<NodeId> {
        self.neighbors[dir.index()]
    }

    /// Linked neighbors in `Dir::ALL` order.
    pub fn links(&self) -> impl Iterator<Item = (Dir, NodeId)> + '_ {
        Dir::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(dir).map(|id| (dir, id)))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PickupSpot {
    pub position: Vec2,
    pub kind: PickupKind,
}

/// Static navigation graph for one level. Nodes live in an arena and are
/// addressed by `NodeId`; nothing mutates the graph after `build`.
#[derive(Clone, Debug)]
pub struct NavGraph {
    nodes: Vec<NavNode>,
    pickups: Vec<PickupSpot>,
    ghost_spawns: [NodeId; 4],
    corners: [NodeId; 4],
    player_start: NodeId,
    tile_w: f64,
    tile_h: f64,
}

impl NavGraph {
    pub fn build(grid: &Grid) -> Result<NavGraph, MalformedGridError> {
        NavGraph::build_with_tile(grid, TILE_W, TILE_H)
    }

    pub fn build_with_tile(
        grid: &Grid,
        tile_w: f64,
        tile_h: f64,
    ) -> Result<NavGraph, MalformedGridError> {
        let width = grid.width();
        let mut lookup: Vec<Option<NodeId>> = vec![None; width * grid.height()];
        let mut nodes = Vec::new();
        let mut pickups = Vec::new();

        for (col, row, tile) in grid.cells() {
            let anchor = Vec2::new(col as f64 * tile_w, row as f64 * tile_h);
            match tile {
                Tile::Node => {
                    lookup[row * width + col] = Some(NodeId(nodes.len()));
                    nodes.push(NavNode {
                        position: anchor,
                        cell: (col, row),
                        neighbors: [None; 4],
                    });
                }
                Tile::Path => pickups.push(PickupSpot {
                    position: anchor,
                    kind: PickupKind::Normal,
                }),
                Tile::Power => pickups.push(PickupSpot {
                    position: anchor,
                    kind: PickupKind::Power,
                }),
                _ => {}
            }
        }

        if nodes.is_empty() {
            return Err(MalformedGridError::NoNodes);
        }

        // Scanning right and down while linking both ends covers all four directions.
        for idx in 0..nodes.len() {
            let (col, row) = nodes[idx].cell;
            for dir in [Dir::Right, Dir::Down] {
                if let Some(other) = scan(grid, &lookup, col, row, dir) {
                    nodes[idx].neighbors[dir.index()] = Some(other);
                    nodes[other.0].neighbors[dir.opposite().index()] = Some(NodeId(idx));
                }
            }
        }

        for node in &nodes {
            if node.neighbors.iter().all(Option::is_none) {
                warn!(col = node.cell.0, row = node.cell.1, "isolated maze node");
            }
        }

        let ghost_spawns = pick_ghost_spawns(&nodes);
        let corners = pick_corners(&nodes);
        let player_start = pick_player_start(&nodes, &ghost_spawns);
        debug!(
            nodes = nodes.len(),
            pickups = pickups.len(),
            "built navigation graph"
        );

        Ok(NavGraph {
            nodes,
            pickups,
            ghost_spawns,
            corners,
            player_start,
            tile_w,
            tile_h,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &NavNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NavNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn position(&self, id: NodeId) -> Vec2 {
        self.nodes[id.0].position
    }

    pub fn neighbor(&self, id: NodeId, dir: Dir) -> Option<NodeId> {
        self.nodes[id.0].neighbor(dir)
    }

    /// Node built from grid cell `(col, row)`, if any.
    pub fn node_at(&self, col: usize, row: usize) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.cell == (col, row))
            .map(NodeId)
    }

    pub fn pickups(&self) -> &[PickupSpot] {
        &self.pickups
    }

    pub fn ghost_spawns(&self) -> [NodeId; 4] {
        self.ghost_spawns
    }

    pub fn corners(&self) -> [NodeId; 4] {
        self.corners
    }

    pub fn player_start(&self) -> NodeId {
        self.player_start
    }

    pub fn tile_w(&self) -> f64 {
        self.tile_w
    }

    pub fn tile_h(&self) -> f64 {
        self.tile_h
    }

    /// Nearest grid cell to a screen position.
    pub fn cell_of(&self, pos: Vec2) -> (isize, isize) {
        (
            (pos.x / self.tile_w).round() as isize,
            (pos.y / self.tile_h).round() as isize,
        )
    }
}

/// Walks from a node cell until a wall, the grid edge, or the nearest node.
fn scan(
    grid: &Grid,
    lookup: &[Option<NodeId>],
    col: usize,
    row: usize,
    dir: Dir,
) -> Option<NodeId> {
    let (dx, dy) = dir.delta();
    let mut c = col as isize + dx;
    let mut r = row as isize + dy;
    while let Some(tile) = grid.tile_at(c, r) {
        match tile {
            Tile::Wall => return None,
            Tile::Node => return lookup[r as usize * grid.width() + c as usize],
            _ => {}
        }
        c += dx;
        r += dy;
    }
    None
}

fn centroid(nodes: &[NavNode]) -> Vec2 {
    let sum = nodes
        .iter()
        .fold(Vec2::ZERO, |acc, n| acc + n.position);
    sum.divide(nodes.len() as f64).unwrap_or(Vec2::ZERO)
}

/// Node indices ordered by distance to `point`; ties keep scan order.
fn by_distance(nodes: &[NavNode], point: Vec2) -> Vec<usize> {
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| {
        let da = nodes[a].position.distance_squared(point);
        let db = nodes[b].position.distance_squared(point);
        da.total_cmp(&db)
    });
    order
}

fn pick_ghost_spawns(nodes: &[NavNode]) -> [NodeId; 4] {
    let mut spawns = [NodeId(0); 4];
    if nodes.len() < 4 {
        return spawns;
    }
    let order = by_distance(nodes, centroid(nodes));
    for (slot, idx) in spawns.iter_mut().zip(order) {
        *slot = NodeId(idx);
    }
    spawns
}

fn extreme(nodes: &[NavNode], score: impl Fn(Vec2) -> f64) -> NodeId {
    let mut best = 0;
    for (idx, node) in nodes.iter().enumerate() {
        if score(node.position) < score(nodes[best].position) {
            best = idx;
        }
    }
    NodeId(best)
}

/// Home corners: top-right, top-left, bottom-right, bottom-left.
fn pick_corners(nodes: &[NavNode]) -> [NodeId; 4] {
    if nodes.len() < 4 {
        return [NodeId(0); 4];
    }
    [
        extreme(nodes, |p| p.y - p.x),
        extreme(nodes, |p| p.x + p.y),
        extreme(nodes, |p| -(p.x + p.y)),
        extreme(nodes, |p| -(p.y - p.x)),
    ]
}

fn pick_player_start(nodes: &[NavNode], spawns: &[NodeId; 4]) -> NodeId {
    let center = centroid(nodes);
    let bottom = nodes
        .iter()
        .map(|n| n.position.y)
        .fold(center.y, f64::max);
    let target = Vec2::new(center.x, (center.y + bottom) / 2.0);
    by_distance(nodes, target)
        .into_iter()
        .map(NodeId)
        .find(|id| !spawns.contains(id))
        .unwrap_or(NodeId(0))
}
