use crate::components::PickupKind;
use crate::constants::PICKUP_RADIUS_TILES;
use crate::graph::NavGraph;
use crate::vector::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct Pickup {
    pub position: Vec2,
    pub kind: PickupKind,
    pub consumed: bool,
}

#[derive(Clone, Debug)]
pub struct Pellets {
    items: Vec<Pickup>,
    radius: f64,
    remaining: usize,
}

impl Pellets {
    pub fn new(graph: &NavGraph) -> Self {
        let items: Vec<Pickup> = graph
            .pickups()
            .iter()
            .map(|spot| Pickup {
                position: spot.position,
                kind: spot.kind,
                consumed: false,
            })
            .collect();
        Self {
            remaining: items.len(),
            items,
            radius: PICKUP_RADIUS_TILES * graph.tile_w(),
        }
    }

    pub fn items(&self) -> &[Pickup] {
        &self.items
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining == 0
    }

    /// Marks every pickup within reach of `pos` as consumed and returns their kinds.
    pub fn consume_near(&mut self, pos: Vec2) -> Vec<PickupKind> {
        let reach = self.radius * self.radius;
        let mut eaten = Vec::new();
        for item in self.items.iter_mut().filter(|p| !p.consumed) {
            if item.position.distance_squared(pos) < reach {
                item.consumed = true;
                eaten.push(item.kind);
            }
        }
        self.remaining -= eaten.len();
        eaten
    }

    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.consumed = false;
        }
        self.remaining = self.items.len();
    }
}
