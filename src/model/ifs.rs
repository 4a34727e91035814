use serde::{Deserialize, Serialize};

use super::iterator::{IteratorId, IteratorNode};
use super::palette::Palette;

/// A complete fractal-flame genome: the iterator graph plus palette and
/// global render attributes. Iterator order is insertion order; it drives
/// default layout downstream and is preserved by `clone`.
///
/// `Clone` is the deep-clone contract: nodes, edges and palette are owned
/// values keyed by ids, so a clone shares no mutable state with its source.
/// Transforms stay shared handles into the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ifs {
    iterators: Vec<IteratorNode>,
    pub palette: Palette,
    pub background_color: [f64; 3],
    pub fog_amount: f64,
    pub image_width: u32,
    pub image_height: u32,
    next_id: u64,
}

impl Ifs {
    pub fn new() -> Self {
        Self {
            iterators: Vec::new(),
            palette: Palette::default(),
            background_color: [0.0, 0.0, 0.0],
            fog_amount: 0.0,
            image_width: 1920,
            image_height: 1080,
            next_id: 0,
        }
    }

    pub fn iterators(&self) -> &[IteratorNode] {
        &self.iterators
    }

    pub fn iterators_mut(&mut self) -> impl Iterator<Item = &mut IteratorNode> {
        self.iterators.iter_mut()
    }

    pub fn iterator_ids(&self) -> Vec<IteratorId> {
        self.iterators.iter().map(|it| it.id).collect()
    }

    pub fn get(&self, id: IteratorId) -> Option<&IteratorNode> {
        self.iterators.iter().find(|it| it.id == id)
    }

    pub fn get_mut(&mut self, id: IteratorId) -> Option<&mut IteratorNode> {
        self.iterators.iter_mut().find(|it| it.id == id)
    }

    /// Appends `node` under a fresh id. With `connect` set, weight-1.0 edges
    /// are installed between the node and every iterator in both directions,
    /// self-loop included, so the renderer's sampler can reach it.
    pub fn add_iterator(&mut self, mut node: IteratorNode, connect: bool) -> IteratorId {
        let id = IteratorId(self.next_id);
        self.next_id += 1;
        node.id = id;
        if connect {
            for other in &mut self.iterators {
                other.weight_to.insert(id, 1.0);
                node.weight_to.insert(other.id, 1.0);
            }
            node.weight_to.insert(id, 1.0);
        }
        self.iterators.push(node);
        id
    }

    /// Removes the iterator and every edge referencing it, incoming and
    /// outgoing. Returns false if the id is unknown.
    pub fn remove_iterator(&mut self, id: IteratorId) -> bool {
        let before = self.iterators.len();
        self.iterators.retain(|it| it.id != id);
        if self.iterators.len() == before {
            return false;
        }
        for it in &mut self.iterators {
            it.weight_to.remove(&id);
        }
        true
    }

    /// Resolved weight of the (from, to) edge; absent entries read as 0.
    /// Pure accessor: never materializes an entry on lookup.
    pub fn weight(&self, from: IteratorId, to: IteratorId) -> f64 {
        self.get(from).map(|it| it.edge_weight(to)).unwrap_or(0.0)
    }

    /// Inserts or overwrites an explicit weight entry for (from, to).
    pub fn set_weight(&mut self, from: IteratorId, to: IteratorId, weight: f64) {
        if let Some(it) = self.get_mut(from) {
            it.weight_to.insert(to, weight);
        }
    }
}

impl Default for Ifs {
    fn default() -> Self {
        Self::new()
    }
}
