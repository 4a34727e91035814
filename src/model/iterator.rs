use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::transform::Transform;

/// Identity of an iterator within one genome. Ids are allocated by the
/// genome on insertion and never reused; edges refer to ids rather than
/// nodes, so cloning a genome clones its edges with it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct IteratorId(pub(crate) u64);

/// How the renderer shades points that land on this iterator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShadingMode {
    #[default]
    Default,
    DeltaPSpeed,
}

/// One node of the genome graph: a transform binding plus this node's own
/// parameter values, color state and outgoing weighted edges.
///
/// `real_params`/`vec3_params` are keyed by the bound transform's schema;
/// mutation changes values in place and never adds or removes keys. An edge
/// absent from `weight_to` reads as weight 0; resolve through
/// [`edge_weight`](Self::edge_weight) instead of testing key presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IteratorNode {
    pub(crate) id: IteratorId,
    pub transform: Arc<Transform>,
    pub base_weight: f64,
    pub start_weight: f64,
    pub color_index: f64,
    pub color_speed: f64,
    pub opacity: f64,
    pub add: f64,
    pub shading_mode: ShadingMode,
    pub real_params: BTreeMap<String, f64>,
    pub vec3_params: BTreeMap<String, [f64; 3]>,
    pub weight_to: BTreeMap<IteratorId, f64>,
}

impl IteratorNode {
    /// New node bound to `transform`, parameters at their schema defaults.
    /// The id is assigned when the node is added to a genome.
    pub fn new(transform: Arc<Transform>) -> Self {
        Self {
            id: IteratorId(0),
            base_weight: 1.0,
            start_weight: 1.0,
            color_index: 0.0,
            color_speed: 0.0,
            opacity: 1.0,
            add: 0.0,
            shading_mode: ShadingMode::Default,
            real_params: transform.real_params.clone(),
            vec3_params: transform.vec3_params.clone(),
            weight_to: BTreeMap::new(),
            transform,
        }
    }

    pub fn id(&self) -> IteratorId {
        self.id
    }

    /// Resolved weight of the edge to `to`; absent entries read as 0.
    pub fn edge_weight(&self, to: IteratorId) -> f64 {
        self.weight_to.get(&to).copied().unwrap_or(0.0)
    }
}
