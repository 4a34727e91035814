//! Stochastic mutation engine for fractal-flame genomes: clones a base
//! genome and runs a pipeline of independently toggleable mutation stages
//! over the clone, producing statistically varied but structurally valid
//! genomes for downstream rendering.

pub mod error;
pub mod generation;
pub mod model;

pub use error::{FlamegenError, Result};
pub use generation::{Generator, GeneratorOptions};
pub use model::{
    Ifs, IteratorId, IteratorNode, Palette, ShadingMode, Transform, TransformRegistry,
    TransformTag,
};
