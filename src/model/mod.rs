pub mod ifs;
pub mod iterator;
pub mod palette;
pub mod transform;

pub use ifs::Ifs;
pub use iterator::{IteratorId, IteratorNode, ShadingMode};
pub use palette::Palette;
pub use transform::{Transform, TransformRegistry, TransformTag};
