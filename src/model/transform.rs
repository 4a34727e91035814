use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Capability marker attached to a transform by the catalog.
///
/// The catalog's tag vocabulary is open-ended strings, but only a handful
/// carry mutation-time meaning, so the known markers form a closed enum
/// checked through typed predicates rather than string containment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TransformTag {
    /// Rendered as a solid silhouette instead of colored accumulation.
    Shape,
}

impl TransformTag {
    /// Maps a catalog tag string to a known marker. Unknown tags have no
    /// mutation-time behavior and resolve to `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "shape" => Some(TransformTag::Shape),
            _ => None,
        }
    }
}

/// A named capability descriptor: one kind of geometric/color operation an
/// iterator can be bound to, with the schema (names and default values) of
/// its tunable parameters.
///
/// Transforms are immutable once registered and shared by handle; iterators
/// never own or modify them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub name: String,
    pub tags: BTreeSet<TransformTag>,
    pub real_params: BTreeMap<String, f64>,
    pub vec3_params: BTreeMap<String, [f64; 3]>,
}

impl Transform {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeSet::new(),
            real_params: BTreeMap::new(),
            vec3_params: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, tag: TransformTag) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn with_real_param(mut self, name: impl Into<String>, default: f64) -> Self {
        self.real_params.insert(name.into(), default);
        self
    }

    pub fn with_vec3_param(mut self, name: impl Into<String>, default: [f64; 3]) -> Self {
        self.vec3_params.insert(name.into(), default);
        self
    }

    pub fn is_shape(&self) -> bool {
        self.tags.contains(&TransformTag::Shape)
    }
}

/// The transform catalog handed to the generator. Owns the descriptors and
/// hands out shared handles.
pub struct TransformRegistry {
    transforms: Vec<Arc<Transform>>,
}

impl TransformRegistry {
    /// Catalog populated with the built-in transform set, including the
    /// foundational transforms favored during iterator synthesis.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(Transform::new("Linear"));
        registry.register(
            Transform::new("Affine")
                .with_vec3_param("translate", [0.0, 0.0, 0.0])
                .with_vec3_param("rotate", [0.0, 0.0, 0.0])
                .with_vec3_param("scale", [1.0, 1.0, 1.0]),
        );
        registry.register(
            Transform::new("Möbius")
                .with_vec3_param("a", [1.0, 0.0, 0.0])
                .with_vec3_param("b", [0.0, 0.0, 0.0])
                .with_vec3_param("c", [0.0, 0.0, 0.0])
                .with_vec3_param("d", [1.0, 0.0, 0.0]),
        );
        registry.register(
            Transform::new("Rotate Euler").with_vec3_param("rotation", [0.0, 0.0, 0.0]),
        );
        registry.register(Transform::new("Spherical").with_real_param("r", 1.0));
        registry.register(
            Transform::new("Translate").with_vec3_param("translate", [0.0, 0.0, 0.0]),
        );
        registry.register(
            Transform::new("Waves")
                .with_real_param("frequency", 2.0)
                .with_real_param("magnitude", 0.5),
        );
        registry.register(Transform::new("Julia").with_real_param("power", 2.0));
        registry.register(
            Transform::new("Sphere shape")
                .with_tag(TransformTag::Shape)
                .with_real_param("radius", 0.5),
        );

        registry
    }

    pub fn empty() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    pub fn register(&mut self, transform: Transform) -> Arc<Transform> {
        let transform = Arc::new(transform);
        self.transforms.push(Arc::clone(&transform));
        transform
    }

    pub fn get(&self, name: &str) -> Option<Arc<Transform>> {
        self.transforms.iter().find(|t| t.name == name).cloned()
    }

    pub fn all(&self) -> &[Arc<Transform>] {
        &self.transforms
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new()
    }
}
